/*
    FoLiA2OAC (FoLiA to Open Annotation converter)
        Digital Infrastucture, KNAW Humanities Cluster

        Licensed under the GNU General Public License v3
*/

//! Extraction of named entities from a FoLiA document into [`EntityRecord`]s.

use smallvec::SmallVec;

use crate::config::{debug, Config};
use crate::error::FoliaError;
use crate::folia::FoliaDocument;
use crate::token::{TokenHandle, TokenRegistry};
use crate::xml::XmlElement;

/// One extracted named entity
#[derive(Debug, Clone, PartialEq)]
pub struct EntityRecord {
    class: String,
    members: SmallVec<[String; 4]>,
    creator: String,
    text: String,
}

impl EntityRecord {
    /// Creates a new entity record. All members must be known to the registry; the aggregate
    /// text is derived from them in structural order, regardless of the order they are given in.
    pub fn new<I, S>(
        class: impl Into<String>,
        members: I,
        creator: impl Into<String>,
        registry: &TokenRegistry,
    ) -> Result<Self, FoliaError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let members: SmallVec<[String; 4]> = members.into_iter().map(Into::into).collect();
        let mut handles: Vec<TokenHandle> = members
            .iter()
            .map(|id| registry.resolve(id))
            .collect::<Result<_, _>>()?;
        registry.sort_handles(&mut handles);
        let text = handles
            .iter()
            .filter_map(|handle| registry.get(*handle).and_then(|token| token.text()))
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
            .trim()
            .to_string();
        Ok(Self {
            class: class.into(),
            members,
            creator: creator.into(),
            text,
        })
    }

    /// Builds a record from an `entity` element, its member tokens are taken from the `wref` children
    fn from_element(
        element: &XmlElement,
        namespace: &str,
        creator: &str,
        registry: &TokenRegistry,
    ) -> Result<Self, FoliaError> {
        let class = element.attribute("class").ok_or_else(|| {
            FoliaError::MissingAttribute(
                element.name().to_string(),
                "class",
                "Reading entity class",
            )
        })?;
        let members = element
            .elements()
            .filter(|e| e.is(namespace, "wref"))
            .map(|wref| {
                wref.attribute("id").ok_or_else(|| {
                    FoliaError::MissingAttribute(
                        wref.name().to_string(),
                        "id",
                        "Reading entity member reference",
                    )
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(class, members, creator, registry)
    }

    /// The entity class (e.g. `per`, `loc`)
    pub fn class(&self) -> &str {
        &self.class
    }

    /// The identifiers of the member tokens, in the order they were encountered in the annotation
    pub fn members(&self) -> &[String] {
        &self.members
    }

    pub fn creator(&self) -> &str {
        &self.creator
    }

    /// The text of all member tokens, in document order, separated by single spaces
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the title for this entity: `class - text`
    pub fn title(&self) -> String {
        format!("{} - {}", self.class, self.text)
    }
}

/// Extracts all entities of the configured entity set, in document order. The creator is
/// resolved once for the whole run. Malformed entities are skipped with a warning, unless the
/// configuration is strict, in which case the first one fails the extraction.
pub fn extract_entities(
    document: &FoliaDocument,
    registry: &TokenRegistry,
    config: &Config,
) -> Result<Vec<EntityRecord>, FoliaError> {
    let set = config.entity_set();
    let creator = document.annotator(set).unwrap_or_default();
    debug(config, || {
        format!("extract_entities: set={}, creator={:?}", set, creator)
    });
    let mut records = Vec::new();
    for (i, element) in document.entities(set).into_iter().enumerate() {
        match EntityRecord::from_element(element, document.namespace(), creator, registry) {
            Ok(record) => records.push(record),
            Err(e) if e.is_data_fault() && !config.strict() => {
                tracing::warn!(
                    "Skipping entity #{} ({}): {}",
                    i + 1,
                    element.attribute("xml:id").unwrap_or("no id"),
                    e
                );
            }
            Err(e) => return Err(e),
        }
    }
    Ok(records)
}
