/*
    FoLiA2OAC (FoLiA to Open Annotation converter)
        Digital Infrastucture, KNAW Humanities Cluster

        Licensed under the GNU General Public License v3
*/

//! Queries on FoLiA documents: words, entities of a particular set and annotation declarations.

use crate::config::{debug, Config};
use crate::error::FoliaError;
use crate::token::TokenRegistry;
use crate::xml::XmlElement;

/// A parsed FoLiA document
#[derive(Debug, Clone)]
pub struct FoliaDocument {
    root: XmlElement,
    namespace: String,
}

impl FoliaDocument {
    /// Parses a FoLiA document from a string. Elements are matched in the namespace configured in `config`.
    pub fn parse(xml: &str, config: &Config) -> Result<Self, FoliaError> {
        Ok(Self {
            root: XmlElement::parse(xml)?,
            namespace: config.folia_namespace().to_string(),
        })
    }

    /// Reads a FoLiA document from file
    pub fn from_file(filename: &str, config: &Config) -> Result<Self, FoliaError> {
        Ok(Self {
            root: XmlElement::from_file(filename, config)?,
            namespace: config.folia_namespace().to_string(),
        })
    }

    /// Returns the document identifier
    pub fn id(&self) -> Option<&str> {
        self.root.attribute("xml:id")
    }

    pub fn root(&self) -> &XmlElement {
        &self.root
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Iterates over all word (`w`) elements in document order
    pub fn words(&self) -> impl Iterator<Item = &XmlElement> {
        self.root.find(&self.namespace, "w")
    }

    /// Returns the text of a word: the content of its first `t` child
    pub fn word_text(&self, word: &XmlElement) -> Option<String> {
        word.elements()
            .find(|e| e.is(&self.namespace, "t"))
            .map(|t| t.text())
    }

    /// Returns the annotator declared for the given entity set, i.e. the `annotator` attribute of the
    /// first `entity-annotation` declaration for that set which has one.
    pub fn annotator(&self, set: &str) -> Option<&str> {
        self.root
            .find(&self.namespace, "entity-annotation")
            .filter(|decl| decl.attribute("set") == Some(set))
            .find_map(|decl| decl.attribute("annotator"))
    }

    /// Returns the default entity set: the set of the sole `entity-annotation` declaration, if there is exactly one.
    pub fn default_entity_set(&self) -> Option<&str> {
        let mut declarations = self.root.find(&self.namespace, "entity-annotation");
        let first = declarations.next()?;
        if declarations.next().is_some() {
            None
        } else {
            first.attribute("set")
        }
    }

    /// Returns all `entity` elements of the given set, in document order. Entities without an explicit
    /// `set` attribute inherit the set of their enclosing `entities` layer, or else the default set.
    pub fn entities(&self, set: &str) -> Vec<&XmlElement> {
        let mut found = Vec::new();
        self.collect_entities(&self.root, self.default_entity_set(), set, &mut found);
        found
    }

    fn collect_entities<'a>(
        &'a self,
        element: &'a XmlElement,
        inherited_set: Option<&'a str>,
        set: &str,
        found: &mut Vec<&'a XmlElement>,
    ) {
        let element_set = element.attribute("set").or(inherited_set);
        if element.is(&self.namespace, "entity") && element_set == Some(set) {
            found.push(element);
        }
        let inherited_set = if element.is(&self.namespace, "entities") {
            element_set
        } else {
            inherited_set
        };
        for child in element.elements() {
            self.collect_entities(child, inherited_set, set, found);
        }
    }

    /// Builds the token registry from all words in the document. Words without identifier or with
    /// identifiers that do not encode a position are data faults: in strict mode they fail the whole
    /// run, otherwise they are logged and skipped (or positioned in document order, respectively).
    pub fn tokens(&self, config: &Config) -> Result<TokenRegistry, FoliaError> {
        let mut registry = TokenRegistry::new().with_strict(config.strict());
        for word in self.words() {
            let id = match word.attribute("xml:id") {
                Some(id) => id,
                None if config.strict() => {
                    return Err(FoliaError::MissingAttribute(
                        "w".to_string(),
                        "xml:id",
                        "Reading words",
                    ))
                }
                None => {
                    tracing::warn!("Skipping word without xml:id");
                    continue;
                }
            };
            if config.strict() {
                registry.register(id)?;
            } else {
                registry.register_lenient(id)?;
            }
            if let Some(text) = self.word_text(word) {
                registry.set_text(id, text)?;
            }
        }
        debug(config, || format!("FoliaDocument::tokens: {} tokens", registry.len()));
        Ok(registry)
    }
}
