/*
    FoLiA2OAC (FoLiA to Open Annotation converter)
        Digital Infrastucture, KNAW Humanities Cluster

        Licensed under the GNU General Public License v3
*/

//! Retrieval of the source text that a FoLiA document was derived from. The source is either a
//! plain text, or an RDF document carrying the text in a `chars` property.

use regex::Regex;
use std::io::Read;
use std::path::Path;
use std::sync::OnceLock;
use std::time::Duration;

use crate::config::{debug, Config};
use crate::error::FoliaError;
use crate::file::{get_filepath, read_file_bytes};
use crate::vocab::is_iri;
use crate::xml::XmlElement;

/// The source text of a conversion
#[derive(Debug, Clone, PartialEq)]
pub struct SourceText {
    location: String,
    iri: String,
    text: String,
}

impl SourceText {
    /// Creates a source text directly, without fetching anything
    pub fn new(location: impl Into<String>, text: impl Into<String>) -> Self {
        let location = location.into();
        Self {
            iri: location.clone(),
            location,
            text: text.into(),
        }
    }

    /// A source without text, alignment will leave all tokens unresolved
    pub fn empty(location: impl Into<String>, config: &Config) -> Self {
        let location = location.into();
        Self {
            iri: source_iri(&location, config),
            location,
            text: String::new(),
        }
    }

    /// Fetches the source from a URL (`http://`, `https://`, `file://`) or a file path, decodes it as UTF-8
    /// and unwraps the text if the payload is an RDF document.
    pub fn load(location: &str, config: &Config) -> Result<Self, FoliaError> {
        let payload = fetch(location, config)?;
        let text = unwrap_rdf(&payload, location)?.unwrap_or(payload);
        debug(config, || {
            format!(
                "SourceText::load: {} ({} characters)",
                location,
                text.chars().count()
            )
        });
        Ok(Self {
            iri: source_iri(location, config),
            location: location.to_string(),
            text,
        })
    }

    /// Overrides the IRI the annotation targets constrain
    pub fn with_iri(mut self, iri: impl Into<String>) -> Self {
        self.iri = iri.into();
        self
    }

    /// The location the source was loaded from, as given
    pub fn location(&self) -> &str {
        &self.location
    }

    /// The IRI of the source resource, as used in the output
    pub fn iri(&self) -> &str {
        &self.iri
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Retrieves the raw payload from a location, decoded as UTF-8
pub fn fetch(location: &str, config: &Config) -> Result<String, FoliaError> {
    let bytes = if location.starts_with("http://") || location.starts_with("https://") {
        fetch_url(location, config)?
    } else {
        read_file_bytes(location, config)?
    };
    String::from_utf8(bytes).map_err(|e| FoliaError::EncodingError(location.to_string(), e))
}

fn fetch_url(url: &str, config: &Config) -> Result<Vec<u8>, FoliaError> {
    debug(config, || format!("fetch_url: {}", url));
    let response = ureq::get(url)
        .timeout(Duration::from_secs(config.fetch_timeout()))
        .call()
        .map_err(|e| FoliaError::FetchError(url.to_string(), e.to_string()))?;
    let mut bytes = Vec::new();
    response
        .into_reader()
        .read_to_end(&mut bytes)
        .map_err(|e| FoliaError::IOError(e, url.to_string(), "Reading response body"))?;
    Ok(bytes)
}

fn rdf_root_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        //skips declarations, comments and doctype before the root start tag
        Regex::new(r"(?s)^\s*(?:(?:<\?.*?\?>|<!--.*?-->|<![^>]*>)\s*)*<(?:[\w.-]+:)?RDF[\s/>]")
            .expect("rdf root regex must compile")
    })
}

fn chars_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"(?s)<(?:[\w.-]+:)?chars(?:\s[^>]*)?>(.*?)</(?:[\w.-]+:)?chars\s*>")
            .expect("chars regex must compile")
    })
}

/// Replaces the predefined XML entities, leaving any other entity reference untouched
fn unescape_predefined(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

/// If the payload is an RDF document (its root element is `RDF`, with any prefix), returns the text
/// content of its first `chars` element. Returns `None` for anything else, which is taken to be plain text.
///
/// An RDF payload that is not well-formed (e.g. because it uses undeclared HTML entities) is still
/// unwrapped: the content of the first `chars` element is taken verbatim, with only the predefined
/// XML entities resolved.
pub fn unwrap_rdf(payload: &str, location: &str) -> Result<Option<String>, FoliaError> {
    if !payload.trim_start().starts_with('<') {
        return Ok(None);
    }
    let root = match XmlElement::parse(payload) {
        Ok(root) => root,
        Err(e) if rdf_root_regex().is_match(payload) => {
            tracing::warn!(
                "RDF source {} is not well-formed ({}), extracting chars without parsing",
                location,
                e
            );
            return chars_regex()
                .captures(payload)
                .map(|captures| Some(unescape_predefined(&captures[1])))
                .ok_or_else(|| FoliaError::MissingChars(location.to_string()));
        }
        Err(e) => {
            tracing::warn!(
                "Source {} looks like markup but does not parse ({}), treating it as plain text",
                location,
                e
            );
            return Ok(None);
        }
    };
    if root.name() != "RDF" {
        return Ok(None);
    }
    root.descendants()
        .find(|element| element.name() == "chars")
        .map(|chars| Some(chars.text()))
        .ok_or_else(|| FoliaError::MissingChars(location.to_string()))
}

/// Determines the IRI for a source location. Locations that already are IRIs are used as-is,
/// existing local files are turned into absolute `file://` IRIs.
pub fn source_iri(location: &str, config: &Config) -> String {
    if is_iri(location) {
        return location.to_string();
    }
    get_filepath(location, config.workdir())
        .ok()
        .filter(|path| path.as_path() != Path::new("-"))
        .and_then(|path| path.canonicalize().ok())
        .map(|path| format!("file://{}", path.to_string_lossy().replace(' ', "%20")))
        .unwrap_or_else(|| location.to_string())
}
