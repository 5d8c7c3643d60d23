/*
    FoLiA2OAC (FoLiA to Open Annotation converter)
        Digital Infrastucture, KNAW Humanities Cluster

        Licensed under the GNU General Public License v3
*/

//! Small shared types: serialisation formats, offset units and IRI minting schemes.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::FoliaError;

/// Serialisation format for the resulting graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataFormat {
    /// RDF/XML, as consumed by Open Annotation servers
    RdfXml,
    /// N-Triples, one statement per line
    NTriples,
}

impl Default for DataFormat {
    fn default() -> Self {
        Self::RdfXml
    }
}

impl TryFrom<&str> for DataFormat {
    type Error = FoliaError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "rdfxml" | "rdf/xml" | "xml" | "rdf" => Ok(Self::RdfXml),
            "ntriples" | "n-triples" | "nt" => Ok(Self::NTriples),
            _ => Err(FoliaError::ValueError(
                s.to_string(),
                "Invalid value for DataFormat, expected rdfxml or ntriples",
            )),
        }
    }
}

impl fmt::Display for DataFormat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::RdfXml => write!(f, "rdfxml"),
            Self::NTriples => write!(f, "ntriples"),
        }
    }
}

/// The unit in which character offsets and lengths are expressed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OffsetUnit {
    /// Unicode codepoints (default)
    Unicode,
    /// UTF-16 code units, as counted by Java and Javascript consumers
    Utf16,
    /// UTF-8 bytes
    Bytes,
}

impl Default for OffsetUnit {
    fn default() -> Self {
        Self::Unicode
    }
}

impl OffsetUnit {
    /// Measures the length of a string in this unit
    pub fn measure(&self, s: &str) -> usize {
        match self {
            Self::Unicode => s.chars().count(),
            Self::Utf16 => s.chars().map(char::len_utf16).sum(),
            Self::Bytes => s.len(),
        }
    }
}

impl TryFrom<&str> for OffsetUnit {
    type Error = FoliaError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "unicode" | "chars" | "codepoints" => Ok(Self::Unicode),
            "utf16" | "utf-16" => Ok(Self::Utf16),
            "bytes" | "utf8" | "utf-8" => Ok(Self::Bytes),
            _ => Err(FoliaError::ValueError(
                s.to_string(),
                "Invalid value for OffsetUnit, expected unicode, utf16 or bytes",
            )),
        }
    }
}

/// How fresh resource identifiers are minted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IriScheme {
    /// `urn:uuid:` followed by a random (v4) UUID
    Uuid,
    /// The configured IRI prefix followed by 21 URL-friendly random symbols
    NanoId,
}

impl Default for IriScheme {
    fn default() -> Self {
        Self::Uuid
    }
}

/// The character span a token was matched on in the source text.
/// Tokens that could not be matched have no alignment at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Alignment {
    offset: usize,
    length: usize,
}

impl Alignment {
    pub fn new(offset: usize, length: usize) -> Self {
        Self { offset, length }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn length(&self) -> usize {
        self.length
    }

    /// Returns the (non-inclusive) end of the span
    pub fn end(&self) -> usize {
        self.offset + self.length
    }
}
