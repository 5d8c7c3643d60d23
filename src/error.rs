/*
    FoLiA2OAC (FoLiA to Open Annotation converter)
        Digital Infrastucture, KNAW Humanities Cluster

        Licensed under the GNU General Public License v3
*/

//! This module defines the error type used throughout the library.

use thiserror::Error;

// ------------------------------ ERROR DEFINITIONS & IMPLEMENTATIONS -------------------------------------------------------------

/// Errors that may occur during a conversion. Most variants carry a short
/// static string describing the context in which the error arose.
#[derive(Error, Debug)]
pub enum FoliaError {
    /// The identifier of a word does not encode a `p.P.s.S.w.W` position
    #[error("MalformedTokenId: Token identifier does not encode a paragraph/sentence/word position: {0}")]
    MalformedTokenId(String),

    /// Two distinct tokens claim the same structural position (strict mode only)
    #[error("DuplicatePosition: Tokens {0} and {1} share the same structural position")]
    DuplicatePosition(String, String),

    /// A token identifier was referenced but never registered
    #[error("UnknownToken: No such token: {0} ({1})")]
    UnknownToken(String, &'static str),

    /// A token was aligned twice
    #[error("AlreadyAligned: Token {0} already has an offset assigned")]
    AlreadyAligned(String),

    /// A required attribute is missing from an element
    #[error("MissingAttribute: Element <{0}> lacks required attribute '{1}' ({2})")]
    MissingAttribute(String, &'static str, &'static str),

    /// The payload looked like an RDF document but no text could be extracted from it
    #[error("MissingChars: RDF payload from {0} contains no chars element")]
    MissingChars(String),

    #[error("XmlError: {0} ({1})")]
    XmlError(quick_xml::Error, &'static str),

    #[error("SerializeError: {0} ({1})")]
    SerializeError(String, &'static str),

    #[error("XmlStructureError: {0}")]
    XmlStructureError(&'static str),

    #[error("IOError: {0} for {1} ({2})")]
    IOError(std::io::Error, String, &'static str),

    #[error("FetchError: Unable to fetch {0}: {1}")]
    FetchError(String, String),

    #[error("EncodingError: {0} is not valid UTF-8 ({1})")]
    EncodingError(String, std::string::FromUtf8Error),

    #[error("JsonError: {0} for {1} ({2})")]
    JsonError(
        serde_path_to_error::Error<serde_json::Error>,
        String,
        &'static str,
    ),

    #[error("ValueError: {0} ({1})")]
    ValueError(String, &'static str),

    #[error("OtherError: {0}")]
    OtherError(&'static str),
}

impl FoliaError {
    /// Is this a data-integrity fault local to a single annotation node?
    /// Such faults may be skipped in lenient mode.
    pub fn is_data_fault(&self) -> bool {
        matches!(
            self,
            Self::MalformedTokenId(_)
                | Self::DuplicatePosition(..)
                | Self::UnknownToken(..)
                | Self::MissingAttribute(..)
        )
    }
}

impl From<&FoliaError> for String {
    /// Returns the error message as a String
    fn from(error: &FoliaError) -> String {
        error.to_string()
    }
}

pub type FoliaResult<T> = Result<T, FoliaError>;
