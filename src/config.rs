/*
    FoLiA2OAC (FoLiA to Open Annotation converter)
        Digital Infrastucture, KNAW Humanities Cluster

        Licensed under the GNU General Public License v3
*/

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::FoliaError;
use crate::file::open_file_reader;
use crate::types::*;

/// The FoLiA XML namespace
pub const NS_FOLIA: &str = "http://ilk.uvt.nl/folia";

/// The entity set produced by the Frog tagger for Dutch named entities
pub const SET_FROG_NER_NL: &str = "http://ilk.uvt.nl/folia/sets/frog-ner-nl";

/// Namespace for the CATCH+ annotation vocabulary (entity annotations and inline text constraints)
pub const NS_CP: &str = "http://www.catchplus.nl/annotation/";

pub trait Configurable: Sized {
    //// Obtain the configuration
    fn config(&self) -> &Config;

    //// Obtain the configuration mutably
    fn config_mut(&mut self) -> &mut Config;

    ///Builder pattern to associate a configuration
    fn with_config(mut self, config: Config) -> Self {
        self.set_config(config);
        self
    }

    ///Setter to associate a configuration
    fn set_config(&mut self, config: Config) -> &mut Self;
}

/// This holds the configuration for a conversion run. A single configuration is shared by all phases.
#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(default)]
pub struct Config {
    /// Debug mode
    pub(crate) debug: bool,

    /// The working directory, relative files are resolved against it first
    pub(crate) workdir: Option<PathBuf>,

    /// The entity set to extract, entities of other sets are ignored entirely
    pub(crate) entity_set: String,

    /// The XML namespace of FoLiA elements
    pub(crate) folia_namespace: String,

    /// Namespace for the EntityAnnotation, InlineTextConstraint and chars terms
    pub(crate) annotation_namespace: String,

    /// How fresh resource identifiers are minted
    pub(crate) iri_scheme: IriScheme,

    /// Prefix for minted identifiers when using [`IriScheme::NanoId`]
    pub(crate) iri_prefix: String,

    /// The unit for offsets and ranges in text constraints
    pub(crate) offset_unit: OffsetUnit,

    /// Fail on malformed annotation nodes instead of skipping them with a warning
    pub(crate) strict: bool,

    /// The chosen dataformat for serialisation, defaults to RDF/XML
    pub(crate) dataformat: DataFormat,

    /// Timeout (in seconds) for fetching remote source texts
    pub(crate) fetch_timeout: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            debug: false,
            workdir: None,
            entity_set: SET_FROG_NER_NL.to_string(),
            folia_namespace: NS_FOLIA.to_string(),
            annotation_namespace: NS_CP.to_string(),
            iri_scheme: IriScheme::Uuid,
            iri_prefix: "urn:folia2oac:".to_string(),
            offset_unit: OffsetUnit::Unicode,
            strict: false,
            dataformat: DataFormat::RdfXml,
            fetch_timeout: 60,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable debug mode. In debug mode, verbose output will be logged
    pub fn with_debug(mut self, value: bool) -> Self {
        self.debug = value;
        self
    }

    /// Is debug mode enabled or not?
    pub fn debug(&self) -> bool {
        self.debug
    }

    /// Sets the working directory
    pub fn with_workdir(mut self, workdir: impl Into<PathBuf>) -> Self {
        self.workdir = Some(workdir.into());
        self
    }

    ///  Return the working directory, if set
    pub fn workdir(&self) -> Option<&Path> {
        self.workdir.as_ref().map(|x| x.as_path())
    }

    /// Sets the entity set to extract
    pub fn with_entity_set(mut self, set: impl Into<String>) -> Self {
        self.entity_set = set.into();
        self
    }

    pub fn entity_set(&self) -> &str {
        &self.entity_set
    }

    pub fn with_folia_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.folia_namespace = namespace.into();
        self
    }

    pub fn folia_namespace(&self) -> &str {
        &self.folia_namespace
    }

    pub fn with_annotation_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.annotation_namespace = namespace.into();
        self
    }

    /// Namespace for the EntityAnnotation, InlineTextConstraint and chars terms
    pub fn annotation_namespace(&self) -> &str {
        &self.annotation_namespace
    }

    /// Sets how fresh resource identifiers are minted. The prefix is only used by [`IriScheme::NanoId`].
    pub fn with_iri_scheme(mut self, scheme: IriScheme, prefix: impl Into<String>) -> Self {
        self.iri_scheme = scheme;
        self.iri_prefix = prefix.into();
        self
    }

    pub fn iri_scheme(&self) -> IriScheme {
        self.iri_scheme
    }

    pub fn iri_prefix(&self) -> &str {
        &self.iri_prefix
    }

    pub fn with_offset_unit(mut self, unit: OffsetUnit) -> Self {
        self.offset_unit = unit;
        self
    }

    /// Returns the unit in which offsets and ranges are expressed
    pub fn offset_unit(&self) -> OffsetUnit {
        self.offset_unit
    }

    /// In strict mode, malformed annotation nodes abort the conversion rather than being skipped
    pub fn with_strict(mut self, value: bool) -> Self {
        self.strict = value;
        self
    }

    pub fn strict(&self) -> bool {
        self.strict
    }

    /// Sets chosen dataformat for serialisation, defaults to RDF/XML.
    pub fn with_dataformat(mut self, value: DataFormat) -> Self {
        self.dataformat = value;
        self
    }

    /// Returns the configured dataformat for serialisation.
    pub fn dataformat(&self) -> DataFormat {
        self.dataformat
    }

    pub fn with_fetch_timeout(mut self, seconds: u64) -> Self {
        self.fetch_timeout = seconds;
        self
    }

    /// Timeout in seconds for fetching remote source texts
    pub fn fetch_timeout(&self) -> u64 {
        self.fetch_timeout
    }

    /// Loads configuration from a JSON file
    pub fn from_file(filename: &str) -> Result<Self, FoliaError> {
        let reader = open_file_reader(filename, &Config::default())?;
        let deserializer = &mut serde_json::Deserializer::from_reader(reader);
        let result: Result<Self, _> = serde_path_to_error::deserialize(deserializer);
        result.map_err(|e| {
            FoliaError::JsonError(e, filename.to_string(), "Reading config from file")
        })
    }

    /// Loads configuration from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self, FoliaError> {
        let deserializer = &mut serde_json::Deserializer::from_str(json);
        let result: Result<Self, _> = serde_path_to_error::deserialize(deserializer);
        result.map_err(|e| FoliaError::JsonError(e, "(string)".to_string(), "Parsing config"))
    }
}

/// Logs a debug message if debug mode is enabled in the configuration.
/// The message is only constructed when it will actually be emitted.
pub(crate) fn debug<F>(config: &Config, message_func: F)
where
    F: FnOnce() -> String,
{
    if config.debug() {
        tracing::debug!("{}", message_func());
    }
}
