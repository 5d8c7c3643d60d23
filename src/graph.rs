/*
    FoLiA2OAC (FoLiA to Open Annotation converter)
        Digital Infrastucture, KNAW Humanities Cluster

        Licensed under the GNU General Public License v3
*/

//! The triple model and the in-memory [`Graph`] that collects the output of a conversion.

use std::fmt;
use std::io::Write;

use crate::config::{debug, Config};
use crate::error::FoliaError;
use crate::file::open_file_writer;
use crate::types::DataFormat;

/// The object of a triple: either a resource or a literal string
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Term {
    Iri(String),
    Literal(String),
}

impl Term {
    pub fn iri(s: impl Into<String>) -> Self {
        Self::Iri(s.into())
    }

    pub fn literal(s: impl Into<String>) -> Self {
        Self::Literal(s.into())
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Iri(s) | Self::Literal(s) => s.as_str(),
        }
    }

    pub fn is_iri(&self) -> bool {
        matches!(self, Self::Iri(_))
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Iri(s) => write!(f, "<{}>", s),
            Self::Literal(s) => write!(f, "{:?}", s),
        }
    }
}

/// A single RDF statement. Subject and predicate are IRIs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Triple {
    pub subject: String,
    pub predicate: String,
    pub object: Term,
}

impl Triple {
    pub fn new(subject: impl Into<String>, predicate: impl Into<String>, object: Term) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object,
        }
    }
}

/// Anything triples can be written to. Sinks are append-only.
pub trait TripleSink {
    fn add_triple(&mut self, subject: &str, predicate: &str, object: Term);
}

impl TripleSink for Vec<Triple> {
    fn add_triple(&mut self, subject: &str, predicate: &str, object: Term) {
        self.push(Triple::new(subject, predicate, object));
    }
}

/// An in-memory, append-only graph which preserves insertion order
#[derive(Debug, Default, Clone)]
pub struct Graph {
    triples: Vec<Triple>,
}

impl TripleSink for Graph {
    fn add_triple(&mut self, subject: &str, predicate: &str, object: Term) {
        self.triples.push(Triple::new(subject, predicate, object));
    }
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Iterates over all triples in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, Triple> {
        self.triples.iter()
    }

    pub fn len(&self) -> usize {
        self.triples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    /// Iterates over all triples with the given subject
    pub fn triples_about<'a>(&'a self, subject: &'a str) -> impl Iterator<Item = &'a Triple> + 'a {
        self.triples.iter().filter(move |t| t.subject == subject)
    }

    /// Returns the objects of all triples with the given subject and predicate
    pub fn objects<'a>(
        &'a self,
        subject: &'a str,
        predicate: &'a str,
    ) -> impl Iterator<Item = &'a Term> + 'a {
        self.triples_about(subject)
            .filter(move |t| t.predicate == predicate)
            .map(|t| &t.object)
    }

    /// Returns all subjects that have the given `rdf:type`
    pub fn subjects_of_type<'a>(&'a self, class: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.triples
            .iter()
            .filter(move |t| {
                t.predicate == crate::vocab::RDF_TYPE
                    && matches!(&t.object, Term::Iri(s) if s == class)
            })
            .map(|t| t.subject.as_str())
    }

    /// Serialises the graph to a writer in the given format
    pub fn export(&self, writer: &mut dyn Write, format: DataFormat) -> Result<(), FoliaError> {
        match format {
            DataFormat::RdfXml => crate::rdfxml::write_rdfxml(self, writer),
            DataFormat::NTriples => crate::ntriples::write_ntriples(self, writer),
        }
    }

    /// Serialises the graph to a string in the given format
    pub fn export_to_string(&self, format: DataFormat) -> Result<String, FoliaError> {
        let mut buffer: Vec<u8> = Vec::new();
        self.export(&mut buffer, format)?;
        String::from_utf8(buffer)
            .map_err(|e| FoliaError::EncodingError("serialised graph".to_string(), e))
    }

    /// Writes the graph to file (or stdout if the filename is `-`), in the configured format
    pub fn to_file(&self, filename: &str, config: &Config) -> Result<(), FoliaError> {
        debug(config, || {
            format!(
                "Graph::to_file: {} ({} triples, {})",
                filename,
                self.len(),
                config.dataformat()
            )
        });
        let mut writer = open_file_writer(filename, config)?;
        self.export(&mut writer, config.dataformat())?;
        writer
            .flush()
            .map_err(|e| FoliaError::IOError(e, filename.to_string(), "Flushing output"))
    }
}

impl<'a> IntoIterator for &'a Graph {
    type Item = &'a Triple;
    type IntoIter = std::slice::Iter<'a, Triple>;

    fn into_iter(self) -> Self::IntoIter {
        self.triples.iter()
    }
}
