/*
    FoLiA2OAC (FoLiA to Open Annotation converter)
        Digital Infrastucture, KNAW Humanities Cluster

        Licensed under the GNU General Public License v3
*/

//! ## Introduction
//!
//! This library converts named-entity annotations in [FoLiA](https://proycon.github.io/folia) documents
//! into [Open Annotation](http://www.openannotation.org/spec/beta/) RDF graphs. Each entity
//! becomes an annotation whose targets are constrained to the exact character spans of its
//! tokens in the original source text.
//!
//! FoLiA does not record where its tokens occur in the untokenised source, so the offsets
//! are reconstructed by replaying the tokens, in document order, against the source text.
//!
//! The conversion runs in four phases, each of which is available separately:
//!
//! * [`TokenRegistry`] - all words of the document, ordered by paragraph, sentence and word number ([`FoliaDocument::tokens()`])
//! * [`align_tokens()`] - resolves the offset of each token in the [`SourceText`]
//! * [`extract_entities()`] - builds an [`EntityRecord`] per entity of the configured set
//! * [`TripleGenerator`] - emits the annotation graph into a [`TripleSink`], such as a [`Graph`]
//!
//! The [`Converter`] ties all phases together:
//!
//! ```no_run
//! use folia2oac::{Config, Converter, DataFormat};
//!
//! let converter = Converter::new(Config::default());
//! let conversion = converter.convert("document.folia.xml", "https://example.org/document.txt")?;
//! println!("{}", conversion.graph().export_to_string(DataFormat::RdfXml)?);
//! # Ok::<(), folia2oac::FoliaError>(())
//! ```

mod align;
mod config;
mod convert;
mod entity;
mod error;
mod file;
mod folia;
mod generate;
mod graph;
mod ntriples;
mod rdfxml;
mod source;
mod token;
mod types;
mod vocab;
mod xml;

// Our internal crate structure is not very relevant to the outside world,
// expose all structs and traits in the root namespace, and be explicit about it:

pub use align::{align_tokens, AlignmentReport};
pub use config::{Config, Configurable, NS_CP, NS_FOLIA, SET_FROG_NER_NL};
pub use convert::{Conversion, Converter};
pub use entity::{extract_entities, EntityRecord};
pub use error::{FoliaError, FoliaResult};
pub use folia::FoliaDocument;
pub use generate::{generate_triples, text_constraint, TripleGenerator};
pub use graph::{Graph, Term, Triple, TripleSink};
pub use ntriples::write_ntriples;
pub use rdfxml::write_rdfxml;
pub use source::{fetch, source_iri, unwrap_rdf, SourceText};
pub use token::{Position, Token, TokenHandle, TokenRegistry};
pub use types::*;
pub use vocab::*;
pub use xml::{Descendants, XmlElement, XmlNode};
