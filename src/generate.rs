/*
    FoLiA2OAC (FoLiA to Open Annotation converter)
        Digital Infrastucture, KNAW Humanities Cluster

        Licensed under the GNU General Public License v3
*/

//! Translation of [`EntityRecord`]s into Open Annotation triples.
//!
//! Every entity becomes an annotation with a textual body holding the entity class, and one
//! constrained target per member token, pointing at the character span of that token in the
//! source text:
//!
//! ```text
//! annotation --hasBody--> body (ContentAsText: class)
//!            --hasTarget--> target --constrains--> source
//!                                  --constrainedBy--> constraint (offset="..." range="...")
//! ```

use chrono::Local;
use nanoid::nanoid;
use uuid::Uuid;

use crate::config::{debug, Config};
use crate::entity::EntityRecord;
use crate::error::FoliaError;
use crate::graph::{Term, TripleSink};
use crate::token::TokenRegistry;
use crate::types::{Alignment, IriScheme};
use crate::vocab::*;

const ENCODING: &str = "UTF-8";

/// Formats the content of an inline text constraint. Unaligned tokens get `-1` for both values.
pub fn text_constraint(alignment: Option<Alignment>) -> String {
    match alignment {
        Some(alignment) => format!(
            "offset=\"{}\" range=\"{}\"",
            alignment.offset(),
            alignment.length()
        ),
        None => "offset=\"-1\" range=\"-1\"".to_string(),
    }
}

/// Emits the annotation graph for entity records into a [`TripleSink`]
#[derive(Debug, Clone)]
pub struct TripleGenerator {
    source_iri: String,
    created: String,
    iri_scheme: IriScheme,
    iri_prefix: String,
    vocabulary: AnnotationVocabulary,
    debug: bool,
}

impl TripleGenerator {
    /// Creates a generator for targets in the given source. The creation timestamp is taken once, now.
    pub fn new(source_iri: impl Into<String>, config: &Config) -> Self {
        Self {
            source_iri: source_iri.into(),
            created: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            iri_scheme: config.iri_scheme(),
            iri_prefix: config.iri_prefix().to_string(),
            vocabulary: AnnotationVocabulary::new(config.annotation_namespace()),
            debug: config.debug(),
        }
    }

    /// Overrides the creation timestamp (`yyyy-MM-dd HH:mm:ss`) of all annotations
    pub fn with_created(mut self, created: impl Into<String>) -> Self {
        self.created = created.into();
        self
    }

    pub fn created(&self) -> &str {
        &self.created
    }

    pub fn source_iri(&self) -> &str {
        &self.source_iri
    }

    /// Mints a fresh resource identifier
    pub fn mint(&self) -> String {
        match self.iri_scheme {
            IriScheme::Uuid => format!("urn:uuid:{}", Uuid::new_v4()),
            IriScheme::NanoId => format!("{}{}", self.iri_prefix, nanoid!()),
        }
    }

    /// Emits all triples for all records, in order. Returns the identifiers of the annotations.
    pub fn generate<S: TripleSink + ?Sized>(
        &self,
        records: &[EntityRecord],
        registry: &TokenRegistry,
        sink: &mut S,
    ) -> Result<Vec<String>, FoliaError> {
        records
            .iter()
            .map(|record| self.generate_entity(record, registry, sink))
            .collect()
    }

    /// Emits all triples for a single entity record. Returns the identifier of the annotation.
    ///
    /// All `hasTarget` triples of the annotation are emitted before any triple about a target.
    pub fn generate_entity<S: TripleSink + ?Sized>(
        &self,
        record: &EntityRecord,
        registry: &TokenRegistry,
        sink: &mut S,
    ) -> Result<String, FoliaError> {
        let annotation = self.mint();
        let body = self.mint();
        if self.debug {
            tracing::debug!(
                "TripleGenerator: {} ({}) -> {}",
                record.title(),
                record.members().join(","),
                annotation
            );
        }

        sink.add_triple(&annotation, RDF_TYPE, Term::iri(OAC_ANNOTATION));
        sink.add_triple(
            &annotation,
            RDF_TYPE,
            Term::iri(self.vocabulary.entity_annotation.as_str()),
        );
        sink.add_triple(&annotation, OAC_HASBODY, Term::iri(body.as_str()));
        sink.add_triple(
            &annotation,
            &self.vocabulary.chars,
            Term::literal(record.text()),
        );
        sink.add_triple(&annotation, DC_TITLE, Term::literal(record.title()));
        sink.add_triple(&annotation, DCTERMS_CREATOR, Term::literal(record.creator()));
        sink.add_triple(
            &annotation,
            DCTERMS_CREATED,
            Term::literal(self.created.as_str()),
        );

        let targets: Vec<(&str, String)> = record
            .members()
            .iter()
            .map(|id| (id.as_str(), self.mint()))
            .collect();
        for (_, target) in targets.iter() {
            sink.add_triple(&annotation, OAC_HASTARGET, Term::iri(target.as_str()));
        }

        for (id, target) in targets.iter() {
            let token = registry
                .lookup(id)
                .ok_or_else(|| FoliaError::UnknownToken(id.to_string(), "generating target"))?;
            let constraint = self.mint();
            sink.add_triple(target, RDF_TYPE, Term::iri(OAC_CONSTRAINEDTARGET));
            sink.add_triple(target, OAC_CONSTRAINS, Term::iri(self.source_iri.as_str()));
            sink.add_triple(target, OAC_CONSTRAINEDBY, Term::iri(constraint.as_str()));

            sink.add_triple(&constraint, RDF_TYPE, Term::iri(OAC_CONSTRAINT));
            sink.add_triple(
                &constraint,
                RDF_TYPE,
                Term::iri(self.vocabulary.inline_text_constraint.as_str()),
            );
            sink.add_triple(&constraint, RDF_TYPE, Term::iri(CNT_CONTENTASTEXT));
            sink.add_triple(
                &constraint,
                CNT_CHARS,
                Term::literal(text_constraint(token.alignment())),
            );
            sink.add_triple(&constraint, CNT_CHARACTERENCODING, Term::literal(ENCODING));
        }

        sink.add_triple(&body, RDF_TYPE, Term::iri(CNT_CONTENTASTEXT));
        sink.add_triple(&body, RDF_TYPE, Term::iri(OAC_BODY));
        sink.add_triple(&body, CNT_CHARS, Term::literal(record.class()));
        sink.add_triple(&body, CNT_CHARACTERENCODING, Term::literal(ENCODING));
        Ok(annotation)
    }
}

/// Convenience function: emits the triples for all records with a generator built from the configuration
pub fn generate_triples<S: TripleSink + ?Sized>(
    records: &[EntityRecord],
    registry: &TokenRegistry,
    source_iri: &str,
    sink: &mut S,
    config: &Config,
) -> Result<Vec<String>, FoliaError> {
    let generator = TripleGenerator::new(source_iri, config);
    debug(config, || {
        format!(
            "generate_triples: {} entities, created={}",
            records.len(),
            generator.created()
        )
    });
    generator.generate(records, registry, sink)
}
