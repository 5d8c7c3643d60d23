/*
    FoLiA2OAC (FoLiA to Open Annotation converter)
        Digital Infrastucture, KNAW Humanities Cluster

        Licensed under the GNU General Public License v3
*/

//! The conversion pipeline: tokens, alignment, entity extraction and triple generation.

use crate::align::{align_tokens, AlignmentReport};
use crate::config::{debug, Config, Configurable};
use crate::entity::{extract_entities, EntityRecord};
use crate::error::FoliaError;
use crate::folia::FoliaDocument;
use crate::generate::TripleGenerator;
use crate::graph::Graph;
use crate::source::SourceText;
use crate::token::TokenRegistry;

/// The outcome of a conversion run
#[derive(Debug)]
pub struct Conversion {
    registry: TokenRegistry,
    records: Vec<EntityRecord>,
    annotations: Vec<String>,
    report: AlignmentReport,
    source: SourceText,
    graph: Graph,
}

impl Conversion {
    /// The tokens of the document, with their alignments
    pub fn registry(&self) -> &TokenRegistry {
        &self.registry
    }

    /// The extracted entities, in document order
    pub fn records(&self) -> &[EntityRecord] {
        &self.records
    }

    /// The identifiers of the generated annotations, parallel to [`Self::records()`]
    pub fn annotations(&self) -> &[String] {
        &self.annotations
    }

    pub fn alignment_report(&self) -> AlignmentReport {
        self.report
    }

    pub fn source(&self) -> &SourceText {
        &self.source
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Consumes the conversion, returning the resulting graph
    pub fn into_graph(self) -> Graph {
        self.graph
    }
}

/// Converts FoLiA documents and their source texts to Open Annotation graphs
#[derive(Debug, Clone, Default)]
pub struct Converter {
    config: Config,
}

impl Configurable for Converter {
    fn config(&self) -> &Config {
        &self.config
    }

    fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    fn set_config(&mut self, config: Config) -> &mut Self {
        self.config = config;
        self
    }
}

impl Converter {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Converts a FoLiA file and the source text at the given location (path or URL).
    ///
    /// An unreadable or malformed FoLiA file fails the conversion. A source text that can not be
    /// retrieved does not: the failure is logged and the conversion continues with an empty text,
    /// leaving all offsets unresolved.
    pub fn convert(
        &self,
        annotation_file: &str,
        source_location: &str,
    ) -> Result<Conversion, FoliaError> {
        tracing::info!("processing: {}", annotation_file);
        let document = FoliaDocument::from_file(annotation_file, &self.config)?;
        let source = self.load_source(source_location);
        self.convert_document(&document, source)
    }

    /// Loads the source text, substituting an empty text when that fails
    pub fn load_source(&self, location: &str) -> SourceText {
        match SourceText::load(location, &self.config) {
            Ok(source) => source,
            Err(e) => {
                tracing::warn!(
                    "Unable to retrieve source text, offsets will remain unresolved: {}",
                    e
                );
                SourceText::empty(location, &self.config)
            }
        }
    }

    /// Converts an already parsed FoLiA document against an already retrieved source text
    pub fn convert_document(
        &self,
        document: &FoliaDocument,
        source: SourceText,
    ) -> Result<Conversion, FoliaError> {
        let mut registry = document.tokens(&self.config)?;

        let report = align_tokens(&mut registry, source.text(), self.config.offset_unit())?;
        if report.unresolved > 0 {
            tracing::warn!(
                "{} of {} tokens could not be found in the source text",
                report.unresolved,
                registry.len()
            );
        }
        debug(&self.config, || format!("alignment: {:?}", report));

        let records = extract_entities(document, &registry, &self.config)?;
        tracing::info!(
            "{} tokens, {} entities of set {}",
            registry.len(),
            records.len(),
            self.config.entity_set()
        );

        let mut graph = Graph::new();
        let generator = TripleGenerator::new(source.iri(), &self.config);
        let annotations = generator.generate(&records, &registry, &mut graph)?;
        debug(&self.config, || format!("generated {} triples", graph.len()));

        Ok(Conversion {
            registry,
            records,
            annotations,
            report,
            source,
            graph,
        })
    }
}
