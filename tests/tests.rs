use std::fs::File;
use std::io::prelude::*;

use folia2oac::*;

mod common;
use crate::common::*;

#[test]
fn convert_example() -> Result<(), FoliaError> {
    let converter = Converter::new(Config::default());
    let conversion = converter.convert(
        &datafile("example.folia.xml"),
        &datafile("example.txt"),
    )?;

    assert_eq!(conversion.registry().len(), 15);
    let report = conversion.alignment_report();
    assert_eq!(report.aligned, 15);
    assert_eq!(report.unresolved, 0);

    //only entities of the NER set, the multi-word unit is ignored
    let classes: Vec<&str> = conversion.records().iter().map(|r| r.class()).collect();
    assert_eq!(classes, vec!["per", "loc", "org", "loc"]);
    assert_eq!(conversion.annotations().len(), 4);

    let graph = conversion.graph();
    assert_eq!(graph.subjects_of_type(OAC_ANNOTATION).count(), 4);
    assert_eq!(graph.subjects_of_type(OAC_CONSTRAINEDTARGET).count(), 6);
    assert_eq!(graph.subjects_of_type(OAC_BODY).count(), 4);
    assert!(conversion.source().iri().starts_with("file://"));
    assert_eq!(conversion.source().location(), datafile("example.txt"));
    Ok(())
}

#[test]
fn convert_example_offsets() -> Result<(), FoliaError> {
    let converter = Converter::new(Config::default());
    let conversion = converter.convert(
        &datafile("example.folia.xml"),
        &datafile("example.txt"),
    )?;
    let graph = conversion.graph();

    let person = annotation_titled(graph, "per - Jan Jansen").expect("annotation must exist");
    assert_eq!(
        constraints_of(graph, person),
        vec!["offset=\"0\" range=\"3\"", "offset=\"4\" range=\"6\""]
    );

    //members are listed in reverse order in the document, the text is in document order
    let place = annotation_titled(graph, "loc - Den Haag").expect("annotation must exist");
    assert_eq!(
        literal_of(graph, place, &format!("{}chars", NS_CP)),
        Some("Den Haag")
    );
    //targets follow the order of the member references
    assert_eq!(
        constraints_of(graph, place),
        vec!["offset=\"24\" range=\"4\"", "offset=\"20\" range=\"3\""]
    );

    let org = annotation_titled(graph, "org - KNAW").expect("annotation must exist");
    assert_eq!(constraints_of(graph, org), vec!["offset=\"47\" range=\"4\""]);

    let city = annotation_titled(graph, "loc - Amsterdam").expect("annotation must exist");
    assert_eq!(constraints_of(graph, city), vec!["offset=\"55\" range=\"9\""]);
    Ok(())
}

#[test]
fn convert_example_metadata() -> Result<(), FoliaError> {
    let converter = Converter::new(Config::default());
    let conversion = converter.convert(
        &datafile("example.folia.xml"),
        &datafile("example.txt"),
    )?;
    let graph = conversion.graph();
    let source_iri = conversion.source().iri();

    let created: Vec<&str> = graph
        .subjects_of_type(OAC_ANNOTATION)
        .filter_map(|annotation| literal_of(graph, annotation, DCTERMS_CREATED))
        .collect();
    assert_eq!(created.len(), 4);
    //one timestamp per run
    assert!(created.iter().all(|c| *c == created[0]));
    assert_eq!(created[0].len(), "2012-01-01 00:00:00".len());

    for annotation in graph.subjects_of_type(OAC_ANNOTATION) {
        assert_eq!(
            literal_of(graph, annotation, DCTERMS_CREATOR),
            Some("frog-ner-1.0")
        );
    }
    for target in graph.subjects_of_type(OAC_CONSTRAINEDTARGET) {
        let constrains: Vec<&Term> = graph.objects(target, OAC_CONSTRAINS).collect();
        assert_eq!(constrains, vec![&Term::iri(source_iri)]);
    }
    Ok(())
}

#[test]
fn convert_rdf_source() -> Result<(), FoliaError> {
    let converter = Converter::new(Config::default());
    let conversion = converter.convert(
        &datafile("example.folia.xml"),
        &datafile("example.rdf"),
    )?;
    assert_eq!(conversion.source().text(), EXAMPLE_TEXT);
    assert_eq!(conversion.alignment_report().aligned, 15);
    let graph = conversion.graph();
    let org = annotation_titled(graph, "org - KNAW").expect("annotation must exist");
    assert_eq!(constraints_of(graph, org), vec!["offset=\"47\" range=\"4\""]);
    Ok(())
}

#[test]
fn convert_unparsable_rdf_source() -> Result<(), FoliaError> {
    //the title holds an undeclared entity, the chars must be unwrapped nonetheless
    let converter = Converter::new(Config::default());
    let source = converter.load_source(&datafile("example.unparsable.rdf"));
    assert_eq!(source.text(), EXAMPLE_TEXT);

    let conversion = converter.convert(
        &datafile("example.folia.xml"),
        &datafile("example.unparsable.rdf"),
    )?;
    assert_eq!(conversion.alignment_report().aligned, 15);
    let graph = conversion.graph();
    let city = annotation_titled(graph, "loc - Amsterdam").expect("annotation must exist");
    assert_eq!(constraints_of(graph, city), vec!["offset=\"55\" range=\"9\""]);
    Ok(())
}

#[test]
fn load_plain_text_source_untouched() -> Result<(), FoliaError> {
    let filename = std::env::temp_dir().join("folia2oac-plain-source-test.txt");
    let filename = filename.to_string_lossy().into_owned();
    File::create(&filename)
        .and_then(|mut f| f.write_all(b"AT&amp;T opent een kantoor in Den Haag."))
        .map_err(|e| FoliaError::IOError(e, filename.clone(), "writing source"))?;
    let source = Converter::new(Config::default()).load_source(&filename);
    assert_eq!(source.location(), filename);
    assert_eq!(source.text(), "AT&amp;T opent een kantoor in Den Haag.");
    Ok(())
}

#[test]
fn convert_duplicate_member() -> Result<(), FoliaError> {
    let config = Config::default();
    let document = FoliaDocument::parse(EXAMPLE_DUPLICATE_MEMBER, &config)?;
    let conversion = Converter::new(config)
        .convert_document(&document, SourceText::new("urn:example:dup", "Leiden ontzet"))?;
    assert_eq!(conversion.records().len(), 1);
    let record = &conversion.records()[0];
    assert_eq!(record.members().len(), 2);
    //the word contributes its text once
    assert_eq!(record.text(), "Leiden");

    let graph = conversion.graph();
    let annotation = conversion.annotations()[0].as_str();
    let triples: Vec<&Triple> = graph.triples_about(annotation).collect();
    let positions: Vec<usize> = triples
        .iter()
        .enumerate()
        .filter(|(_, t)| t.predicate == OAC_HASTARGET)
        .map(|(i, _)| i)
        .collect();
    assert_eq!(positions.len(), 2);
    assert_eq!(positions[1], positions[0] + 1);

    let targets: Vec<&str> = graph
        .objects(annotation, OAC_HASTARGET)
        .map(|t| t.as_str())
        .collect();
    assert_ne!(targets[0], targets[1]);
    let constraints: Vec<&str> = targets
        .iter()
        .flat_map(|target| graph.objects(*target, OAC_CONSTRAINEDBY))
        .map(|c| c.as_str())
        .collect();
    assert_eq!(constraints.len(), 2);
    assert_ne!(constraints[0], constraints[1]);
    assert_eq!(
        constraints_of(graph, annotation),
        vec!["offset=\"0\" range=\"6\"", "offset=\"0\" range=\"6\""]
    );
    Ok(())
}

#[test]
fn convert_missing_source() -> Result<(), FoliaError> {
    let converter = Converter::new(Config::default());
    let conversion = converter.convert(
        &datafile("example.folia.xml"),
        &datafile("does-not-exist.txt"),
    )?;
    assert!(conversion.source().is_empty());
    assert_eq!(conversion.alignment_report().unresolved, 15);
    let graph = conversion.graph();
    assert_eq!(graph.subjects_of_type(OAC_ANNOTATION).count(), 4);
    for annotation in conversion.annotations() {
        for constraint in constraints_of(graph, annotation) {
            assert_eq!(constraint, "offset=\"-1\" range=\"-1\"");
        }
    }
    Ok(())
}

#[test]
fn convert_missing_annotation_file() {
    let converter = Converter::new(Config::default());
    assert!(converter
        .convert(&datafile("does-not-exist.xml"), &datafile("example.txt"))
        .is_err());
}

#[test]
fn convert_forward_reference() -> Result<(), FoliaError> {
    let config = Config::default();
    let document = FoliaDocument::parse(EXAMPLE_FORWARD_REFERENCE, &config)?;
    let conversion = Converter::new(config)
        .convert_document(&document, SourceText::new("urn:example:fwd", "In Utrecht"))?;
    assert_eq!(conversion.records().len(), 1);
    assert_eq!(conversion.records()[0].text(), "Utrecht");
    let graph = conversion.graph();
    let annotation = annotation_titled(graph, "loc - Utrecht").expect("annotation must exist");
    assert_eq!(
        constraints_of(graph, annotation),
        vec!["offset=\"3\" range=\"7\""]
    );
    assert_eq!(literal_of(graph, annotation, DCTERMS_CREATOR), Some("frog-ner"));
    Ok(())
}

#[test]
fn convert_malformed_lenient() -> Result<(), FoliaError> {
    let config = Config::default();
    let document = FoliaDocument::parse(EXAMPLE_MALFORMED, &config)?;
    let conversion = Converter::new(config)
        .convert_document(&document, SourceText::new("urn:example:bad", "Piet en Klaas"))?;
    //the entities without class and with an unknown member are skipped
    assert_eq!(conversion.records().len(), 1);
    assert_eq!(conversion.records()[0].title(), "per - Klaas");
    //the creator is still emitted, albeit empty
    let graph = conversion.graph();
    let annotation = &conversion.annotations()[0];
    assert_eq!(literal_of(graph, annotation, DCTERMS_CREATOR), Some(""));
    Ok(())
}

#[test]
fn convert_malformed_strict() -> Result<(), FoliaError> {
    let config = Config::default().with_strict(true);
    let document = FoliaDocument::parse(EXAMPLE_MALFORMED, &config)?;
    let result = Converter::new(config)
        .convert_document(&document, SourceText::new("urn:example:bad", "Piet en Klaas"));
    assert!(matches!(result, Err(FoliaError::MissingAttribute(..))));
    Ok(())
}

#[test]
fn convert_other_set() -> Result<(), FoliaError> {
    let converter = Converter::default().with_config(
        Config::default().with_entity_set("http://ilk.uvt.nl/folia/sets/frog-mwu-nl"),
    );
    let conversion = converter.convert(
        &datafile("example.folia.xml"),
        &datafile("example.txt"),
    )?;
    assert_eq!(conversion.records().len(), 1);
    assert_eq!(conversion.records()[0].title(), "mwu - Den Haag");
    assert_eq!(conversion.records()[0].creator(), "frog-mwu-1.0");
    Ok(())
}

#[test]
fn convert_utf16_offsets() -> Result<(), FoliaError> {
    let config = Config::default().with_offset_unit(OffsetUnit::Utf16);
    let document = FoliaDocument::parse(EXAMPLE_FORWARD_REFERENCE, &config)?;
    let conversion = Converter::new(config).convert_document(
        &document,
        SourceText::new("urn:example:fwd", "\u{1F600} In Utrecht"),
    )?;
    let graph = conversion.graph();
    let annotation = &conversion.annotations()[0];
    assert_eq!(
        constraints_of(graph, annotation),
        vec!["offset=\"6\" range=\"7\""]
    );
    Ok(())
}

#[test]
fn convert_custom_namespace() -> Result<(), FoliaError> {
    let config = Config::default().with_annotation_namespace("http://example.org/vocab#");
    let document = FoliaDocument::parse(EXAMPLE_FORWARD_REFERENCE, &config)?;
    let conversion = Converter::new(config)
        .convert_document(&document, SourceText::new("urn:example:fwd", "In Utrecht"))?;
    let graph = conversion.graph();
    assert_eq!(
        graph
            .subjects_of_type("http://example.org/vocab#EntityAnnotation")
            .count(),
        1
    );
    assert_eq!(
        graph
            .subjects_of_type("http://example.org/vocab#InlineTextConstraint")
            .count(),
        1
    );
    Ok(())
}

#[test]
fn export_rdfxml() -> Result<(), FoliaError> {
    let converter = Converter::new(Config::default());
    let conversion = converter.convert(
        &datafile("example.folia.xml"),
        &datafile("example.txt"),
    )?;
    let out = conversion.graph().export_to_string(DataFormat::RdfXml)?;
    assert!(out.contains("xmlns:oac=\"http://www.openannotation.org/ns/\""));
    assert!(out.contains("xmlns:cp=\"http://www.catchplus.nl/annotation/\""));
    assert!(out.contains("<dc:title>org - KNAW</dc:title>"));
    assert!(out.contains("<cp:chars>Den Haag</cp:chars>"));
    assert!(out.contains("rdf:resource=\"http://www.catchplus.nl/annotation/InlineTextConstraint\""));

    //the output parses back, with one description per subject
    let root = XmlElement::parse(&out)?;
    let descriptions = root.find(NS_RDF, "Description").count();
    assert_eq!(descriptions, 4 + 6 * 2 + 4);
    Ok(())
}

#[test]
fn export_ntriples() -> Result<(), FoliaError> {
    let converter = Converter::new(Config::default());
    let conversion = converter.convert(
        &datafile("example.folia.xml"),
        &datafile("example.txt"),
    )?;
    let graph = conversion.graph();
    let out = graph.export_to_string(DataFormat::NTriples)?;
    assert_eq!(out.lines().count(), graph.len());
    assert!(out
        .lines()
        .all(|line| line.starts_with("<urn:uuid:") && line.ends_with(" .")));
    assert!(out.contains(
        "<http://www.w3.org/2011/content#chars> \"offset=\\\"47\\\" range=\\\"4\\\"\" ."
    ));
    Ok(())
}

#[test]
fn export_to_file() -> Result<(), FoliaError> {
    let config = Config::default().with_dataformat(DataFormat::NTriples);
    let document = FoliaDocument::parse(EXAMPLE_FORWARD_REFERENCE, &config)?;
    let converter = Converter::new(config);
    let conversion =
        converter.convert_document(&document, SourceText::new("urn:example:fwd", "In Utrecht"))?;
    let filename = std::env::temp_dir().join("folia2oac-export-test.nt");
    let filename = filename.to_string_lossy().into_owned();
    conversion.graph().to_file(&filename, converter.config())?;

    let mut contents = String::new();
    File::open(&filename)
        .and_then(|mut f| f.read_to_string(&mut contents))
        .map_err(|e| FoliaError::IOError(e, filename.clone(), "reading back"))?;
    assert_eq!(contents.lines().count(), conversion.graph().len());
    assert!(contents.contains("<urn:example:fwd>"));
    Ok(())
}

#[test]
fn config_from_file() -> Result<(), FoliaError> {
    let filename = std::env::temp_dir().join("folia2oac-config-test.json");
    let filename = filename.to_string_lossy().into_owned();
    File::create(&filename)
        .and_then(|mut f| f.write_all(br#"{ "strict": true, "iri_scheme": "nanoid", "iri_prefix": "http://example.org/a/" }"#))
        .map_err(|e| FoliaError::IOError(e, filename.clone(), "writing config"))?;
    let config = Config::from_file(&filename)?;
    assert!(config.strict());
    assert_eq!(config.iri_scheme(), IriScheme::NanoId);

    let document = FoliaDocument::parse(EXAMPLE_FORWARD_REFERENCE, &config)?;
    let conversion = Converter::new(config)
        .convert_document(&document, SourceText::new("urn:example:fwd", "In Utrecht"))?;
    assert!(conversion
        .annotations()
        .iter()
        .all(|a| a.starts_with("http://example.org/a/")));
    Ok(())
}
