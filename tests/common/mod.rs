#![allow(dead_code)]
use folia2oac::*;

pub const CARGO_MANIFEST_DIR: &'static str = env!("CARGO_MANIFEST_DIR");

pub const EXAMPLE_TEXT: &str = "Jan Jansen woont in Den Haag. Hij werkt bij de KNAW in Amsterdam.";

/// A minimal document in which the entity layer precedes the words it refers to
pub const EXAMPLE_FORWARD_REFERENCE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<FoLiA xmlns="http://ilk.uvt.nl/folia" xml:id="fwd" version="0.8">
  <metadata type="native">
    <annotations>
      <entity-annotation set="http://ilk.uvt.nl/folia/sets/frog-ner-nl" annotator="frog-ner"/>
    </annotations>
  </metadata>
  <text xml:id="fwd.text">
    <p xml:id="fwd.p.1">
      <s xml:id="fwd.p.1.s.1">
        <entities>
          <entity xml:id="fwd.p.1.s.1.entity.1" class="loc">
            <wref id="fwd.p.1.s.1.w.2" t="Utrecht"/>
          </entity>
        </entities>
        <w xml:id="fwd.p.1.s.1.w.1"><t>In</t></w>
        <w xml:id="fwd.p.1.s.1.w.2"><t>Utrecht</t></w>
      </s>
    </p>
  </text>
</FoLiA>"#;

/// A document with one well-formed entity and two malformed ones: one without class and one
/// referring to a word that does not exist
pub const EXAMPLE_MALFORMED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<FoLiA xmlns="http://ilk.uvt.nl/folia" xml:id="bad" version="0.8">
  <metadata type="native">
    <annotations>
      <entity-annotation set="http://ilk.uvt.nl/folia/sets/frog-ner-nl"/>
    </annotations>
  </metadata>
  <text xml:id="bad.text">
    <p xml:id="bad.p.1">
      <s xml:id="bad.p.1.s.1">
        <w xml:id="bad.p.1.s.1.w.1"><t>Piet</t></w>
        <w xml:id="bad.p.1.s.1.w.2"><t>en</t></w>
        <w xml:id="bad.p.1.s.1.w.3"><t>Klaas</t></w>
        <entities>
          <entity xml:id="bad.p.1.s.1.entity.1">
            <wref id="bad.p.1.s.1.w.1" t="Piet"/>
          </entity>
          <entity xml:id="bad.p.1.s.1.entity.2" class="per">
            <wref id="bad.p.1.s.1.w.3" t="Klaas"/>
          </entity>
          <entity xml:id="bad.p.1.s.1.entity.3" class="per">
            <wref id="bad.p.1.s.1.w.9" t="Jan"/>
          </entity>
        </entities>
      </s>
    </p>
  </text>
</FoLiA>"#;

/// A document with an entity that refers to the same word twice
pub const EXAMPLE_DUPLICATE_MEMBER: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<FoLiA xmlns="http://ilk.uvt.nl/folia" xml:id="dup" version="0.8">
  <metadata type="native">
    <annotations>
      <entity-annotation set="http://ilk.uvt.nl/folia/sets/frog-ner-nl" annotator="frog-ner"/>
    </annotations>
  </metadata>
  <text xml:id="dup.text">
    <p xml:id="dup.p.1">
      <s xml:id="dup.p.1.s.1">
        <w xml:id="dup.p.1.s.1.w.1"><t>Leiden</t></w>
        <w xml:id="dup.p.1.s.1.w.2"><t>ontzet</t></w>
        <entities>
          <entity xml:id="dup.p.1.s.1.entity.1" class="loc">
            <wref id="dup.p.1.s.1.w.1" t="Leiden"/>
            <wref id="dup.p.1.s.1.w.1" t="Leiden"/>
          </entity>
        </entities>
      </s>
    </p>
  </text>
</FoLiA>"#;

pub fn datafile(name: &str) -> String {
    format!("{}/tests/data/{}", CARGO_MANIFEST_DIR, name)
}

/// Returns the text constraints of all targets of an annotation, in order
pub fn constraints_of(graph: &Graph, annotation: &str) -> Vec<String> {
    graph
        .objects(annotation, OAC_HASTARGET)
        .flat_map(|target| graph.objects(target.as_str(), OAC_CONSTRAINEDBY))
        .flat_map(|constraint| graph.objects(constraint.as_str(), CNT_CHARS))
        .map(|chars| chars.as_str().to_string())
        .collect()
}

/// Returns the value of the first literal for a subject and predicate
pub fn literal_of<'a>(graph: &'a Graph, subject: &'a str, predicate: &'a str) -> Option<&'a str> {
    graph
        .objects(subject, predicate)
        .find(|term| !term.is_iri())
        .map(|term| term.as_str())
}

/// Returns the annotation with the given title
pub fn annotation_titled<'a>(graph: &'a Graph, title: &'a str) -> Option<&'a str> {
    graph
        .subjects_of_type(OAC_ANNOTATION)
        .find(|annotation| literal_of(graph, *annotation, DC_TITLE) == Some(title))
}
