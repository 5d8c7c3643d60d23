/*
    FoLiA2OAC (FoLiA to Open Annotation converter)
        Digital Infrastucture, KNAW Humanities Cluster

        Licensed under the GNU General Public License v3
*/

//! RDF vocabularies used in the output, and helpers for dealing with IRIs.

pub const NS_RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
pub const NS_OAC: &str = "http://www.openannotation.org/ns/";
pub const NS_CNT: &str = "http://www.w3.org/2011/content#";
pub const NS_DC: &str = "http://purl.org/dc/elements/1.1/";
pub const NS_DCTERMS: &str = "http://purl.org/dc/terms/";

pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";

pub const OAC_ANNOTATION: &str = "http://www.openannotation.org/ns/Annotation";
pub const OAC_BODY: &str = "http://www.openannotation.org/ns/Body";
pub const OAC_CONSTRAINEDTARGET: &str = "http://www.openannotation.org/ns/ConstrainedTarget";
pub const OAC_CONSTRAINT: &str = "http://www.openannotation.org/ns/Constraint";
pub const OAC_HASBODY: &str = "http://www.openannotation.org/ns/hasBody";
pub const OAC_HASTARGET: &str = "http://www.openannotation.org/ns/hasTarget";
pub const OAC_CONSTRAINS: &str = "http://www.openannotation.org/ns/constrains";
pub const OAC_CONSTRAINEDBY: &str = "http://www.openannotation.org/ns/constrainedBy";

pub const CNT_CONTENTASTEXT: &str = "http://www.w3.org/2011/content#ContentAsText";
pub const CNT_CHARS: &str = "http://www.w3.org/2011/content#chars";
pub const CNT_CHARACTERENCODING: &str = "http://www.w3.org/2011/content#characterEncoding";

pub const DC_TITLE: &str = "http://purl.org/dc/elements/1.1/title";
pub const DCTERMS_CREATOR: &str = "http://purl.org/dc/terms/creator";
pub const DCTERMS_CREATED: &str = "http://purl.org/dc/terms/created";

/// Namespace prefixes used when serialising, in order of preference
pub const KNOWN_PREFIXES: &[(&str, &str)] = &[
    ("rdf", NS_RDF),
    ("oac", NS_OAC),
    ("cnt", NS_CNT),
    ("dc", NS_DC),
    ("dcterms", NS_DCTERMS),
    ("cp", crate::config::NS_CP),
];

/// The terms from the (configurable) annotation namespace
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationVocabulary {
    pub entity_annotation: String,
    pub inline_text_constraint: String,
    pub chars: String,
}

impl AnnotationVocabulary {
    pub fn new(namespace: &str) -> Self {
        Self {
            entity_annotation: format!("{}EntityAnnotation", namespace),
            inline_text_constraint: format!("{}InlineTextConstraint", namespace),
            chars: format!("{}chars", namespace),
        }
    }
}

/// Tests if a character is valid or not in an IRI
fn invalid_in_iri(c: char) -> bool {
    c == ' ' || c == '\t' || c == '\n' || c == '"' || c == '<' || c == '>'
}

/// Tests whether a string is a valid IRI
pub fn is_iri(s: &str) -> bool {
    if let Some(pos) = s.find(':') {
        if s.find(invalid_in_iri).is_some() {
            return false;
        }
        let scheme = &s[..pos];
        matches!(scheme, "http" | "https" | "urn" | "file" | "_")
    } else {
        false
    }
}

/// Splits an IRI into a namespace and a local name, at the last `#`, `/` or `:`.
/// Returns `None` if no valid XML local name can be split off.
pub fn split_iri(iri: &str) -> Option<(&str, &str)> {
    let pos = iri.rfind(|c| c == '#' || c == '/' || c == ':')?;
    let (namespace, local) = (&iri[..=pos], &iri[pos + 1..]);
    let mut chars = local.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return None,
    }
    if chars.all(|c| c.is_alphanumeric() || c == '_' || c == '-' || c == '.') {
        Some((namespace, local))
    } else {
        None
    }
}
