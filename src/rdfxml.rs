/*
    FoLiA2OAC (FoLiA to Open Annotation converter)
        Digital Infrastucture, KNAW Humanities Cluster

        Licensed under the GNU General Public License v3
*/

//! RDF/XML serialisation of a [`Graph`]. Triple order is preserved: consecutive triples about the
//! same subject are grouped into one `rdf:Description`, a subject that recurs later gets a new one.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::Write;

use crate::error::FoliaError;
use crate::graph::{Graph, Term};
use crate::vocab::{split_iri, KNOWN_PREFIXES, NS_RDF};

/// Maps namespaces to prefixes for a single serialisation
struct Namespaces(Vec<(String, String)>);

impl Namespaces {
    /// Collects the namespaces of all predicates in the graph, assigning known prefixes where possible
    fn from_graph(graph: &Graph) -> Result<Self, FoliaError> {
        let mut namespaces = Self(vec![("rdf".to_string(), NS_RDF.to_string())]);
        for triple in graph.iter() {
            let (namespace, _) = split_iri(&triple.predicate).ok_or_else(|| {
                FoliaError::SerializeError(
                    triple.predicate.clone(),
                    "Predicate can not be expressed as an XML qualified name",
                )
            })?;
            if namespaces.prefix(namespace).is_none() {
                let prefix = KNOWN_PREFIXES
                    .iter()
                    .find(|(prefix, ns)| {
                        *ns == namespace && namespaces.0.iter().all(|(p, _)| p.as_str() != *prefix)
                    })
                    .map(|(prefix, _)| prefix.to_string())
                    .unwrap_or_else(|| format!("ns{}", namespaces.0.len()));
                namespaces.0.push((prefix, namespace.to_string()));
            }
        }
        Ok(namespaces)
    }

    fn prefix(&self, namespace: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(_, ns)| ns == namespace)
            .map(|(prefix, _)| prefix.as_str())
    }

    /// Returns the qualified name for a predicate
    fn qname(&self, iri: &str) -> Result<String, FoliaError> {
        split_iri(iri)
            .and_then(|(namespace, local)| {
                self.prefix(namespace)
                    .map(|prefix| format!("{}:{}", prefix, local))
            })
            .ok_or_else(|| {
                FoliaError::SerializeError(iri.to_string(), "No namespace prefix for predicate")
            })
    }
}

fn write_error<E: std::fmt::Display>(e: E) -> FoliaError {
    FoliaError::SerializeError(e.to_string(), "Writing RDF/XML")
}

/// Adds the attribute that identifies a node, blank nodes (`_:`) are written as `rdf:nodeID`
fn push_node_attribute(element: &mut BytesStart, about_attribute: &str, node: &str) {
    if let Some(nodeid) = node.strip_prefix("_:") {
        element.push_attribute(("rdf:nodeID", nodeid));
    } else {
        element.push_attribute((about_attribute, node));
    }
}

/// Writes the graph as RDF/XML
pub fn write_rdfxml(graph: &Graph, writer: &mut dyn Write) -> Result<(), FoliaError> {
    let namespaces = Namespaces::from_graph(graph)?;
    let mut xml = Writer::new_with_indent(writer, b' ', 4);
    xml.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None))).map_err(write_error)?;

    let mut root = BytesStart::new("rdf:RDF");
    for (prefix, namespace) in namespaces.0.iter() {
        root.push_attribute((format!("xmlns:{}", prefix).as_str(), namespace.as_str()));
    }
    xml.write_event(Event::Start(root)).map_err(write_error)?;

    let mut current_subject: Option<&str> = None;
    for triple in graph.iter() {
        if current_subject != Some(triple.subject.as_str()) {
            if current_subject.is_some() {
                xml.write_event(Event::End(BytesEnd::new("rdf:Description"))).map_err(write_error)?;
            }
            let mut description = BytesStart::new("rdf:Description");
            push_node_attribute(&mut description, "rdf:about", &triple.subject);
            xml.write_event(Event::Start(description)).map_err(write_error)?;
            current_subject = Some(triple.subject.as_str());
        }
        let qname = namespaces.qname(&triple.predicate)?;
        match &triple.object {
            Term::Iri(iri) => {
                let mut property = BytesStart::new(qname.as_str());
                push_node_attribute(&mut property, "rdf:resource", iri);
                xml.write_event(Event::Empty(property)).map_err(write_error)?;
            }
            Term::Literal(value) => {
                xml.write_event(Event::Start(BytesStart::new(qname.as_str())))
                    .map_err(write_error)?;
                xml.write_event(Event::Text(BytesText::new(value))).map_err(write_error)?;
                xml.write_event(Event::End(BytesEnd::new(qname.as_str()))).map_err(write_error)?;
            }
        }
    }
    if current_subject.is_some() {
        xml.write_event(Event::End(BytesEnd::new("rdf:Description"))).map_err(write_error)?;
    }
    xml.write_event(Event::End(BytesEnd::new("rdf:RDF"))).map_err(write_error)?;
    xml.into_inner().write_all(b"\n").map_err(write_error)
}
