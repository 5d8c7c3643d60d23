/*
    FoLiA2OAC (FoLiA to Open Annotation converter)
        Digital Infrastucture, KNAW Humanities Cluster

        Licensed under the GNU General Public License v3
*/

//! A minimal owned XML element tree with namespace-resolved element names and some
//! path-like queries. It is used for reading FoLiA documents and for unwrapping RDF-wrapped
//! source texts.

use quick_xml::events::{BytesStart, Event};
use quick_xml::name::ResolveResult;
use quick_xml::NsReader;

use crate::config::{debug, Config};
use crate::error::FoliaError;
use crate::file::read_file_utf8;

/// A node in the tree: either an element or a piece of (unescaped) text
#[derive(Debug, Clone, PartialEq)]
pub enum XmlNode {
    Element(XmlElement),
    Text(String),
}

/// An XML element with its attributes and children
#[derive(Debug, Clone, PartialEq)]
pub struct XmlElement {
    /// The namespace the element name is bound to (if any)
    namespace: Option<String>,
    /// The local name (without prefix)
    name: String,
    /// Attributes with their keys exactly as written (e.g. `xml:id`, `class`)
    attributes: Vec<(String, String)>,
    children: Vec<XmlNode>,
}

impl XmlElement {
    fn from_start(ns: ResolveResult, start: &BytesStart) -> Result<Self, FoliaError> {
        let namespace = match ns {
            ResolveResult::Bound(ns) => Some(String::from_utf8_lossy(ns.as_ref()).into_owned()),
            _ => None,
        };
        let mut attributes = Vec::new();
        for attrib in start.attributes() {
            let attrib = attrib.map_err(|e| {
                FoliaError::XmlError(e.into(), "Parsing attribute")
            })?;
            let value = attrib
                .unescape_value()
                .map_err(|e| FoliaError::XmlError(e, "Unescaping attribute value"))?;
            attributes.push((
                String::from_utf8_lossy(attrib.key.as_ref()).into_owned(),
                value.into_owned(),
            ));
        }
        Ok(Self {
            namespace,
            name: String::from_utf8_lossy(start.local_name().as_ref()).into_owned(),
            attributes,
            children: Vec::new(),
        })
    }

    /// Parses an XML document and returns its root element
    pub fn parse(xml: &str) -> Result<Self, FoliaError> {
        let mut reader = NsReader::from_str(xml);
        let mut stack: Vec<XmlElement> = Vec::new();
        let mut root: Option<XmlElement> = None;
        loop {
            let (ns, event) = reader
                .read_resolved_event()
                .map_err(|e| FoliaError::XmlError(e, "Reading XML event"))?;
            match event {
                Event::Start(start) => {
                    let element = Self::from_start(ns, &start)?;
                    stack.push(element);
                }
                Event::Empty(start) => {
                    let element = Self::from_start(ns, &start)?;
                    attach(&mut stack, &mut root, element)?;
                }
                Event::End(_) => {
                    let element = stack
                        .pop()
                        .ok_or(FoliaError::XmlStructureError("Closing tag without opening tag"))?;
                    attach(&mut stack, &mut root, element)?;
                }
                Event::Text(text) => {
                    if let Some(parent) = stack.last_mut() {
                        let text = text
                            .unescape()
                            .map_err(|e| FoliaError::XmlError(e, "Unescaping text"))?;
                        parent.push_text(&text);
                    }
                }
                Event::CData(data) => {
                    if let Some(parent) = stack.last_mut() {
                        parent.push_text(&String::from_utf8_lossy(&data));
                    }
                }
                Event::Eof => break,
                _ => {} //declarations, comments, processing instructions, doctype
            }
        }
        if !stack.is_empty() {
            return Err(FoliaError::XmlStructureError(
                "Unexpected end of document, unclosed elements remain",
            ));
        }
        root.ok_or(FoliaError::XmlStructureError("Document has no root element"))
    }

    /// Reads and parses an XML file
    pub fn from_file(filename: &str, config: &Config) -> Result<Self, FoliaError> {
        debug(config, || format!("XmlElement::from_file: {}", filename));
        let xml = read_file_utf8(filename, config)?;
        Self::parse(&xml)
    }

    fn push_text(&mut self, text: &str) {
        //adjacent text (e.g. text followed by CDATA) is merged into one node
        if let Some(XmlNode::Text(last)) = self.children.last_mut() {
            last.push_str(text);
        } else {
            self.children.push(XmlNode::Text(text.to_string()));
        }
    }

    /// Returns the local name of the element (without prefix)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the namespace the element is bound to
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Tests whether this element has the given namespace and local name
    pub fn is(&self, namespace: &str, name: &str) -> bool {
        self.name == name && self.namespace.as_deref() == Some(namespace)
    }

    /// Returns the value of an attribute. The key must be given as written in the document, including any prefix (`xml:id`).
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns all attributes
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Iterates over all child nodes
    pub fn children(&self) -> std::slice::Iter<'_, XmlNode> {
        self.children.iter()
    }

    /// Iterates over the child elements only
    pub fn elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|node| match node {
            XmlNode::Element(element) => Some(element),
            XmlNode::Text(_) => None,
        })
    }

    /// Iterates over this element and all its descendant elements in document order (pre-order)
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }

    /// Finds all descendants (including self) with the given namespace and local name, in document order
    pub fn find<'a>(
        &'a self,
        namespace: &'a str,
        name: &'a str,
    ) -> impl Iterator<Item = &'a XmlElement> + 'a {
        self.descendants().filter(move |e| e.is(namespace, name))
    }

    /// Returns the concatenated text of this element and all its descendants
    pub fn text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for child in self.children.iter() {
            match child {
                XmlNode::Text(text) => out.push_str(text),
                XmlNode::Element(element) => element.collect_text(out),
            }
        }
    }
}

fn attach(
    stack: &mut Vec<XmlElement>,
    root: &mut Option<XmlElement>,
    element: XmlElement,
) -> Result<(), FoliaError> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(XmlNode::Element(element));
        Ok(())
    } else if root.is_none() {
        *root = Some(element);
        Ok(())
    } else {
        Err(FoliaError::XmlStructureError(
            "Document has more than one root element",
        ))
    }
}

/// Pre-order iterator over an element and its descendant elements, produced by [`XmlElement::descendants()`]
pub struct Descendants<'a> {
    stack: Vec<&'a XmlElement>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a XmlElement;

    fn next(&mut self) -> Option<Self::Item> {
        let element = self.stack.pop()?;
        //push in reverse so the first child is visited first
        let len = self.stack.len();
        self.stack.extend(element.elements());
        self.stack[len..].reverse();
        Some(element)
    }
}
