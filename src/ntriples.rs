/*
    FoLiA2OAC (FoLiA to Open Annotation converter)
        Digital Infrastucture, KNAW Humanities Cluster

        Licensed under the GNU General Public License v3
*/

//! N-Triples serialisation of a [`Graph`], one statement per line in insertion order.

use std::io::Write;

use crate::error::FoliaError;
use crate::graph::{Graph, Term};

/// Escapes a literal string for N-Triples
fn escape_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out
}

fn node(s: &str) -> String {
    if s.starts_with("_:") {
        s.to_string()
    } else {
        format!("<{}>", s)
    }
}

/// Writes the graph as N-Triples
pub fn write_ntriples(graph: &Graph, writer: &mut dyn Write) -> Result<(), FoliaError> {
    for triple in graph.iter() {
        let object = match &triple.object {
            Term::Iri(iri) => node(iri),
            Term::Literal(value) => format!("\"{}\"", escape_literal(value)),
        };
        writeln!(
            writer,
            "{} <{}> {} .",
            node(&triple.subject),
            triple.predicate,
            object
        )
        .map_err(|e| FoliaError::IOError(e, "-".to_string(), "Writing N-Triples"))?;
    }
    Ok(())
}
