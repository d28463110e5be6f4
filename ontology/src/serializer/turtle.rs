//! Turtle 1.1 serializer for ontology graphs.
//!
//! Emits one `@prefix` line per bound prefix, then one block per subject in
//! first-use order. `rdf:type` statements lead each block and are written as
//! `a`. IRIs are compacted against the bound prefixes when the remainder is a
//! plain local name; everything else is written in angle brackets.

use std::collections::HashMap;

use super::{escape_literal, iri_ref};
use crate::model::iris::RDF_TYPE;
use crate::model::{Graph, Term, Triple};

/// Serializes `graph` to a Turtle string.
#[must_use]
pub fn to_turtle(graph: &Graph) -> String {
    let mut out = String::with_capacity(graph.len() * 64);
    let prefixes = graph.prefixes();

    for (prefix, namespace) in prefixes {
        out.push_str(&format!("@prefix {prefix}: {} .\n", iri_ref(namespace)));
    }
    out.push('\n');

    let mut order: Vec<&str> = Vec::new();
    let mut blocks: HashMap<&str, Vec<&Triple>> = HashMap::new();
    for triple in graph {
        let block = blocks.entry(triple.subject.as_str()).or_insert_with(|| {
            order.push(triple.subject.as_str());
            Vec::new()
        });
        block.push(triple);
    }

    for subject in order {
        let Some(block) = blocks.get(subject) else {
            continue;
        };
        let (types, rest): (Vec<&Triple>, Vec<&Triple>) =
            block.iter().partition(|t| t.predicate == RDF_TYPE);

        out.push_str(&name(subject, prefixes));
        let mut lines = types
            .iter()
            .map(|t| format!("a {}", object(&t.object, prefixes)))
            .chain(rest.iter().map(|t| {
                format!("{} {}", name(&t.predicate, prefixes), object(&t.object, prefixes))
            }));
        if let Some(first) = lines.next() {
            out.push_str("\n    ");
            out.push_str(&first);
        }
        for line in lines {
            out.push_str(" ;\n    ");
            out.push_str(&line);
        }
        out.push_str(" .\n\n");
    }

    if out.ends_with("\n\n") {
        out.pop();
    }
    out
}

/// Compacts `iri` to `prefix:local` using the longest matching namespace.
fn name(iri: &str, prefixes: &[(String, String)]) -> String {
    prefixes
        .iter()
        .filter(|(_, ns)| iri.starts_with(ns.as_str()))
        .max_by_key(|(_, ns)| ns.len())
        .and_then(|(prefix, ns)| {
            let local = &iri[ns.len()..];
            is_local_name(local).then(|| format!("{prefix}:{local}"))
        })
        .unwrap_or_else(|| iri_ref(iri))
}

fn is_local_name(local: &str) -> bool {
    !local.starts_with('-')
        && local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

fn object(term: &Term, prefixes: &[(String, String)]) -> String {
    match term {
        Term::Iri(iri) => name(iri, prefixes),
        Term::Plain(value) => format!("\"{}\"", escape_literal(value)),
        Term::LangString { value, lang } => format!("\"{}\"@{lang}", escape_literal(value)),
        Term::Typed { value, datatype } => {
            format!("\"{}\"^^{}", escape_literal(value), name(datatype, prefixes))
        }
    }
}
