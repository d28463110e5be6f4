//! N-Triples serializer for ontology graphs.
//!
//! One triple per line with absolute IRIs, in graph insertion order.
//! Suitable for streaming, bulk loading and diff-friendly storage.

use super::{escape_literal, iri_ref};
use crate::model::{Graph, Term};

/// Serializes `graph` to an N-Triples string.
#[must_use]
pub fn to_ntriples(graph: &Graph) -> String {
    let mut out = String::with_capacity(graph.len() * 128);
    for t in graph {
        triple(&mut out, &t.subject, &t.predicate, &object(&t.object));
    }
    out
}

fn triple(out: &mut String, subj: &str, pred: &str, obj: &str) {
    out.push_str(&iri_ref(subj));
    out.push(' ');
    out.push_str(&iri_ref(pred));
    out.push(' ');
    out.push_str(obj);
    out.push_str(" .\n");
}

fn object(term: &Term) -> String {
    match term {
        Term::Iri(iri) => iri_ref(iri),
        Term::Plain(value) => format!("\"{}\"", escape_literal(value)),
        Term::LangString { value, lang } => format!("\"{}\"@{lang}", escape_literal(value)),
        Term::Typed { value, datatype } => {
            format!("\"{}\"^^{}", escape_literal(value), iri_ref(datatype))
        }
    }
}
