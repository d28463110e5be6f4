//! Declaration-order validator.
//!
//! Checks that the generated graph only uses ontology terms it declares:
//! - Every property and class of the fixed schema is declared
//! - Every predicate in the ontology namespace is declared before its first use
//! - Every `rdf:type` target in the ontology namespace is a class declared before use
//! - Every `dataType` target in the ontology namespace is an `ArrayType` declared before use

use std::collections::HashMap;

use vsso_ontology::bootstrap::{classes, properties};
use vsso_ontology::model::iris::{OWL_CLASS, OWL_DATATYPE_PROPERTY, OWL_OBJECT_PROPERTY, RDF_TYPE};
use vsso_ontology::{Concept, Graph, Registry};

use crate::report::{ConformanceReport, TestResult};

const VALIDATOR: &str = "ontology/declarations";

/// What a declaration introduced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Declared {
    Class,
    Property,
    ArrayType,
}

/// Validates declaration order in `graph`.
#[must_use]
pub fn validate(graph: &Graph, registry: &Registry) -> ConformanceReport {
    let mut report = ConformanceReport::new();
    let array_type = registry.concept(Concept::ArrayType);
    let data_type = registry.concept(Concept::DataType);
    let ns = registry.namespace.as_str();

    // First declaration index of every declared term.
    let mut declared: HashMap<&str, (usize, Declared)> = HashMap::new();
    for (i, t) in graph.iter().enumerate() {
        if t.predicate != RDF_TYPE {
            continue;
        }
        let kind = match t.object.as_iri() {
            Some(OWL_CLASS) => Declared::Class,
            Some(OWL_OBJECT_PROPERTY | OWL_DATATYPE_PROPERTY) => Declared::Property,
            Some(iri) if iri == array_type => Declared::ArrayType,
            _ => continue,
        };
        declared.entry(t.subject.as_str()).or_insert((i, kind));
    }

    let mut missing: Vec<String> = Vec::new();
    for prop in properties() {
        let iri = registry.concept(prop.concept);
        if declared.get(iri.as_str()).map(|(_, kind)| *kind) != Some(Declared::Property) {
            missing.push(format!("Property {iri} is not declared"));
        }
    }
    for class in classes() {
        let iri = registry.concept(class.concept);
        if declared.get(iri.as_str()).map(|(_, kind)| *kind) != Some(Declared::Class) {
            missing.push(format!("Class {iri} is not declared"));
        }
    }
    if missing.is_empty() {
        report.push(TestResult::pass(
            VALIDATOR,
            format!(
                "Schema declares all {} properties and {} classes",
                properties().len(),
                classes().len()
            ),
        ));
    } else {
        report.push(TestResult::fail_with_details(
            VALIDATOR,
            format!("{} schema terms are not declared", missing.len()),
            missing,
        ));
    }

    let mut violations: Vec<String> = Vec::new();
    let mut check = |i: usize, iri: &str, expected: Declared, role: &str| {
        if !iri.starts_with(ns) {
            return;
        }
        match declared.get(iri) {
            Some(&(at, kind)) if kind == expected && at < i => {}
            Some(&(_, kind)) if kind != expected => {
                violations.push(format!("triple {i}: {role} {iri} is declared as {kind:?}"));
            }
            Some(_) => violations.push(format!(
                "triple {i}: {role} {iri} is used before its declaration"
            )),
            None => violations.push(format!("triple {i}: {role} {iri} is never declared")),
        }
    };

    for (i, t) in graph.iter().enumerate() {
        check(i, &t.predicate, Declared::Property, "predicate");
        match t.object.as_iri() {
            Some(class) if t.predicate == RDF_TYPE => check(i, class, Declared::Class, "class"),
            Some(datatype) if t.predicate == data_type => {
                check(i, datatype, Declared::ArrayType, "datatype");
            }
            _ => {}
        }
    }

    if violations.is_empty() {
        report.push(TestResult::pass(
            VALIDATOR,
            format!("All {} triples use terms declared before first use", graph.len()),
        ));
    } else {
        tracing::debug!(count = violations.len(), "declaration violations");
        report.push(TestResult::fail_with_details(
            VALIDATOR,
            format!("{} uses of undeclared or late-declared terms", violations.len()),
            violations,
        ));
    }

    report
}
