//! Component and property structure validator.
//!
//! - Each component has at most one `partOfComponent`, and exactly one has none
//! - Each property has exactly one `belongsTo`, pointing at a component
//! - Each property has exactly one `propertyName`
//! - Static properties are never signals, and actuators are always signals

use std::collections::HashSet;

use vsso_ontology::model::iris::RDF_TYPE;
use vsso_ontology::{Concept, Graph, Registry, Term};

use crate::report::{ConformanceReport, TestResult};

const VALIDATOR: &str = "ontology/structure";

/// Validates the component hierarchy and property attachment in `graph`.
#[must_use]
pub fn validate(graph: &Graph, registry: &Registry) -> ConformanceReport {
    let mut report = ConformanceReport::new();
    let components = instances(graph, registry, Concept::VehicleComponent);
    let signals = instances(graph, registry, Concept::VehicleSignal);
    let actuators = instances(graph, registry, Concept::VehicleActuator);
    let statics = instances(graph, registry, Concept::StaticVehicleProperty);

    let part_of = registry.concept(Concept::PartOfComponent);
    let belongs_to = registry.concept(Concept::BelongsTo);
    let property_name = registry.concept(Concept::PropertyName);

    let mut violations: Vec<String> = Vec::new();
    let mut roots: Vec<&str> = Vec::new();
    for component in sorted(&components) {
        match graph.objects(component, &part_of).count() {
            0 => roots.push(component),
            1 => {}
            n => violations.push(format!("Component {component} has {n} partOfComponent edges")),
        }
    }

    let properties: HashSet<&str> = signals.union(&statics).copied().collect();
    for property in sorted(&properties) {
        let parents: Vec<&Term> = graph.objects(property, &belongs_to).collect();
        match parents.as_slice() {
            [parent] => {
                if !parent.as_iri().is_some_and(|iri| components.contains(iri)) {
                    violations.push(format!("Property {property} belongs to a non-component"));
                }
            }
            _ => violations.push(format!(
                "Property {property} has {} belongsTo edges",
                parents.len()
            )),
        }
        let names = graph.objects(property, &property_name).count();
        if names != 1 {
            violations.push(format!("Property {property} has {names} propertyName literals"));
        }
        if statics.contains(property) && signals.contains(property) {
            violations.push(format!("Property {property} is both static and a signal"));
        }
    }
    for actuator in sorted(&actuators) {
        if !signals.contains(actuator) {
            violations.push(format!("Actuator {actuator} is not a signal"));
        }
        if statics.contains(actuator) {
            violations.push(format!("Actuator {actuator} is static"));
        }
    }

    if violations.is_empty() {
        report.push(TestResult::pass(
            VALIDATOR,
            format!(
                "{} components and {} properties are well-formed",
                components.len(),
                properties.len()
            ),
        ));
    } else {
        report.push(TestResult::fail_with_details(
            VALIDATOR,
            format!("{} structural violations", violations.len()),
            violations,
        ));
    }

    match roots.as_slice() {
        [root] => report.push(TestResult::pass(
            VALIDATOR,
            format!("Component hierarchy has a single root {root}"),
        )),
        [] if components.is_empty() => {}
        _ => report.push(TestResult::warn(
            VALIDATOR,
            format!("Component hierarchy has {} roots", roots.len()),
        )),
    }

    report
}

fn instances<'g>(graph: &'g Graph, registry: &Registry, class: Concept) -> HashSet<&'g str> {
    let class = Term::iri(registry.concept(class));
    graph.subjects(RDF_TYPE, &class).collect()
}

/// Deterministic iteration order for reporting.
fn sorted<'a>(set: &HashSet<&'a str>) -> Vec<&'a str> {
    let mut items: Vec<&str> = set.iter().copied().collect();
    items.sort_unstable();
    items
}
