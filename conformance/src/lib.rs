//! Conformance checks for generated VSS ontology graphs.
//!
//! The checks run on a finished [`Conversion`] and never modify it. They
//! document what every generated ontology must satisfy and report each
//! outcome as a [`TestResult`].
//!
//! # Conformance Scope
//!
//! | Validator | Standard |
//! |-----------|----------|
//! | `ontology/declarations` | Every ontology term is declared before first use |
//! | `ontology/structure` | Component hierarchy and property attachment |
//! | `ontology/rdf` | RDF 1.1, Turtle 1.1, N-Triples |
//!
//! # Entry Point
//!
//! ```no_run
//! use std::path::Path;
//!
//! # fn main() -> anyhow::Result<()> {
//! let registry = vsso_ontology::Registry::vss();
//! let tree = vsso_vspec::load_tree(Path::new("VehicleSignalSpecification.vspec"), &[])?;
//! let conversion = vsso_ontology::convert(&tree, &registry)?;
//! let report = vsso_conformance::run_all(&conversion, &registry)?;
//! assert!(report.all_passed());
//! # Ok(())
//! # }
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod report;
pub mod validators;

pub use report::{ConformanceReport, Severity, TestResult};

use vsso_ontology::{Conversion, Registry};

/// Runs all conformance validators and returns the aggregated report.
///
/// Validators are run in this order:
/// 1. Declarations (schema completeness, declared-before-use)
/// 2. Structure (components, properties, signal kinds)
/// 3. RDF 1.1 / Turtle 1.1 / N-Triples parse-back
///
/// # Errors
///
/// Returns an error only if a validator cannot run; failed checks are
/// reported in the returned report.
pub fn run_all(conversion: &Conversion, registry: &Registry) -> anyhow::Result<ConformanceReport> {
    let graph = &conversion.graph;
    let mut report = ConformanceReport::new();

    // 1. Declarations
    report.extend(validators::ontology::declarations::validate(graph, registry));

    // 2. Structure
    report.extend(validators::ontology::structure::validate(graph, registry));

    // 3. RDF 1.1 / Turtle 1.1
    report.extend(validators::ontology::rdf::validate(graph)?);

    tracing::debug!(
        checks = report.results.len(),
        failures = report.failure_count(),
        "conformance run complete"
    );
    Ok(report)
}
