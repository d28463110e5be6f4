//! Runs the full conformance suite on the converted fixture tree.

use std::path::{Path, PathBuf};

use vsso_conformance::{run_all, Severity};
use vsso_ontology::{convert, Registry};
use vsso_vspec::load_tree;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("vspec")
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn fixture_conversion_conforms() -> anyhow::Result<()> {
    let registry = Registry::vss();
    let tree = load_tree(&fixture("VehicleSignalSpecification.vspec"), &[])?;
    let conversion = convert(&tree, &registry)?;
    let report = run_all(&conversion, &registry)?;

    let failures: Vec<_> = report.results.iter().filter(|r| r.is_failure()).collect();
    assert!(failures.is_empty(), "conformance failures: {failures:#?}");
    assert_eq!(report.warning_count(), 0, "{report}");

    for validator in ["ontology/declarations", "ontology/structure", "ontology/rdf"] {
        assert!(
            report
                .for_validator(validator)
                .any(|r| r.severity == Severity::Pass),
            "no result from {validator}"
        );
    }
    Ok(())
}

#[test]
fn report_serializes_to_json() -> anyhow::Result<()> {
    let registry = Registry::vss();
    let tree = load_tree(&fixture("VehicleSignalSpecification.vspec"), &[])?;
    let report = run_all(&convert(&tree, &registry)?, &registry)?;
    let json = serde_json::to_value(&report)?;
    assert_eq!(json["results"][0]["severity"], "pass");
    Ok(())
}
