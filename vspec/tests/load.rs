//! Loader tests against the fixture vspec files.

use std::path::{Path, PathBuf};

use vsso_vspec::{load_tree, LeafRole, NodeBody, VspecError};

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn loads_tree_with_nested_includes() -> Result<(), VspecError> {
    let tree = load_tree(&fixture("VehicleSignalSpecification.vspec"), &[])?;
    let names: Vec<String> = tree
        .pre_order()
        .map(|id| tree.qualified_name(id, "."))
        .collect();
    assert_eq!(
        names,
        [
            "Vehicle",
            "Vehicle.Speed",
            "Vehicle.LowVoltageSystemState",
            "Vehicle.Cabin",
            "Vehicle.Cabin.Door",
            "Vehicle.Cabin.Door.IsOpen",
            "Vehicle.Cabin.Door.Position",
            "Vehicle.Cabin.Seat",
            "Vehicle.Cabin.Seat.Position",
            "Vehicle.Cabin.Seat.Heating",
            "Vehicle.Cabin.DoorCount",
            "Vehicle.VehicleIdentification",
            "Vehicle.VehicleIdentification.VIN",
        ]
    );
    Ok(())
}

#[test]
fn leaf_attributes_are_captured() -> Result<(), VspecError> {
    let tree = load_tree(&fixture("VehicleSignalSpecification.vspec"), &[])?;

    let speed = tree.find("Vehicle.Speed").map(|id| tree.node(id));
    let Some(NodeBody::Leaf(leaf)) = speed.map(|n| &n.body) else {
        panic!("Vehicle.Speed should be a leaf");
    };
    assert_eq!(leaf.role, LeafRole::Sensor);
    assert_eq!(leaf.unit.as_deref(), Some("km/h"));
    assert_eq!(leaf.min.as_deref(), Some("0"));
    assert_eq!(leaf.max.as_deref(), Some("300"));
    assert_eq!(leaf.datatype.as_ref().map(ToString::to_string).as_deref(), Some("float"));

    let state = tree.find("Vehicle.LowVoltageSystemState").map(|id| tree.node(id));
    let allowed = state.and_then(|n| n.leaf()).and_then(|l| l.allowed.clone());
    assert_eq!(
        allowed.map(|a| a.len()),
        Some(6),
        "allowed values should be kept in order"
    );

    let heating = tree.find("Vehicle.Cabin.Seat.Heating").map(|id| tree.node(id));
    let tag = heating.and_then(|n| n.leaf()).and_then(|l| l.datatype.clone());
    assert!(tag.is_some_and(|t| t.is_array() && t.base() == "int8"));

    let door = tree.find("Vehicle.Cabin.Door").map(|id| tree.node(id));
    assert!(door.is_some_and(|n| n.is_branch()));
    Ok(())
}

#[test]
fn include_dirs_are_searched() -> Result<(), VspecError> {
    // `Cabin.vspec` is only reachable through the include dir.
    let dir = std::env::temp_dir().join(format!("vsso-vspec-include-{}", std::process::id()));
    std::fs::create_dir_all(&dir).map_err(|source| VspecError::Io {
        path: dir.clone(),
        source,
    })?;
    let root = dir.join("Root.vspec");
    std::fs::write(
        &root,
        "Vehicle:\n  type: branch\n  description: Root.\n\n\
         Vehicle.Cabin:\n  type: branch\n  description: Cabin.\n\n\
         #include Cabin.vspec Vehicle.Cabin\n",
    )
    .map_err(|source| VspecError::Io {
        path: root.clone(),
        source,
    })?;

    let missing = load_tree(&root, &[]);
    assert!(matches!(missing, Err(VspecError::IncludeNotFound { .. })));

    let tree = load_tree(&root, &[fixture("")])?;
    assert!(tree.find("Vehicle.Cabin.Seat.Position").is_some());
    let _ = std::fs::remove_dir_all(&dir);
    Ok(())
}

#[test]
fn cyclic_include_is_an_error() {
    let result = load_tree(&fixture("cycle/A.vspec"), &[]);
    assert!(matches!(result, Err(VspecError::CyclicInclude { .. })));
}

#[test]
fn missing_include_is_an_error() {
    let result = load_tree(&fixture("missing_include.vspec"), &[]);
    assert!(matches!(result, Err(VspecError::IncludeNotFound { .. })));
}

#[test]
fn node_without_parent_is_an_error() {
    let result = load_tree(&fixture("orphan.vspec"), &[]);
    assert!(matches!(result, Err(VspecError::MissingParent { .. })));
}

#[test]
fn bare_include_reports_its_line() {
    let result = load_tree(&fixture("malformed_include.vspec"), &[]);
    assert!(
        matches!(result, Err(VspecError::MalformedInclude { line: 4, .. })),
        "{result:?}"
    );
}

#[test]
fn included_file_overlays_earlier_attributes() -> Result<(), VspecError> {
    let tree = load_tree(&fixture("overlay/Root.vspec"), &[])?;
    assert_eq!(tree.len(), 2, "an overlay must not add nodes");

    let speed = tree.find("Vehicle.Speed").map(|id| tree.node(id));
    assert_eq!(
        speed.map(|n| n.description.as_str()),
        Some("Vehicle speed in SI units.")
    );
    let leaf = speed.and_then(|n| n.leaf());
    assert_eq!(leaf.and_then(|l| l.unit.as_deref()), Some("m/s"));
    // Attributes the overlay does not mention are kept.
    assert_eq!(
        leaf.and_then(|l| l.datatype.as_ref()).map(ToString::to_string).as_deref(),
        Some("float")
    );
    assert_eq!(leaf.map(|l| l.role), Some(LeafRole::Sensor));
    Ok(())
}
