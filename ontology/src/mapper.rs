//! Tree-to-graph mapping.
//!
//! Walks the schema tree in pre-order and emits, per node, its labels, its
//! place in the component hierarchy and, for leaves, datatype, unit, range
//! and enumeration facts. Every predicate and class used here is declared by
//! [`bootstrap`](crate::bootstrap::bootstrap), which [`convert`] runs first.

use std::collections::BTreeMap;

use vsso_vspec::{Leaf, LeafRole, NodeBody, NodeId, SchemaTree};

use crate::arrays::ArrayTypes;
use crate::bootstrap::bootstrap;
use crate::diagnostics::Diagnostics;
use crate::error::MapError;
use crate::model::iris::*;
use crate::model::{Graph, Term};
use crate::naming::NameResolver;
use crate::registry::Registry;
use crate::vocab::Concept;

/// The result of a conversion: the full graph and its diagnostics.
#[derive(Debug, Clone)]
pub struct Conversion {
    /// Bootstrap schema plus all node-level facts.
    pub graph: Graph,
    /// Counters collected while mapping.
    pub diagnostics: Diagnostics,
}

/// Builds the complete ontology graph for `tree`.
///
/// # Errors
///
/// Returns a [`MapError`] if a node references a datatype or unit that the
/// registry does not know, or if a leaf has no parent.
pub fn convert(tree: &SchemaTree, registry: &Registry) -> Result<Conversion, MapError> {
    let mut graph = Graph::new();
    bootstrap(&mut graph, registry);
    let diagnostics = map_tree(tree, registry, &mut graph)?;
    tracing::info!(
        nodes = tree.len(),
        triples = graph.len(),
        renamed = diagnostics.renamings.len(),
        "converted schema tree"
    );
    Ok(Conversion { graph, diagnostics })
}

/// Emits the node-level facts for `tree` into an already bootstrapped graph.
///
/// # Errors
///
/// See [`convert`].
pub fn map_tree(
    tree: &SchemaTree,
    registry: &Registry,
    graph: &mut Graph,
) -> Result<Diagnostics, MapError> {
    let mut mapper = Mapper {
        tree,
        registry,
        graph,
        names: NameResolver::new(tree, registry),
        arrays: ArrayTypes::new(),
        datatypes: BTreeMap::new(),
        units: BTreeMap::new(),
        enumerated: 0,
    };
    for id in tree.pre_order() {
        mapper.map_node(id)?;
    }

    let Mapper {
        names,
        datatypes,
        units,
        enumerated,
        ..
    } = mapper;
    let (occurrences, renamings) = names.into_parts();
    Ok(Diagnostics {
        occurrences,
        datatypes,
        units,
        enumerated,
        renamings,
    })
}

/// Keeps only alphanumeric characters and underscores.
#[must_use]
pub fn sanitize_label(label: &str) -> String {
    label
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_')
        .collect()
}

struct Mapper<'a> {
    tree: &'a SchemaTree,
    registry: &'a Registry,
    graph: &'a mut Graph,
    names: NameResolver<'a>,
    arrays: ArrayTypes,
    datatypes: BTreeMap<String, usize>,
    units: BTreeMap<String, usize>,
    enumerated: usize,
}

impl Mapper<'_> {
    fn concept(&self, concept: Concept) -> String {
        self.registry.concept(concept)
    }

    fn map_node(&mut self, id: NodeId) -> Result<(), MapError> {
        let tree = self.tree;
        let node = tree.node(id);
        let name = self.names.resolve(id);
        let subject = self.registry.entity(&name);

        self.graph.add(&subject, RDFS_LABEL, Term::en(&name));
        self.graph
            .add(&subject, SKOS_ALT_LABEL, Term::en(tree.qualified_name(id, ".")));
        self.graph
            .add(&subject, RDFS_COMMENT, Term::en(&node.description));

        let parent = node
            .parent
            .map(|parent| self.registry.entity(&self.names.resolve(parent)));

        match &node.body {
            NodeBody::Branch => {
                let component = self.concept(Concept::VehicleComponent);
                let component_name = self.concept(Concept::ComponentName);
                self.graph.add(&subject, RDF_TYPE, Term::iri(component));
                self.graph.add(&subject, component_name, Term::en(&name));
                if let Some(parent) = parent {
                    let part_of = self.concept(Concept::PartOfComponent);
                    self.graph.add(&subject, part_of, Term::iri(parent));
                }
            }
            NodeBody::Leaf(leaf) => {
                let parent = parent.ok_or_else(|| MapError::Orphan {
                    node: tree.qualified_name(id, "."),
                })?;
                self.map_leaf(id, &subject, &name, &parent, leaf)?;
            }
        }
        Ok(())
    }

    fn map_leaf(
        &mut self,
        id: NodeId,
        subject: &str,
        name: &str,
        parent: &str,
        leaf: &Leaf,
    ) -> Result<(), MapError> {
        let tree = self.tree;
        let node = tree.node(id);
        let belongs_to = self.concept(Concept::BelongsTo);
        let property_name = self.concept(Concept::PropertyName);
        self.graph.add(subject, belongs_to, Term::iri(parent));
        self.graph.add(subject, property_name, Term::en(name));

        if let Some(tag) = &leaf.datatype {
            let datatype = if tag.is_array() {
                self.arrays.derive(tag, self.registry, self.graph)?
            } else {
                self.registry
                    .datatype(tag.base())
                    .ok_or_else(|| MapError::UnknownDataType {
                        node: tree.qualified_name(id, "."),
                        datatype: tag.to_string(),
                    })?
                    .to_owned()
            };
            let data_type = self.concept(Concept::DataType);
            self.graph.add(subject, data_type, Term::iri(datatype));
        }

        if let Some(unit) = &leaf.unit {
            let unit_iri = self
                .registry
                .unit(unit)
                .ok_or_else(|| MapError::UnknownUnit {
                    node: tree.qualified_name(id, "."),
                    unit: unit.clone(),
                })?
                .to_owned();
            let unit_property = self.concept(Concept::Unit);
            let numeric = self.concept(Concept::NumericVehicleProperty);
            self.graph.add(subject, unit_property, Term::iri(unit_iri));
            self.graph.add(subject, RDF_TYPE, Term::iri(numeric));
            *self.units.entry(unit.clone()).or_insert(0) += 1;
        }

        if let Some(labels) = &leaf.allowed {
            self.map_enumeration(subject, &node.name, labels, leaf.default.as_deref());
        }

        for (bound, concept) in [(&leaf.min, Concept::Min), (&leaf.max, Concept::Max)] {
            if let Some(value) = bound.as_deref().filter(|v| !v.is_empty()) {
                let predicate = self.concept(concept);
                self.graph.add(subject, predicate, Term::typed(value, XSD_INT));
            }
        }

        if leaf.role == LeafRole::Attribute {
            let static_property = self.concept(Concept::StaticVehicleProperty);
            self.graph.add(subject, RDF_TYPE, Term::iri(static_property));
            // Attributes keep their short name as label even when disambiguated.
            self.graph.add(subject, RDFS_LABEL, Term::en(&node.name));
        } else {
            let key = leaf
                .datatype
                .as_ref()
                .map_or_else(|| "none".to_owned(), ToString::to_string);
            *self.datatypes.entry(key).or_insert(0) += 1;

            let signal = self.concept(Concept::VehicleSignal);
            self.graph.add(subject, RDF_TYPE, Term::iri(signal));
            if leaf.role == LeafRole::Actuator {
                let actuator = self.concept(Concept::VehicleActuator);
                self.graph.add(subject, RDF_TYPE, Term::iri(actuator));
            }
        }

        if leaf.allowed.as_ref().is_some_and(|labels| !labels.is_empty()) {
            self.enumerated += 1;
        }
        Ok(())
    }

    /// Declares one `EnumerationValue` per label, named `<raw name>_<label>`.
    fn map_enumeration(
        &mut self,
        subject: &str,
        raw_name: &str,
        labels: &[String],
        default: Option<&str>,
    ) {
        let enumerated = self.concept(Concept::EnumeratedVehicleProperty);
        let value_class = self.concept(Concept::EnumerationValue);
        let enumeration_name = self.concept(Concept::EnumerationName);
        let has_value = self.concept(Concept::HasEnumerationValue);
        let has_default = self.concept(Concept::HasDefaultEnumerationValue);

        self.graph.add(subject, RDF_TYPE, Term::iri(enumerated));
        for label in labels {
            let item = self
                .registry
                .entity(&format!("{raw_name}_{}", sanitize_label(label)));
            self.graph.add(&item, RDF_TYPE, Term::iri(&value_class));
            self.graph.add(&item, RDFS_LABEL, Term::en(label));
            self.graph.add(&item, &enumeration_name, Term::en(label));
            self.graph.add(subject, &has_value, Term::iri(&item));
            if default == Some(label.as_str()) {
                self.graph.add(subject, &has_default, Term::iri(&item));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use vsso_vspec::VspecError;

    use super::*;

    const VSSO: &str = "https://github.com/w3c/vsso#";

    fn vsso(local: &str) -> String {
        format!("{VSSO}{local}")
    }

    fn has_type(graph: &Graph, subject: &str, class: &str) -> bool {
        graph.contains(&vsso(subject), RDF_TYPE, &Term::iri(vsso(class)))
    }

    fn map(tree: &SchemaTree) -> Result<Conversion, MapError> {
        convert(tree, &Registry::vss())
    }

    /// Vehicle → Cabin → IsOpen (boolean sensor)
    fn cabin_tree() -> Result<SchemaTree, VspecError> {
        let mut tree = SchemaTree::new("Vehicle", "High-level vehicle data.");
        let root = tree.root();
        let cabin = tree.add_branch(root, "Cabin", "All in-cabin components.")?;
        tree.add_leaf(
            cabin,
            "IsOpen",
            Leaf::new(LeafRole::Sensor).with_datatype("boolean"),
            "Is door open.",
        )?;
        Ok(tree)
    }

    #[test]
    fn two_level_tree() -> Result<(), Box<dyn std::error::Error>> {
        let conversion = map(&cabin_tree()?)?;
        let graph = &conversion.graph;

        assert!(has_type(graph, "VehicleEntity", "VehicleComponent"));
        assert!(has_type(graph, "Cabin", "VehicleComponent"));
        assert!(graph.contains(
            &vsso("Cabin"),
            &vsso("partOfComponent"),
            &Term::iri(vsso("VehicleEntity"))
        ));
        assert_eq!(graph.objects(&vsso("VehicleEntity"), &vsso("partOfComponent")).count(), 0);

        let is_open = vsso("IsOpen");
        assert!(has_type(graph, "IsOpen", "VehicleSignal"));
        assert!(graph.contains(&is_open, &vsso("belongsTo"), &Term::iri(vsso("Cabin"))));
        assert!(graph.contains(
            &is_open,
            &vsso("dataType"),
            &Term::iri("http://www.w3.org/2001/XMLSchema#boolean")
        ));
        assert!(graph.contains(&is_open, SKOS_ALT_LABEL, &Term::en("Vehicle.Cabin.IsOpen")));
        assert!(graph.contains(&is_open, RDFS_COMMENT, &Term::en("Is door open.")));
        for absent in ["unit", "min", "max", "hasEnumerationValue"] {
            assert_eq!(graph.objects(&is_open, &vsso(absent)).count(), 0, "{absent}");
        }
        assert!(!has_type(graph, "IsOpen", "StaticVehicleProperty"));
        assert!(!has_type(graph, "IsOpen", "VehicleActuator"));

        assert_eq!(conversion.diagnostics.datatypes.get("boolean"), Some(&1));
        assert!(conversion.diagnostics.renamings.is_empty());
        Ok(())
    }

    #[test]
    fn numeric_leaf_with_range() -> Result<(), Box<dyn std::error::Error>> {
        let mut tree = SchemaTree::new("Vehicle", "");
        let root = tree.root();
        tree.add_leaf(
            root,
            "Speed",
            Leaf::new(LeafRole::Sensor)
                .with_datatype("float")
                .with_unit("km/h")
                .with_range("0", "300"),
            "Vehicle speed.",
        )?;
        let conversion = map(&tree)?;
        let graph = &conversion.graph;
        let speed = vsso("Speed");

        assert!(has_type(graph, "Speed", "NumericVehicleProperty"));
        assert!(graph.contains(
            &speed,
            &vsso("unit"),
            &Term::iri("http://purl.oclc.org/NET/ssnx/qu/unit#kilometrePerHour")
        ));
        assert!(graph.contains(&speed, &vsso("min"), &Term::typed("0", XSD_INT)));
        assert!(graph.contains(&speed, &vsso("max"), &Term::typed("300", XSD_INT)));
        assert_eq!(conversion.diagnostics.units.get("km/h"), Some(&1));
        Ok(())
    }

    #[test]
    fn empty_bounds_are_skipped() -> Result<(), Box<dyn std::error::Error>> {
        let mut tree = SchemaTree::new("Vehicle", "");
        let root = tree.root();
        tree.add_leaf(
            root,
            "Level",
            Leaf::new(LeafRole::Sensor).with_datatype("uint8").with_range("", "100"),
            "",
        )?;
        let graph = map(&tree)?.graph;
        assert_eq!(graph.objects(&vsso("Level"), &vsso("min")).count(), 0);
        assert_eq!(graph.objects(&vsso("Level"), &vsso("max")).count(), 1);
        Ok(())
    }

    #[test]
    fn enumeration_values() -> Result<(), Box<dyn std::error::Error>> {
        let mut tree = SchemaTree::new("Vehicle", "");
        let root = tree.root();
        let door = tree.add_branch(root, "Door", "")?;
        tree.add_leaf(
            door,
            "DoorStatus",
            Leaf::new(LeafRole::Sensor)
                .with_datatype("string")
                .with_allowed(["Open/Close", "LOCKED"])
                .with_default("LOCKED"),
            "",
        )?;
        let conversion = map(&tree)?;
        let graph = &conversion.graph;
        let status = vsso("DoorStatus");
        let open_close = vsso("DoorStatus_OpenClose");

        assert!(has_type(graph, "DoorStatus", "EnumeratedVehicleProperty"));
        assert!(has_type(graph, "DoorStatus_OpenClose", "EnumerationValue"));
        assert!(graph.contains(&open_close, RDFS_LABEL, &Term::en("Open/Close")));
        assert!(graph.contains(&open_close, &vsso("enumerationName"), &Term::en("Open/Close")));
        let values: Vec<&Term> = graph.objects(&status, &vsso("hasEnumerationValue")).collect();
        assert_eq!(
            values,
            [&Term::iri(&open_close), &Term::iri(vsso("DoorStatus_LOCKED"))]
        );
        assert!(graph.contains(
            &status,
            &vsso("hasDefaultEnumerationValue"),
            &Term::iri(vsso("DoorStatus_LOCKED"))
        ));
        assert_eq!(conversion.diagnostics.enumerated, 1);
        Ok(())
    }

    #[test]
    fn attribute_keeps_raw_label() -> Result<(), Box<dyn std::error::Error>> {
        let mut tree = SchemaTree::new("Vehicle", "");
        let root = tree.root();
        for side in ["Front", "Rear"] {
            let axle = tree.add_branch(root, side, "")?;
            tree.add_leaf(
                axle,
                "TireCount",
                Leaf::new(LeafRole::Attribute).with_datatype("uint8"),
                "",
            )?;
        }
        let conversion = map(&tree)?;
        let graph = &conversion.graph;
        let front = vsso("FrontTireCount");

        assert!(has_type(graph, "FrontTireCount", "StaticVehicleProperty"));
        assert!(!has_type(graph, "FrontTireCount", "VehicleSignal"));
        assert!(!has_type(graph, "FrontTireCount", "VehicleActuator"));
        assert!(graph.contains(&front, RDFS_LABEL, &Term::en("FrontTireCount")));
        assert!(graph.contains(&front, RDFS_LABEL, &Term::en("TireCount")));
        assert!(graph.contains(&front, &vsso("propertyName"), &Term::en("FrontTireCount")));
        // Attributes are not counted per datatype.
        assert!(conversion.diagnostics.datatypes.is_empty());
        assert_eq!(conversion.diagnostics.renamings.len(), 2);
        Ok(())
    }

    #[test]
    fn actuator_is_also_a_signal() -> Result<(), Box<dyn std::error::Error>> {
        let mut tree = SchemaTree::new("Vehicle", "");
        let root = tree.root();
        tree.add_leaf(root, "Horn", Leaf::new(LeafRole::Actuator), "")?;
        let conversion = map(&tree)?;
        assert!(has_type(&conversion.graph, "Horn", "VehicleSignal"));
        assert!(has_type(&conversion.graph, "Horn", "VehicleActuator"));
        assert_eq!(conversion.graph.objects(&vsso("Horn"), &vsso("dataType")).count(), 0);
        assert_eq!(conversion.diagnostics.datatypes.get("none"), Some(&1));
        Ok(())
    }

    #[test]
    fn array_datatype_is_declared_once() -> Result<(), Box<dyn std::error::Error>> {
        let mut tree = SchemaTree::new("Vehicle", "");
        let root = tree.root();
        for name in ["A", "B"] {
            tree.add_leaf(root, name, Leaf::new(LeafRole::Sensor).with_datatype("uint8[]"), "")?;
        }
        let conversion = map(&tree)?;
        let graph = &conversion.graph;
        let array = Term::iri(vsso("unsignedByteArray"));

        assert_eq!(graph.subjects(&vsso("dataType"), &array).count(), 2);
        assert_eq!(graph.objects(&vsso("unsignedByteArray"), &vsso("baseDataType")).count(), 1);
        assert_eq!(conversion.diagnostics.datatypes.get("uint8[]"), Some(&2));
        Ok(())
    }

    #[test]
    fn leaf_root_is_rejected() {
        let leaf = Leaf::new(LeafRole::Sensor).with_datatype("float");
        let tree = SchemaTree::with_root("Vehicle", "", NodeBody::Leaf(leaf));
        let result = map(&tree);
        assert!(
            matches!(&result, Err(MapError::Orphan { node }) if node == "Vehicle"),
            "{result:?}"
        );
    }

    #[test]
    fn unknown_references_fail() -> Result<(), VspecError> {
        let mut tree = SchemaTree::new("Vehicle", "");
        let root = tree.root();
        tree.add_leaf(root, "X", Leaf::new(LeafRole::Sensor).with_datatype("quaternion"), "")?;
        assert!(matches!(map(&tree), Err(MapError::UnknownDataType { .. })));

        let mut tree = SchemaTree::new("Vehicle", "");
        let root = tree.root();
        tree.add_leaf(root, "Y", Leaf::new(LeafRole::Sensor).with_unit("furlong"), "")?;
        assert!(matches!(map(&tree), Err(MapError::UnknownUnit { .. })));

        let mut tree = SchemaTree::new("Vehicle", "");
        let root = tree.root();
        tree.add_leaf(root, "Z", Leaf::new(LeafRole::Sensor).with_datatype("quaternion[]"), "")?;
        assert!(matches!(map(&tree), Err(MapError::UnknownArrayBase { .. })));
        Ok(())
    }

    #[test]
    fn sanitize_strips_non_word_characters() {
        assert_eq!(sanitize_label("Open/Close"), "OpenClose");
        assert_eq!(sanitize_label("LEVEL_1 (low)"), "LEVEL_1low");
        assert_eq!(sanitize_label("-"), "");
        assert_eq!(sanitize_label("Überhitzt!"), "Überhitzt");
    }
}
