//! The fixed VSSo schema every node-level fact depends on.
//!
//! [`bootstrap`] must run once, before any node is mapped, so that every
//! predicate and class the mapper uses is declared ahead of its first use.

use crate::model::iris::*;
use crate::model::{Class, Graph, Property, PropertyKind, Ref, Term};
use crate::registry::Registry;
use crate::vocab::Concept;

/// Emits the ontology header, properties and classes, and binds the prefixes
/// used for compact output.
pub fn bootstrap(graph: &mut Graph, registry: &Registry) {
    let ontology = registry.concept(Concept::Ontology);
    graph.add(&ontology, RDF_TYPE, Term::iri(OWL_ONTOLOGY));
    graph.add(&ontology, OWL_VERSION_INFO, Term::Plain(registry.version.clone()));
    graph.add(&ontology, RDFS_LABEL, Term::en(&registry.label));
    for import in &registry.imports {
        graph.add(&ontology, OWL_IMPORTS, Term::iri(import));
    }

    for prop in properties() {
        let id = registry.concept(prop.concept);
        let (kind, top) = match prop.kind {
            PropertyKind::Object => (OWL_OBJECT_PROPERTY, OWL_TOP_OBJECT_PROPERTY),
            PropertyKind::Datatype => (OWL_DATATYPE_PROPERTY, OWL_TOP_DATA_PROPERTY),
        };
        graph.add(&id, RDF_TYPE, Term::iri(kind));
        graph.add(&id, RDFS_SUBPROPERTY_OF, Term::iri(top));
        graph.add(&id, RDFS_LABEL, Term::en(prop.concept.local_name()));
        graph.add(&id, RDFS_DOMAIN, Term::iri(resolve(prop.domain, registry)));
        graph.add(&id, RDFS_RANGE, Term::iri(resolve(prop.range, registry)));
    }

    for class in classes() {
        let id = registry.concept(class.concept);
        graph.add(&id, RDF_TYPE, Term::iri(OWL_CLASS));
        if let Some(parent) = class.subclass_of {
            graph.add(&id, RDFS_SUBCLASS_OF, Term::iri(resolve(parent, registry)));
        }
        graph.add(&id, RDFS_LABEL, Term::en(class.concept.local_name()));
    }

    graph.bind("vsso", &registry.namespace);
    graph.bind("rdfs", RDFS);
    graph.bind("rdf", RDF);
    graph.bind("owl", OWL);
    graph.bind("skos", SKOS);
    graph.bind("schema", SCHEMA);
    graph.bind("xsd", XSD);
    graph.bind("unit", &registry.unit_namespace);
    graph.bind("cdt", &registry.cdt_namespace);
    tracing::debug!(triples = graph.len(), "bootstrapped ontology schema");
}

/// Resolves a domain/range/superclass reference to a full IRI.
#[must_use]
pub fn resolve(reference: Ref, registry: &Registry) -> String {
    match reference {
        Ref::Concept(concept) => registry.concept(concept),
        Ref::Iri(iri) => iri.to_owned(),
        Ref::Unit(local) => registry.unit_term(local),
    }
}

/// The properties declared by the bootstrap, in declaration order.
#[must_use]
pub fn properties() -> Vec<Property> {
    use Concept::*;

    let object = |concept, domain, range| Property {
        concept,
        kind: PropertyKind::Object,
        domain,
        range,
    };
    let datatype = |concept, domain, range| Property {
        concept,
        kind: PropertyKind::Datatype,
        domain: Ref::Concept(domain),
        range: Ref::Iri(range),
    };

    vec![
        object(BelongsTo, Ref::Concept(VehicleProperty), Ref::Concept(VehicleComponent)),
        object(Unit, Ref::Concept(NumericVehicleProperty), Ref::Unit("Unit")),
        object(DataType, Ref::Concept(NumericVehicleProperty), Ref::Iri(RDFS_DATATYPE)),
        object(BaseDataType, Ref::Concept(ArrayType), Ref::Iri(RDFS_DATATYPE)),
        object(
            HasEnumerationValue,
            Ref::Concept(EnumeratedVehicleProperty),
            Ref::Concept(EnumerationValue),
        ),
        object(
            HasDefaultEnumerationValue,
            Ref::Concept(EnumeratedVehicleProperty),
            Ref::Concept(EnumerationValue),
        ),
        object(
            PartOfComponent,
            Ref::Concept(VehicleComponent),
            Ref::Concept(VehicleComponent),
        ),
        datatype(PropertyName, VehicleProperty, XSD_STRING),
        datatype(ComponentName, VehicleComponent, XSD_STRING),
        datatype(Min, NumericVehicleProperty, XSD_DOUBLE),
        datatype(Max, NumericVehicleProperty, XSD_DOUBLE),
        datatype(Resolution, NumericVehicleProperty, XSD_DOUBLE),
        datatype(EnumerationName, EnumerationValue, XSD_STRING),
        datatype(EnumerationDescription, EnumerationValue, XSD_STRING),
    ]
}

/// The classes declared by the bootstrap, in declaration order.
#[must_use]
pub fn classes() -> Vec<Class> {
    use Concept::*;

    let class = |concept, subclass_of| Class {
        concept,
        subclass_of,
    };
    let property = Some(Ref::Concept(VehicleProperty));
    let dynamic = Some(Ref::Concept(DynamicVehicleProperty));

    vec![
        class(VehicleProperty, None),
        class(DynamicVehicleProperty, property),
        class(StaticVehicleProperty, property),
        class(NumericVehicleProperty, property),
        class(EnumeratedVehicleProperty, property),
        class(EnumerationValue, None),
        class(VehicleComponent, None),
        class(VehicleSignal, dynamic),
        class(VehicleActuator, dynamic),
        class(ArrayType, Some(Ref::Iri(RDFS_DATATYPE))),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bootstrapped() -> (Graph, Registry) {
        let registry = Registry::vss();
        let mut graph = Graph::new();
        bootstrap(&mut graph, &registry);
        (graph, registry)
    }

    #[test]
    fn declares_all_properties_and_classes() {
        assert_eq!(properties().len(), 14);
        assert_eq!(classes().len(), 10);

        let (graph, registry) = bootstrapped();
        for prop in properties() {
            let id = registry.concept(prop.concept);
            assert_eq!(graph.objects(&id, RDFS_DOMAIN).count(), 1, "{id} domain");
            assert_eq!(graph.objects(&id, RDFS_RANGE).count(), 1, "{id} range");
            assert_eq!(graph.objects(&id, RDFS_SUBPROPERTY_OF).count(), 1, "{id} super");
        }
        for class in classes() {
            let id = registry.concept(class.concept);
            assert!(graph.contains(&id, RDF_TYPE, &Term::iri(OWL_CLASS)), "{id}");
        }
    }

    #[test]
    fn property_kinds_pick_top_property() {
        let (graph, registry) = bootstrapped();
        let belongs_to = registry.concept(Concept::BelongsTo);
        assert!(graph.contains(&belongs_to, RDF_TYPE, &Term::iri(OWL_OBJECT_PROPERTY)));
        assert!(graph.contains(
            &belongs_to,
            RDFS_SUBPROPERTY_OF,
            &Term::iri(OWL_TOP_OBJECT_PROPERTY)
        ));

        let min = registry.concept(Concept::Min);
        assert!(graph.contains(&min, RDF_TYPE, &Term::iri(OWL_DATATYPE_PROPERTY)));
        assert!(graph.contains(&min, RDFS_RANGE, &Term::iri(XSD_DOUBLE)));
    }

    #[test]
    fn signal_hierarchy() {
        let (graph, registry) = bootstrapped();
        let dynamic = Term::iri(registry.concept(Concept::DynamicVehicleProperty));
        for concept in [Concept::VehicleSignal, Concept::VehicleActuator] {
            assert!(graph.contains(&registry.concept(concept), RDFS_SUBCLASS_OF, &dynamic));
        }
        assert!(graph.contains(
            &registry.concept(Concept::ArrayType),
            RDFS_SUBCLASS_OF,
            &Term::iri(RDFS_DATATYPE)
        ));
        assert!(graph.contains(
            &registry.concept(Concept::Unit),
            RDFS_RANGE,
            &Term::iri("http://purl.oclc.org/NET/ssnx/qu/unit#Unit")
        ));
    }

    #[test]
    fn header_and_prefixes() {
        let (graph, registry) = bootstrapped();
        let ontology = registry.concept(Concept::Ontology);
        assert!(graph.contains(&ontology, RDF_TYPE, &Term::iri(OWL_ONTOLOGY)));
        assert!(graph.contains(&ontology, OWL_VERSION_INFO, &Term::Plain("1.0.0".into())));
        assert!(graph.contains(&ontology, OWL_IMPORTS, &Term::iri(crate::registry::QU_REC20)));

        let prefixes: Vec<&str> = graph.prefixes().iter().map(|(p, _)| p.as_str()).collect();
        assert_eq!(
            prefixes,
            ["vsso", "rdfs", "rdf", "owl", "skos", "schema", "xsd", "unit", "cdt"]
        );
    }
}
