//! Validators over a generated ontology graph (declarations, structure, RDF).

pub mod declarations;
pub mod rdf;
pub mod structure;
