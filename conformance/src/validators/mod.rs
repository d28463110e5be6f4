//! Validator modules, grouped by the artifact they inspect.

pub mod ontology;
