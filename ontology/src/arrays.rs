//! On-demand array datatypes.
//!
//! `uint8[]` becomes `vsso:unsignedByteArray`, declared once per run as an
//! `ArrayType` whose `baseDataType` is the element's XSD type.

use std::collections::BTreeMap;

use vsso_vspec::DataTypeTag;

use crate::error::MapError;
use crate::model::iris::RDF_TYPE;
use crate::model::{Graph, Term};
use crate::registry::Registry;
use crate::vocab::Concept;

/// Memoizes derived array datatypes, keyed by the original tag.
#[derive(Debug, Default)]
pub struct ArrayTypes {
    derived: BTreeMap<String, String>,
}

impl ArrayTypes {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the datatype IRI for an array tag, declaring it in `graph` on
    /// first use.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::UnknownArrayBase`] if the element type is not in the registry.
    pub fn derive(
        &mut self,
        tag: &DataTypeTag,
        registry: &Registry,
        graph: &mut Graph,
    ) -> Result<String, MapError> {
        let key = tag.to_string();
        if let Some(iri) = self.derived.get(&key) {
            return Ok(iri.clone());
        }

        let base = registry
            .datatype(tag.base())
            .ok_or_else(|| MapError::UnknownArrayBase {
                datatype: key.clone(),
            })?;
        let iri = registry.entity(&format!("{}Array", local_name(base)));
        graph.add(&iri, RDF_TYPE, Term::iri(registry.concept(Concept::ArrayType)));
        graph.add(&iri, registry.concept(Concept::BaseDataType), Term::iri(base));
        tracing::debug!(datatype = %key, iri = %iri, "derived array datatype");

        self.derived.insert(key, iri.clone());
        Ok(iri)
    }
}

/// The part of an IRI after its last `#`, or after its last `/` when it has no fragment.
fn local_name(iri: &str) -> &str {
    iri.rsplit_once('#')
        .or_else(|| iri.rsplit_once('/'))
        .map_or(iri, |(_, local)| local)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derivation_is_memoized() -> Result<(), MapError> {
        let registry = Registry::vss();
        let mut graph = Graph::new();
        let mut arrays = ArrayTypes::new();
        let tag = DataTypeTag::parse("uint8[]");

        let first = arrays.derive(&tag, &registry, &mut graph)?;
        assert_eq!(first, "https://github.com/w3c/vsso#unsignedByteArray");
        assert_eq!(graph.len(), 2);

        let second = arrays.derive(&tag, &registry, &mut graph)?;
        assert_eq!(first, second);
        assert_eq!(graph.len(), 2, "declaration must be emitted once");

        assert!(graph.contains(
            &first,
            &registry.concept(Concept::BaseDataType),
            &Term::iri("http://www.w3.org/2001/XMLSchema#unsignedByte")
        ));
        Ok(())
    }

    #[test]
    fn unknown_base_fails() {
        let registry = Registry::vss();
        let mut graph = Graph::new();
        let mut arrays = ArrayTypes::new();
        let result = arrays.derive(&DataTypeTag::parse("quaternion[]"), &registry, &mut graph);
        assert!(matches!(result, Err(MapError::UnknownArrayBase { .. })));
        assert!(graph.is_empty());
    }

    #[test]
    fn local_name_forms() {
        assert_eq!(local_name("http://www.w3.org/2001/XMLSchema#float"), "float");
        assert_eq!(local_name("https://example.org/types/half"), "half");
        assert_eq!(local_name("plain"), "plain");
    }
}
