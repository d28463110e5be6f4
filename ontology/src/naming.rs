//! Globally unique ontology identifiers for tree nodes.
//!
//! Node names are only unique among siblings. A name that occurs more than
//! once anywhere in the tree is prefixed with its parent's resolved name,
//! unless the parent is the root. The occurrence count is global, so a name
//! can be rewritten even when its duplicates live in unrelated branches; a
//! prefixed name that still collides is not rewritten further.

use std::collections::{BTreeMap, HashMap};

use vsso_vspec::{NodeId, SchemaTree};

use crate::diagnostics::Renaming;
use crate::registry::Registry;

/// Resolves and memoizes node identifiers.
pub struct NameResolver<'a> {
    tree: &'a SchemaTree,
    registry: &'a Registry,
    occurrences: BTreeMap<String, usize>,
    cache: HashMap<NodeId, String>,
    renamings: Vec<Renaming>,
}

impl<'a> NameResolver<'a> {
    /// Counts name occurrences over the whole tree.
    #[must_use]
    pub fn new(tree: &'a SchemaTree, registry: &'a Registry) -> Self {
        let mut occurrences = BTreeMap::new();
        for id in tree.pre_order() {
            *occurrences.entry(tree.node(id).name.clone()).or_insert(0) += 1;
        }
        Self {
            tree,
            registry,
            occurrences,
            cache: HashMap::new(),
            renamings: Vec::new(),
        }
    }

    /// How often each raw name occurs in the tree.
    #[must_use]
    pub fn occurrences(&self) -> &BTreeMap<String, usize> {
        &self.occurrences
    }

    /// Disambiguations performed so far, in resolution order.
    #[must_use]
    pub fn renamings(&self) -> &[Renaming] {
        &self.renamings
    }

    /// Consumes the resolver, returning the occurrence table and renamings.
    #[must_use]
    pub fn into_parts(self) -> (BTreeMap<String, usize>, Vec<Renaming>) {
        (self.occurrences, self.renamings)
    }

    /// Returns the identifier of `id`, resolving ancestors first when needed.
    /// Repeated calls return the cached value.
    pub fn resolve(&mut self, id: NodeId) -> String {
        if let Some(name) = self.cache.get(&id) {
            return name.clone();
        }

        let tree = self.tree;
        let node = tree.node(id);
        let repeated = self.occurrences.get(&node.name).copied().unwrap_or(0) > 1;

        let resolved = match node.parent {
            None if node.name == self.registry.root_name => self.registry.root_entity.clone(),
            Some(parent) if repeated && tree.parent(parent).is_some() => {
                let resolved = format!("{}{}", self.resolve(parent), node.name);
                let path = tree.qualified_name(id, ".");
                tracing::warn!(
                    raw = %node.name,
                    resolved = %resolved,
                    path = %path,
                    "replacing repeated node name"
                );
                self.renamings.push(Renaming {
                    raw: node.name.clone(),
                    resolved: resolved.clone(),
                    path,
                });
                resolved
            }
            _ => node.name.clone(),
        };

        self.cache.insert(id, resolved.clone());
        resolved
    }
}
