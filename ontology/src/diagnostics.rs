//! Counters collected during a conversion.
//!
//! These have no influence on the graph; callers decide whether to print,
//! log or serialize them.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// One disambiguated node name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Renaming {
    /// Name as written in the tree.
    pub raw: String,
    /// Identifier used in the ontology.
    pub resolved: String,
    /// Dot-qualified path of the node.
    pub path: String,
}

/// Summary of a conversion run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Diagnostics {
    /// Occurrences of every raw node name in the tree.
    pub occurrences: BTreeMap<String, usize>,
    /// Signals and actuators per datatype tag (`none` when untyped).
    pub datatypes: BTreeMap<String, usize>,
    /// Leaves per unit.
    pub units: BTreeMap<String, usize>,
    /// Number of leaves carrying an enumeration.
    pub enumerated: usize,
    /// Names rewritten by disambiguation.
    pub renamings: Vec<Renaming>,
}

impl Diagnostics {
    /// Raw names that occur more than once.
    pub fn repeated_names(&self) -> impl Iterator<Item = (&str, usize)> {
        self.occurrences
            .iter()
            .filter(|(_, count)| **count > 1)
            .map(|(name, &count)| (name.as_str(), count))
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Names: {} distinct, {} repeated",
            self.occurrences.len(),
            self.repeated_names().count()
        )?;
        for (name, count) in self.repeated_names() {
            writeln!(f, "  {name:30} {count:>5}")?;
        }
        writeln!(f, "Datatypes (signals and actuators):")?;
        for (datatype, count) in &self.datatypes {
            writeln!(f, "  {datatype:30} {count:>5}")?;
        }
        writeln!(f, "Units:")?;
        for (unit, count) in &self.units {
            writeln!(f, "  {unit:30} {count:>5}")?;
        }
        writeln!(f, "Enumerated properties: {}", self.enumerated)?;
        write!(f, "Renamed nodes: {}", self.renamings.len())
    }
}
