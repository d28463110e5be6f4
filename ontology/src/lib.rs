//! Vehicle Signal Specification trees as a VSS ontology (VSSo) graph.
//!
//! The `vsso-ontology` crate turns a [`SchemaTree`](vsso_vspec::SchemaTree)
//! into an RDF graph: a fixed OWL schema ([`bootstrap`]) followed by one
//! resource per tree node ([`mapper`]). Graphs render to Turtle or N-Triples.
//!
//! # Entry Point
//!
//! ```
//! use vsso_ontology::{convert, Format, Registry};
//! use vsso_vspec::{Leaf, LeafRole, SchemaTree};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut tree = SchemaTree::new("Vehicle", "High-level vehicle data.");
//! let root = tree.root();
//! tree.add_leaf(
//!     root,
//!     "Speed",
//!     Leaf::new(LeafRole::Sensor).with_datatype("float").with_unit("km/h"),
//!     "Vehicle speed.",
//! )?;
//!
//! let conversion = convert(&tree, &Registry::vss())?;
//! let turtle = conversion.graph.serialize(Format::Turtle);
//! assert!(turtle.contains("vsso:Speed"));
//! assert!(turtle.contains("vsso:unit unit:kilometrePerHour"));
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

pub mod arrays;
pub mod bootstrap;
pub mod diagnostics;
pub mod error;
pub mod mapper;
pub mod model;
pub mod naming;
pub mod registry;
pub mod serializer;
pub mod vocab;

pub use diagnostics::{Diagnostics, Renaming};
pub use error::{ConfigError, MapError};
pub use mapper::{convert, map_tree, Conversion};
pub use model::{Graph, Term, Triple};
pub use registry::{Registry, RegistryConfig};
pub use serializer::{Format, UnknownFormat};
pub use vocab::Concept;
