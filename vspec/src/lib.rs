//! Vehicle Signal Specification (VSS) tree model and vspec loader.
//!
//! A vspec file describes a tree of vehicle components (branches) and their
//! attributes, sensors and actuators. This crate loads such files, resolving
//! `#include` directives, into an arena-backed [`SchemaTree`].
//!
//! # Entry Point
//!
//! ```no_run
//! use std::path::{Path, PathBuf};
//!
//! let root = Path::new("spec/VehicleSignalSpecification.vspec");
//! let tree = vsso_vspec::load_tree(root, &[PathBuf::from(".")])?;
//! for id in tree.pre_order() {
//!     println!("{}", tree.qualified_name(id, "."));
//! }
//! # Ok::<(), vsso_vspec::VspecError>(())
//! ```
//!
//! # Building trees by hand
//!
//! ```
//! use vsso_vspec::{Leaf, LeafRole, SchemaTree};
//!
//! let mut tree = SchemaTree::new("Vehicle", "High-level vehicle data.");
//! let cabin = tree.add_branch(tree.root(), "Cabin", "All in-cabin components")?;
//! let leaf = Leaf::new(LeafRole::Sensor).with_datatype("boolean");
//! tree.add_leaf(cabin, "IsOpen", leaf, "Is the door open")?;
//! assert_eq!(tree.len(), 3);
//! # Ok::<(), vsso_vspec::VspecError>(())
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod error;
pub mod loader;
pub mod tree;

pub use error::VspecError;
pub use loader::load_tree;
pub use tree::{DataTypeTag, Leaf, LeafRole, NodeBody, NodeId, SchemaNode, SchemaTree};
