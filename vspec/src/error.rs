//! Errors raised while loading or building a schema tree.

use std::path::PathBuf;

/// A structural problem in the vspec sources.
#[derive(Debug, thiserror::Error)]
pub enum VspecError {
    /// A source file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// File being read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A source file is not valid YAML.
    #[error("failed to parse {}: {source}", path.display())]
    Yaml {
        /// File being parsed.
        path: PathBuf,
        /// Underlying YAML error.
        source: serde_yaml::Error,
    },

    /// A YAML document does not have the expected shape.
    #[error("{}: {reason}", path.display())]
    Malformed {
        /// File being parsed.
        path: PathBuf,
        /// What is wrong with it.
        reason: String,
    },

    /// An `#include` line has no file argument.
    #[error("{}:{line}: malformed #include directive", path.display())]
    MalformedInclude {
        /// File containing the directive.
        path: PathBuf,
        /// One-based line number.
        line: usize,
    },

    /// An included file was not found in any search directory.
    #[error("include file {file} not found (searched: {searched})")]
    IncludeNotFound {
        /// File named by the directive.
        file: String,
        /// Directories that were searched, comma separated.
        searched: String,
    },

    /// A file includes itself, directly or transitively.
    #[error("cyclic include of {}", path.display())]
    CyclicInclude {
        /// File that closes the cycle.
        path: PathBuf,
    },

    /// A node has no `type` attribute.
    #[error("node {node} has no type")]
    MissingType {
        /// Qualified node name.
        node: String,
    },

    /// A node has a `type` other than branch, attribute, sensor or actuator.
    #[error("node {node} has unknown type '{value}'")]
    UnknownNodeType {
        /// Qualified node name.
        node: String,
        /// The offending value.
        value: String,
    },

    /// An attribute value has the wrong YAML shape.
    #[error("node {node}: invalid value for '{field}'")]
    InvalidField {
        /// Qualified node name.
        node: String,
        /// Attribute key.
        field: String,
    },

    /// A node is declared before (or without) its parent.
    #[error("node {node} has no parent branch {parent}")]
    MissingParent {
        /// Qualified node name.
        node: String,
        /// Qualified name of the missing parent.
        parent: String,
    },

    /// A node is placed under a leaf.
    #[error("node {node} is placed under a leaf")]
    ParentNotBranch {
        /// Qualified node name.
        node: String,
    },

    /// Two siblings share a name.
    #[error("node {node} is declared twice")]
    DuplicateNode {
        /// Qualified node name.
        node: String,
    },

    /// More than one top-level node, or none.
    #[error("expected exactly one root node, found {found}")]
    RootCount {
        /// Number of root nodes found.
        found: usize,
    },

    /// The root node is not a branch.
    #[error("root node {node} must be a branch")]
    RootNotBranch {
        /// Name of the root node.
        node: String,
    },
}
