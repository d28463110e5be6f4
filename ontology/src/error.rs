//! Error types for mapping and registry configuration.

use std::path::PathBuf;

/// A node references something the registry cannot resolve.
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    /// The node's primitive type has no registry entry.
    #[error("node {node} has unknown datatype '{datatype}'")]
    UnknownDataType {
        /// Qualified node name.
        node: String,
        /// The datatype tag.
        datatype: String,
    },

    /// The base type of an array tag has no registry entry.
    #[error("array datatype '{datatype}' has no known base type")]
    UnknownArrayBase {
        /// The array datatype tag.
        datatype: String,
    },

    /// The node's unit has no registry entry.
    #[error("node {node} has unknown unit '{unit}'")]
    UnknownUnit {
        /// Qualified node name.
        node: String,
        /// The unit name.
        unit: String,
    },

    /// A leaf node has no parent component.
    #[error("leaf node {node} has no parent component")]
    Orphan {
        /// Qualified node name.
        node: String,
    },
}

/// A registry overrides file could not be used.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// File being read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The file is not a valid overrides document.
    #[error("invalid registry overrides: {0}")]
    Toml(#[from] toml::de::Error),
}
