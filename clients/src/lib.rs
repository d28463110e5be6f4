//! Shared plumbing for the command-line clients.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use vsso_ontology::Registry;

/// Installs a stderr `fmt` subscriber filtered at `level`.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_tracing(level: tracing::Level) -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("failed to initialize logging: {e}"))
}

/// Include search path: the current directory first, then `include_dirs` in order.
#[must_use]
pub fn search_path(include_dirs: &[PathBuf]) -> Vec<PathBuf> {
    std::iter::once(PathBuf::from("."))
        .chain(include_dirs.iter().cloned())
        .collect()
}

/// The built-in registry, or the built-in registry with overrides from `path`.
///
/// # Errors
///
/// Returns an error if the overrides file cannot be read or parsed.
pub fn registry(path: Option<&Path>) -> Result<Registry> {
    match path {
        Some(path) => Registry::load(path)
            .with_context(|| format!("Failed to load registry overrides {}", path.display())),
        None => Ok(Registry::vss()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_directory_is_searched_first() {
        let dirs = search_path(&[PathBuf::from("spec"), PathBuf::from("overlays")]);
        assert_eq!(
            dirs,
            [PathBuf::from("."), PathBuf::from("spec"), PathBuf::from("overlays")]
        );
    }

    #[test]
    fn missing_overrides_file_is_an_error() {
        let result = registry(Some(Path::new("does/not/exist.toml")));
        assert!(result.is_err());
        assert!(registry(None).is_ok());
    }
}
