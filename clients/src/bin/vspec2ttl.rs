//! `vspec2ttl` — Converts a Vehicle Signal Specification tree to the VSS ontology.
//!
//! **Usage:**
//! ```text
//! vspec2ttl [-I <dir>]... [--format ttl|nt] [--registry <file>] [--report <file>]
//!           [--log-level <level>] <vspec_file> <ttl_file>
//! ```
//!
//! Exit status: 0 on success, 2 on invalid invocation, 255 if the vspec tree
//! cannot be loaded, 1 on any other failure. The output file is created
//! before the tree is loaded and stays empty if conversion fails.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use vsso_clients::{init_tracing, registry, search_path};
use vsso_ontology::{convert, Format};
use vsso_vspec::load_tree;

/// Convert a vspec tree to a VSSo graph.
#[derive(Parser)]
#[command(
    name = "vspec2ttl",
    about = "Convert a Vehicle Signal Specification tree to the VSS ontology (VSSo)"
)]
struct Args {
    /// Add a directory to the include search path (repeatable).
    #[arg(short = 'I', value_name = "DIR")]
    include_dirs: Vec<PathBuf>,

    /// Output format.
    #[arg(long, default_value = "ttl")]
    format: Format,

    /// TOML file with registry overrides (namespaces, datatypes, units).
    #[arg(long, value_name = "FILE")]
    registry: Option<PathBuf>,

    /// Also write the conversion diagnostics as JSON.
    #[arg(long, value_name = "FILE")]
    report: Option<PathBuf>,

    /// Logging level (trace, debug, info, warn, error).
    #[arg(long, default_value = "warn")]
    log_level: tracing::Level,

    /// Root vspec file.
    vspec_file: PathBuf,

    /// Output file.
    ttl_file: PathBuf,
}

/// A failed run, classified by exit status.
enum Failure {
    Load(anyhow::Error),
    Other(anyhow::Error),
}

impl From<anyhow::Error> for Failure {
    fn from(e: anyhow::Error) -> Self {
        Failure::Other(e)
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    if let Err(e) = init_tracing(args.log_level) {
        eprintln!("Error: {e:#}");
        return ExitCode::FAILURE;
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(Failure::Load(e)) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(255)
        }
        Err(Failure::Other(e)) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), Failure> {
    let registry = registry(args.registry.as_deref())?;

    let mut out = File::create(&args.ttl_file)
        .with_context(|| format!("Failed to create {}", args.ttl_file.display()))?;

    let tree = load_tree(&args.vspec_file, &search_path(&args.include_dirs))
        .with_context(|| format!("Failed to load {}", args.vspec_file.display()))
        .map_err(Failure::Load)?;

    let conversion = convert(&tree, &registry)
        .with_context(|| format!("Failed to convert {}", args.vspec_file.display()))?;

    let text = conversion.graph.serialize(args.format);
    writeln!(out, "{text}")
        .with_context(|| format!("Failed to write {}", args.ttl_file.display()))?;
    tracing::info!(
        path = %args.ttl_file.display(),
        format = %args.format,
        triples = conversion.graph.len(),
        "wrote ontology"
    );

    println!("{}", conversion.diagnostics);

    if let Some(path) = &args.report {
        let json = serde_json::to_string_pretty(&conversion.diagnostics)
            .context("Failed to serialize diagnostics")?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }

    Ok(())
}
