//! `vsso-conformance` — Converts a vspec tree in memory and validates the result.
//!
//! Runs the conformance suite on the generated graph:
//! - Declarations (schema completeness, declared-before-use)
//! - Structure (component hierarchy, property attachment, signal kinds)
//! - RDF 1.1 / Turtle 1.1 / N-Triples parse-back
//!
//! **Usage:**
//! ```text
//! vsso-conformance [-I <dir>]... [--registry <file>] [--json] <vspec_file>
//! ```
//!
//! Exits non-zero if any conformance check fails.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use vsso_clients::{init_tracing, registry, search_path};
use vsso_conformance::run_all;
use vsso_ontology::convert;
use vsso_vspec::load_tree;

/// Run the VSSo conformance suite.
#[derive(Parser)]
#[command(
    name = "vsso-conformance",
    about = "Validate the VSS ontology generated from a vspec tree"
)]
struct Args {
    /// Add a directory to the include search path (repeatable).
    #[arg(short = 'I', value_name = "DIR")]
    include_dirs: Vec<PathBuf>,

    /// TOML file with registry overrides (namespaces, datatypes, units).
    #[arg(long, value_name = "FILE")]
    registry: Option<PathBuf>,

    /// Print the report as JSON instead of text.
    #[arg(long)]
    json: bool,

    /// Logging level (trace, debug, info, warn, error).
    #[arg(long, default_value = "error")]
    log_level: tracing::Level,

    /// Root vspec file.
    vspec_file: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.log_level)?;

    let registry = registry(args.registry.as_deref())?;
    let tree = load_tree(&args.vspec_file, &search_path(&args.include_dirs))
        .with_context(|| format!("Failed to load {}", args.vspec_file.display()))?;
    let conversion = convert(&tree, &registry)
        .with_context(|| format!("Failed to convert {}", args.vspec_file.display()))?;

    let report = run_all(&conversion, &registry)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("VSSo Conformance Report");
        println!("=======================");
        println!();
        println!("{report}");
    }

    let failed = report.failure_count();
    if failed > 0 {
        eprintln!("Conformance FAILED: {failed} check(s) did not pass.");
        process::exit(1);
    }

    if !args.json {
        println!("Conformance PASSED.");
    }
    Ok(())
}
