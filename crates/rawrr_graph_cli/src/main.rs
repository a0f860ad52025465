//! rawrr2graph command-line entry point.
//!
//! # Responsibility
//! - Read one RAWRR report file and print the GraphCommons document.
//! - Keep stdout reserved for the document; diagnostics go to stderr.
//! - A failed run writes exactly one `error:` line to stderr.

use anyhow::{Context, Result};
use clap::Parser;
use rawrr_graph_core::{convert_report, init_logging, render_document, GraphConfig};
use std::path::PathBuf;
use std::process::ExitCode;

/// Core failures are logged below this level and reported once by `main`.
const LOG_LEVEL: &str = "error";

/// Convert a RAWRR JSON report into a GraphCommons import document.
#[derive(Debug, Parser)]
#[command(name = "rawrr2graph", version)]
struct Cli {
    /// Path to the RAWRR JSON report.
    report: PathBuf,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(err) = init_logging(LOG_LEVEL, None) {
        eprintln!("warning: logging disabled: {err}");
    }

    match run(&cli) {
        Ok(document) => {
            println!("{document}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<String> {
    let input = std::fs::read_to_string(&cli.report)
        .with_context(|| format!("failed to read report `{}`", cli.report.display()))?;
    let document = convert_report(&input, &GraphConfig::default())
        .with_context(|| format!("failed to convert report `{}`", cli.report.display()))?;
    Ok(render_document(&document)?)
}
