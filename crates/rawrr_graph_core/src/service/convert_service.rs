//! Report conversion use case.
//!
//! # Responsibility
//! - Run the full report-to-graph pipeline for one input document.
//! - Emit `convert` logging events with phase counts and duration.
//!
//! # Invariants
//! - Any failure aborts the whole conversion; no partial document escapes.
//! - Config is validated before input is read.

use crate::config::{ConfigValidationError, GraphConfig};
use crate::input::{parse_report, InputError};
use crate::model::graph::GraphDocument;
use crate::model::report::Report;
use crate::pipeline::assemble::{assemble_document, GraphMetadata};
use crate::pipeline::catalog::SectionCatalog;
use crate::pipeline::index::index_report;
use crate::pipeline::resolve::{resolve_edges, ResolveError};
use log::{debug, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

pub type ConvertResult<T> = Result<T, ConvertError>;

/// Conversion error covering every pipeline phase.
///
/// `Display` names only the phase; the cause is reachable through `source()`.
#[derive(Debug)]
pub enum ConvertError {
    Config(ConfigValidationError),
    Input(InputError),
    Resolve(ResolveError),
    Encode(serde_json::Error),
}

impl ConvertError {
    /// Stable short code used in log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Config(_) => "invalid_config",
            Self::Input(_) => "malformed_input",
            Self::Resolve(_) => "unresolved_reference",
            Self::Encode(_) => "encode_failed",
        }
    }
}

impl Display for ConvertError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(_) => write!(f, "invalid config"),
            Self::Input(_) => write!(f, "malformed report"),
            Self::Resolve(_) => write!(f, "unresolved reference"),
            Self::Encode(_) => write!(f, "failed to encode graph document"),
        }
    }
}

impl Error for ConvertError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Input(err) => Some(err),
            Self::Resolve(err) => Some(err),
            Self::Encode(err) => Some(err),
        }
    }
}

impl From<ConfigValidationError> for ConvertError {
    fn from(value: ConfigValidationError) -> Self {
        Self::Config(value)
    }
}

impl From<InputError> for ConvertError {
    fn from(value: InputError) -> Self {
        Self::Input(value)
    }
}

impl From<ResolveError> for ConvertError {
    fn from(value: ResolveError) -> Self {
        Self::Resolve(value)
    }
}

/// Converts RAWRR report JSON into a GraphCommons import document.
///
/// # Side effects
/// - Emits `convert` logging events with counts, duration and status.
///
/// # Errors
/// - `ConvertError::Config` when `config` fails validation.
/// - `ConvertError::Input` for malformed reports.
/// - `ConvertError::Resolve` when a relation names an unknown title.
pub fn convert_report(input: &str, config: &GraphConfig) -> ConvertResult<GraphDocument> {
    let started_at = Instant::now();
    info!(
        "event=convert module=service status=start input_bytes={}",
        input.len()
    );

    match run_pipeline(input, config) {
        Ok(document) => {
            info!(
                "event=convert module=service status=ok duration_ms={} nodes={} edges={}",
                started_at.elapsed().as_millis(),
                document.graph.nodes.len(),
                document.graph.edges.len()
            );
            Ok(document)
        }
        Err(err) => {
            // Below `error`: callers report failures themselves.
            warn!(
                "event=convert module=service status=error duration_ms={} error_code={} error={}",
                started_at.elapsed().as_millis(),
                err.code(),
                error_chain(&err)
            );
            Err(err)
        }
    }
}

/// Runs index, resolve and assemble on an already validated report.
pub fn convert_parsed(report: &Report, config: &GraphConfig) -> ConvertResult<GraphDocument> {
    config.validate()?;
    build_document(report, config)
}

fn build_document(report: &Report, config: &GraphConfig) -> ConvertResult<GraphDocument> {
    let catalog = SectionCatalog::new(config);

    let index = index_report(report, &catalog);
    debug!(
        "event=index module=service status=ok nodes={}",
        index.nodes.len()
    );

    let edges = resolve_edges(report, &index.lookups, &catalog.edge_stamp())?;
    debug!("event=resolve module=service status=ok edges={}", edges.len());

    Ok(assemble_document(
        GraphMetadata::now(config),
        &catalog,
        config,
        index.nodes,
        edges,
    ))
}

/// Serializes the envelope as compact JSON.
pub fn render_document(document: &GraphDocument) -> ConvertResult<String> {
    serde_json::to_string(document).map_err(ConvertError::Encode)
}

/// Joins an error and its sources with `: `.
fn error_chain(err: &dyn Error) -> String {
    let mut chain = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        chain.push_str(": ");
        chain.push_str(&cause.to_string());
        source = cause.source();
    }
    chain
}

fn run_pipeline(input: &str, config: &GraphConfig) -> ConvertResult<GraphDocument> {
    config.validate()?;
    let report = parse_report(input, config)?;
    debug!(
        "event=parse module=service status=ok sections={} entries={}",
        report.sections.len(),
        report.entry_count()
    );
    build_document(&report, config)
}
