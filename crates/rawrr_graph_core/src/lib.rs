//! Core conversion logic for rawrr2graph.
//! Turns RAWRR security-assessment reports into GraphCommons import documents.

pub mod config;
pub mod input;
pub mod logging;
pub mod model;
pub mod pipeline;
pub mod relation;
pub mod service;

pub use config::{ConfigValidationError, GraphConfig, NodeSizing, SectionColors};
pub use input::{parse_report, InputError};
pub use logging::{default_log_level, init_logging, logging_status, LogTarget};
pub use model::graph::{
    Edge, EdgeStamp, EdgeType, Graph, GraphDocument, Node, NodeId, NodeType,
};
pub use model::report::{Entry, RelationField, RelationValue, Report, ReportSection};
pub use model::section::Section;
pub use pipeline::catalog::SectionCatalog;
pub use pipeline::index::{index_report, Index, Lookups};
pub use pipeline::resolve::{resolve_edges, ResolveError};
pub use relation::policy::{Cardinality, RelationRule, RelationSource, ANCHOR_TITLE, RELATION_POLICY};
pub use service::convert_service::{
    convert_parsed, convert_report, render_document, ConvertError, ConvertResult,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
