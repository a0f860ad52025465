//! Document assembly: metadata, catalogs and graph data into one envelope.

use crate::config::GraphConfig;
use crate::model::graph::{Edge, Graph, GraphDocument, GraphImage, Node};
use crate::pipeline::catalog::SectionCatalog;
use chrono::{DateTime, Local};
use uuid::Uuid;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Identifying metadata of the produced graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphMetadata {
    pub id: Uuid,
    pub name: String,
    pub created_at: String,
    pub updated_at: String,
}

impl GraphMetadata {
    /// Metadata stamped with the current local wall-clock time.
    pub fn now(config: &GraphConfig) -> Self {
        let stamp = format_timestamp(&Local::now());
        Self {
            id: config.graph_id,
            name: config.graph_name.clone(),
            created_at: stamp.clone(),
            updated_at: stamp,
        }
    }
}

/// Formats as `YYYY-MM-DD HH:MM:SS.ffffff`.
pub fn format_timestamp(at: &DateTime<Local>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Wraps indexer and resolver output into the import envelope.
pub fn assemble_document(
    metadata: GraphMetadata,
    catalog: &SectionCatalog,
    config: &GraphConfig,
    nodes: Vec<Node>,
    edges: Vec<Edge>,
) -> GraphDocument {
    let sizing = &config.node_sizing;
    GraphDocument {
        graph: Graph {
            id: metadata.id,
            name: metadata.name,
            subtitle: None,
            description: None,
            updated_at: metadata.updated_at,
            created_at: metadata.created_at,
            status: 0,
            image: GraphImage::default(),
            nodes,
            edges,
            node_types: catalog.node_types(&sizing.size, sizing.size_limit),
            edge_types: vec![catalog.edge_type()],
        },
    }
}
