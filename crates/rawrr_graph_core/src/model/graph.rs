//! GraphCommons wire records.
//!
//! # Responsibility
//! - Define nodes, edges, type catalogs and the import envelope.
//! - Match the field names and encodings the import service expects.
//!
//! # Invariants
//! - Boolean flags the service reads as integers are serialized as `0`/`1`.
//! - Placeholders the service requires but this tool never fills are `null`.

use crate::model::section::Section;
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::collections::BTreeMap;
use uuid::Uuid;

/// Stable identifier of one graph node.
pub type NodeId = Uuid;
/// Stable identifier of one graph edge.
pub type EdgeId = Uuid;

/// Property key holding the `"<section> <title>"` disambiguation value.
pub const COMPOSITE_KEY_PROPERTY: &str = "id";
/// Name shared by every edge and by the single edge type.
pub const EDGE_NAME: &str = "Edge";

fn serialize_flag<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u8(u8::from(*value))
}

/// Builds the cross-section disambiguation key for an entry.
pub fn composite_key(section: Section, title: &str) -> String {
    format!("{} {}", section.name(), title)
}

/// Graph representation of a report entry or of the anchor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    pub id: NodeId,
    /// Owning section, serialized by display name.
    #[serde(rename = "type")]
    pub section: Section,
    /// Node-type identifier of the owning section.
    #[serde(rename = "section_data")]
    pub type_id: Uuid,
    pub name: String,
    pub description: String,
    pub image: Option<String>,
    pub reference: Option<String>,
    pub properties: BTreeMap<String, String>,
}

impl Node {
    /// Creates a node with a fresh id and the composite key property set.
    pub fn new(
        section: Section,
        type_id: Uuid,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        let name = name.into();
        let mut properties = BTreeMap::new();
        properties.insert(
            COMPOSITE_KEY_PROPERTY.to_string(),
            composite_key(section, &name),
        );
        Self {
            id: Uuid::new_v4(),
            section,
            type_id,
            name,
            description: description.into(),
            image: None,
            reference: None,
            properties,
        }
    }

    pub fn composite_key(&self) -> Option<&str> {
        self.properties
            .get(COMPOSITE_KEY_PROPERTY)
            .map(String::as_str)
    }
}

/// Directed relationship between two nodes.
///
/// Field order mirrors the GraphCommons export (`to` before `from`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Edge {
    pub to: NodeId,
    pub from: NodeId,
    pub name: String,
    /// Identifier of the shared edge type.
    #[serde(rename = "section_data")]
    pub type_id: Uuid,
    pub id: EdgeId,
    pub user_id: Uuid,
    pub weight: u32,
    #[serde(serialize_with = "serialize_flag")]
    pub directed: bool,
    pub properties: BTreeMap<String, Value>,
}

/// Values shared by every edge of one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeStamp {
    pub type_id: Uuid,
    pub user_id: Uuid,
}

impl EdgeStamp {
    /// Creates a weight-1 directed edge with a fresh id.
    pub fn edge(&self, from: NodeId, to: NodeId) -> Edge {
        Edge {
            to,
            from,
            name: EDGE_NAME.to_string(),
            type_id: self.type_id,
            id: Uuid::new_v4(),
            user_id: self.user_id,
            weight: 1,
            directed: true,
            properties: BTreeMap::new(),
        }
    }
}

/// Catalog entry describing how nodes of one section are drawn.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeType {
    pub id: Uuid,
    pub name: Section,
    pub name_alias: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub color: String,
    pub image_as_icon: bool,
    pub properties: Vec<Value>,
    pub hide_name: Option<bool>,
    pub size: String,
    pub size_limit: u32,
}

/// The single edge-type catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeType {
    pub id: Uuid,
    pub name: String,
    pub name_alias: Option<String>,
    pub description: Option<String>,
    #[serde(serialize_with = "serialize_flag")]
    pub weighted: bool,
    #[serde(serialize_with = "serialize_flag")]
    pub directed: bool,
    /// `null` marks the type as not durational.
    pub durational: Option<bool>,
    pub color: String,
    pub properties: Vec<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GraphImage {
    pub path: Option<String>,
    pub ref_name: Option<String>,
    pub ref_url: Option<String>,
}

/// Graph object inside the import envelope.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Graph {
    pub id: Uuid,
    pub name: String,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    pub updated_at: String,
    pub created_at: String,
    pub status: u8,
    pub image: GraphImage,
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    #[serde(rename = "nodeTypes")]
    pub node_types: Vec<NodeType>,
    #[serde(rename = "edgeTypes")]
    pub edge_types: Vec<EdgeType>,
}

impl Graph {
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.iter().find(|node| node.id == id)
    }

    /// Finds a node by section and display name.
    pub fn find_node(&self, section: Section, name: &str) -> Option<&Node> {
        self.nodes
            .iter()
            .find(|node| node.section == section && node.name == name)
    }
}

/// Top-level import document: `{"graph": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphDocument {
    pub graph: Graph,
}
