//! Per-run section and edge type identities.

use crate::config::GraphConfig;
use crate::model::graph::{EdgeStamp, EdgeType, NodeType, EDGE_NAME};
use crate::model::section::Section;
use uuid::Uuid;

/// Type identity and color of one section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionType {
    pub section: Section,
    pub id: Uuid,
    pub color: String,
}

/// Type identities for every section plus the shared edge type.
///
/// Ids are fresh per catalog; colors come from the config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionCatalog {
    sections: Vec<SectionType>,
    edge_type_id: Uuid,
    edge_color: String,
    user_id: Uuid,
}

impl SectionCatalog {
    pub fn new(config: &GraphConfig) -> Self {
        let sections = Section::ALL
            .into_iter()
            .map(|section| SectionType {
                section,
                id: Uuid::new_v4(),
                color: config.section_colors.get(section).to_string(),
            })
            .collect();
        Self {
            sections,
            edge_type_id: Uuid::new_v4(),
            edge_color: config.edge_color.clone(),
            user_id: config.user_id,
        }
    }

    pub fn section_type(&self, section: Section) -> &SectionType {
        &self.sections[section.index()]
    }

    pub fn type_id(&self, section: Section) -> Uuid {
        self.section_type(section).id
    }

    pub fn edge_type_id(&self) -> Uuid {
        self.edge_type_id
    }

    /// Values stamped on every edge of this run.
    pub fn edge_stamp(&self) -> EdgeStamp {
        EdgeStamp {
            type_id: self.edge_type_id,
            user_id: self.user_id,
        }
    }

    /// Node-type catalog entries in `Section::ALL` order.
    pub fn node_types(&self, size: &str, size_limit: u32) -> Vec<NodeType> {
        self.sections
            .iter()
            .map(|section_type| NodeType {
                id: section_type.id,
                name: section_type.section,
                name_alias: None,
                description: None,
                image: None,
                color: section_type.color.clone(),
                image_as_icon: false,
                properties: Vec::new(),
                hide_name: None,
                size: size.to_string(),
                size_limit,
            })
            .collect()
    }

    /// The single edge-type entry: weighted, not directed as a type.
    pub fn edge_type(&self) -> EdgeType {
        EdgeType {
            id: self.edge_type_id,
            name: EDGE_NAME.to_string(),
            name_alias: None,
            description: None,
            weighted: true,
            directed: false,
            durational: None,
            color: self.edge_color.clone(),
            properties: Vec::new(),
        }
    }
}
