//! Entity indexing: entries become nodes and title lookups.
//!
//! # Invariants
//! - The anchor is the first node and is indexed under `ANCHOR_TITLE` in
//!   the overview table.
//! - Node order is anchor, then entries in input order.
//! - No relation field is read here.

use crate::model::graph::{Node, NodeId};
use crate::model::report::Report;
use crate::model::section::Section;
use crate::pipeline::catalog::SectionCatalog;
use crate::relation::policy::ANCHOR_TITLE;
use std::collections::HashMap;

/// Per-section `title -> node id` tables for one conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lookups {
    anchor: NodeId,
    tables: HashMap<Section, HashMap<String, NodeId>>,
}

impl Lookups {
    /// Starts a lookup set holding only the anchor.
    pub fn with_anchor(anchor: NodeId) -> Self {
        let mut lookups = Self {
            anchor,
            tables: HashMap::new(),
        };
        lookups.insert(Section::Overview, ANCHOR_TITLE, anchor);
        lookups
    }

    pub fn insert(&mut self, section: Section, title: impl Into<String>, node: NodeId) {
        self.tables
            .entry(section)
            .or_default()
            .insert(title.into(), node);
    }

    pub fn anchor(&self) -> NodeId {
        self.anchor
    }

    pub fn get(&self, section: Section, title: &str) -> Option<NodeId> {
        self.tables.get(&section)?.get(title).copied()
    }

    /// Number of titles indexed for `section`, anchor included.
    pub fn len(&self, section: Section) -> usize {
        self.tables.get(&section).map_or(0, HashMap::len)
    }
}

/// Indexer output.
#[derive(Debug, Clone)]
pub struct Index {
    pub nodes: Vec<Node>,
    pub lookups: Lookups,
}

/// Creates the anchor node plus one node per entry.
pub fn index_report(report: &Report, catalog: &SectionCatalog) -> Index {
    let anchor = Node::new(
        Section::Overview,
        catalog.type_id(Section::Overview),
        ANCHOR_TITLE,
        "",
    );
    let mut lookups = Lookups::with_anchor(anchor.id);
    let mut nodes = Vec::with_capacity(report.entry_count() + 1);
    nodes.push(anchor);

    for (section, entry) in report.entries() {
        let node = Node::new(
            section,
            catalog.type_id(section),
            entry.title.clone(),
            entry.description.clone(),
        );
        lookups.insert(section, entry.title.clone(), node.id);
        nodes.push(node);
    }

    Index { nodes, lookups }
}

#[cfg(test)]
mod tests {
    use super::index_report;
    use crate::config::GraphConfig;
    use crate::model::report::{Entry, RelationField, RelationValue, Report, ReportSection};
    use crate::model::section::Section;
    use crate::pipeline::catalog::SectionCatalog;
    use crate::relation::policy::ANCHOR_TITLE;

    fn sample_report() -> Report {
        Report::new(vec![
            ReportSection::new(
                Section::Activities,
                vec![Entry::new("Patch Server", "monthly").with_relation(
                    RelationField::RelatedAssets,
                    RelationValue::Titles(vec!["Server A".to_string()]),
                )],
            ),
            ReportSection::new(
                Section::Assets,
                vec![Entry::new("Server A", "rack"), Entry::new("Laptop", "")],
            ),
        ])
    }

    #[test]
    fn anchor_comes_first_then_input_order() {
        let catalog = SectionCatalog::new(&GraphConfig::default());
        let index = index_report(&sample_report(), &catalog);

        let names: Vec<&str> = index.nodes.iter().map(|node| node.name.as_str()).collect();
        assert_eq!(names, vec![ANCHOR_TITLE, "Patch Server", "Server A", "Laptop"]);
        assert_eq!(index.nodes[0].section, Section::Overview);
        assert_eq!(index.nodes[0].description, "");
        assert_eq!(index.nodes[0].id, index.lookups.anchor());
    }

    #[test]
    fn lookups_cover_every_entry() {
        let catalog = SectionCatalog::new(&GraphConfig::default());
        let index = index_report(&sample_report(), &catalog);

        let server = index.lookups.get(Section::Assets, "Server A").unwrap();
        let node = index.nodes.iter().find(|node| node.id == server).unwrap();
        assert_eq!(node.description, "rack");
        assert_eq!(node.type_id, catalog.type_id(Section::Assets));
        assert_eq!(node.composite_key(), Some("Assets Server A"));

        assert_eq!(index.lookups.len(Section::Assets), 2);
        assert_eq!(index.lookups.len(Section::Overview), 1);
        assert_eq!(index.lookups.get(Section::Activities, "Server A"), None);
    }

    #[test]
    fn node_ids_are_unique() {
        let catalog = SectionCatalog::new(&GraphConfig::default());
        let index = index_report(&sample_report(), &catalog);
        let ids: std::collections::HashSet<_> = index.nodes.iter().map(|node| node.id).collect();
        assert_eq!(ids.len(), index.nodes.len());
    }
}
