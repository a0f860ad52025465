//! Conversion configuration.
//!
//! # Responsibility
//! - Hold graph metadata, colors and section-name aliases for one run.
//! - Reproduce the GraphCommons import template by default.
//!
//! # Invariants
//! - A config must pass `validate()` before it drives a conversion.
//! - Aliases never shadow canonical section names.

use crate::model::section::Section;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Graph id taken from the reference GraphCommons export.
pub const DEFAULT_GRAPH_ID: Uuid = Uuid::from_u128(0x9a1f_a433_0d37_4e6e_a035_90df_3d09_a7af);
/// Owning user id stamped on every edge.
pub const DEFAULT_USER_ID: Uuid = Uuid::from_u128(0xe8bb_1f96_5d22_4bc3_96d5_afc6_af79_40d0);
pub const DEFAULT_GRAPH_NAME: &str = "RAWRR";
pub const DEFAULT_EDGE_COLOR: &str = "#000000";
pub const DEFAULT_NODE_SIZE: &str = "metric_degree";
pub const DEFAULT_NODE_SIZE_LIMIT: u32 = 48;

/// Display color per section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SectionColors {
    #[serde(rename = "RAWRR")]
    pub overview: String,
    #[serde(rename = "Assets")]
    pub assets: String,
    #[serde(rename = "Activities")]
    pub activities: String,
    #[serde(rename = "Threats")]
    pub threats: String,
    #[serde(rename = "Vulnerabilities")]
    pub vulnerabilities: String,
    #[serde(rename = "Recommendations")]
    pub recommendations: String,
}

impl SectionColors {
    pub fn get(&self, section: Section) -> &str {
        match section {
            Section::Overview => &self.overview,
            Section::Assets => &self.assets,
            Section::Activities => &self.activities,
            Section::Threats => &self.threats,
            Section::Vulnerabilities => &self.vulnerabilities,
            Section::Recommendations => &self.recommendations,
        }
    }
}

impl Default for SectionColors {
    fn default() -> Self {
        Self {
            overview: "#5c5c00".to_string(),
            assets: "#0000ff".to_string(),
            activities: "#ff00ff".to_string(),
            threats: "#005c5c".to_string(),
            vulnerabilities: "#ff0000".to_string(),
            recommendations: "#005c00".to_string(),
        }
    }
}

/// Visual sizing applied to every node type.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NodeSizing {
    pub size: String,
    pub size_limit: u32,
}

impl Default for NodeSizing {
    fn default() -> Self {
        Self {
            size: DEFAULT_NODE_SIZE.to_string(),
            size_limit: DEFAULT_NODE_SIZE_LIMIT,
        }
    }
}

/// Settings for one report-to-graph conversion.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GraphConfig {
    pub graph_id: Uuid,
    pub graph_name: String,
    pub user_id: Uuid,
    pub section_colors: SectionColors,
    pub edge_color: String,
    /// Localized section names, e.g. `"Ativos" -> Assets`.
    pub section_aliases: BTreeMap<String, Section>,
    pub node_sizing: NodeSizing,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            graph_id: DEFAULT_GRAPH_ID,
            graph_name: DEFAULT_GRAPH_NAME.to_string(),
            user_id: DEFAULT_USER_ID,
            section_colors: SectionColors::default(),
            edge_color: DEFAULT_EDGE_COLOR.to_string(),
            section_aliases: BTreeMap::new(),
            node_sizing: NodeSizing::default(),
        }
    }
}

impl GraphConfig {
    /// Parses and validates a JSON config. Missing keys keep their defaults.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigValidationError> {
        let config: Self = serde_json::from_str(raw)
            .map_err(|err| ConfigValidationError::Malformed(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Resolves an input `sectionName`, canonical names first.
    pub fn resolve_section_name(&self, name: &str) -> Option<Section> {
        Section::from_name(name).or_else(|| self.section_aliases.get(name).copied())
    }

    /// Validates declaration-level config invariants.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.graph_id.is_nil() {
            return Err(ConfigValidationError::NilId("graph_id"));
        }
        if self.user_id.is_nil() {
            return Err(ConfigValidationError::NilId("user_id"));
        }
        if self.graph_name.trim().is_empty() {
            return Err(ConfigValidationError::EmptyGraphName);
        }

        for section in Section::ALL {
            let color = self.section_colors.get(section);
            if !is_hex_color(color) {
                return Err(ConfigValidationError::InvalidColor {
                    owner: section.name().to_string(),
                    value: color.to_string(),
                });
            }
        }
        if !is_hex_color(&self.edge_color) {
            return Err(ConfigValidationError::InvalidColor {
                owner: "edge".to_string(),
                value: self.edge_color.clone(),
            });
        }

        for alias in self.section_aliases.keys() {
            if alias.trim().is_empty() {
                return Err(ConfigValidationError::EmptyAlias);
            }
            if Section::from_name(alias).is_some() {
                return Err(ConfigValidationError::AliasShadowsSection(alias.clone()));
            }
        }

        if self.node_sizing.size.trim().is_empty() {
            return Err(ConfigValidationError::EmptyNodeSize);
        }
        Ok(())
    }
}

/// `#rrggbb` with hex digits of either case.
fn is_hex_color(value: &str) -> bool {
    match value.strip_prefix('#') {
        Some(digits) => digits.len() == 6 && digits.chars().all(|c| c.is_ascii_hexdigit()),
        None => false,
    }
}

/// Config validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValidationError {
    Malformed(String),
    NilId(&'static str),
    EmptyGraphName,
    InvalidColor { owner: String, value: String },
    EmptyAlias,
    AliasShadowsSection(String),
    EmptyNodeSize,
}

impl Display for ConfigValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed(message) => write!(f, "config is malformed: {message}"),
            Self::NilId(name) => write!(f, "config {name} must not be the nil uuid"),
            Self::EmptyGraphName => write!(f, "config graph_name must not be empty"),
            Self::InvalidColor { owner, value } => {
                write!(f, "config color for {owner} is invalid: {value} (expected #rrggbb)")
            }
            Self::EmptyAlias => write!(f, "config contains an empty section alias"),
            Self::AliasShadowsSection(alias) => {
                write!(f, "config alias shadows a canonical section name: {alias}")
            }
            Self::EmptyNodeSize => write!(f, "config node_sizing.size must not be empty"),
        }
    }
}

impl Error for ConfigValidationError {}
