//! Fixed report sections.
//!
//! # Invariants
//! - The set of sections is closed; unknown names never map to a section.
//! - `Section::ALL` order is the node-type catalog order.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// One of the six fixed RAWRR record categories.
///
/// Serialized by display name, so `Overview` travels as `RAWRR`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Section {
    /// Assessment-wide section that owns the anchor node.
    #[serde(rename = "RAWRR")]
    Overview,
    Assets,
    Activities,
    Threats,
    Vulnerabilities,
    Recommendations,
}

impl Section {
    /// All sections in catalog order.
    pub const ALL: [Section; 6] = [
        Section::Overview,
        Section::Assets,
        Section::Activities,
        Section::Threats,
        Section::Vulnerabilities,
        Section::Recommendations,
    ];

    /// Display name used both in input `sectionName` and in node `type`.
    pub fn name(self) -> &'static str {
        match self {
            Self::Overview => "RAWRR",
            Self::Assets => "Assets",
            Self::Activities => "Activities",
            Self::Threats => "Threats",
            Self::Vulnerabilities => "Vulnerabilities",
            Self::Recommendations => "Recommendations",
        }
    }

    /// Resolves a canonical display name. Matching is exact.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|section| section.name() == name)
    }

    /// Position in `Section::ALL`.
    pub fn index(self) -> usize {
        self as usize
    }
}

impl Display for Section {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
