//! Static relationship policy.
//!
//! # Invariants
//! - Implicit rules always target the anchor, which is indexed in the
//!   `Overview` table under `ANCHOR_TITLE`.
//! - Rule order within a section is the edge emission order.

use crate::model::report::RelationField;
use crate::model::section::Section;
use std::fmt::{Display, Formatter};

/// Title and name of the anchor node.
pub const ANCHOR_TITLE: &str = "RAWRR";

/// How many targets one rule may produce per entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    ExactlyOne,
    ZeroOrOne,
    ZeroOrMore,
}

impl Cardinality {
    pub fn allows(self, count: usize) -> bool {
        match self {
            Self::ExactlyOne => count == 1,
            Self::ZeroOrOne => count <= 1,
            Self::ZeroOrMore => true,
        }
    }
}

/// Where a rule reads its target titles from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationSource {
    /// No input field; the entry always links to the anchor.
    Implicit,
    /// Titles listed in the named relation field.
    Field(RelationField),
}

impl Display for RelationSource {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Implicit => f.write_str("(implicit)"),
            Self::Field(field) => write!(f, "{field}"),
        }
    }
}

/// One declarative link rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelationRule {
    pub source: Section,
    pub via: RelationSource,
    pub target: Section,
    pub cardinality: Cardinality,
}

impl RelationRule {
    pub fn field(&self) -> Option<RelationField> {
        match self.via {
            RelationSource::Implicit => None,
            RelationSource::Field(field) => Some(field),
        }
    }
}

const fn rule(
    source: Section,
    via: RelationSource,
    target: Section,
    cardinality: Cardinality,
) -> RelationRule {
    RelationRule {
        source,
        via,
        target,
        cardinality,
    }
}

/// The full rule table, in emission order.
pub const RELATION_POLICY: &[RelationRule] = &[
    rule(
        Section::Assets,
        RelationSource::Implicit,
        Section::Overview,
        Cardinality::ExactlyOne,
    ),
    rule(
        Section::Activities,
        RelationSource::Field(RelationField::RelatedAssets),
        Section::Assets,
        Cardinality::ZeroOrMore,
    ),
    rule(
        Section::Threats,
        RelationSource::Field(RelationField::RelatedAsset),
        Section::Assets,
        Cardinality::ZeroOrOne,
    ),
    rule(
        Section::Vulnerabilities,
        RelationSource::Field(RelationField::RelatedAsset),
        Section::Assets,
        Cardinality::ZeroOrOne,
    ),
    rule(
        Section::Vulnerabilities,
        RelationSource::Field(RelationField::RelatedActivity),
        Section::Activities,
        Cardinality::ZeroOrOne,
    ),
    rule(
        Section::Vulnerabilities,
        RelationSource::Field(RelationField::RelatedThreats),
        Section::Threats,
        Cardinality::ZeroOrMore,
    ),
    rule(
        Section::Recommendations,
        RelationSource::Field(RelationField::RelatedVulnerabilities),
        Section::Vulnerabilities,
        Cardinality::ZeroOrMore,
    ),
];

/// Rules owned by `section`, in emission order.
pub fn rules_for(section: Section) -> impl Iterator<Item = &'static RelationRule> {
    RELATION_POLICY
        .iter()
        .filter(move |rule| rule.source == section)
}

#[cfg(test)]
mod tests {
    use super::{rules_for, Cardinality, RelationSource, RELATION_POLICY};
    use crate::model::report::RelationField;
    use crate::model::section::Section;

    #[test]
    fn implicit_rules_target_the_overview_section() {
        for rule in RELATION_POLICY {
            if rule.via == RelationSource::Implicit {
                assert_eq!(rule.target, Section::Overview);
                assert_eq!(rule.cardinality, Cardinality::ExactlyOne);
            }
        }
    }

    #[test]
    fn only_assets_link_to_the_anchor() {
        let anchor_sources: Vec<Section> = RELATION_POLICY
            .iter()
            .filter(|rule| rule.target == Section::Overview)
            .map(|rule| rule.source)
            .collect();
        assert_eq!(anchor_sources, vec![Section::Assets]);
    }

    #[test]
    fn vulnerability_fields_follow_declaration_order() {
        let fields: Vec<Option<RelationField>> = rules_for(Section::Vulnerabilities)
            .map(|rule| rule.field())
            .collect();
        assert_eq!(
            fields,
            vec![
                Some(RelationField::RelatedAsset),
                Some(RelationField::RelatedActivity),
                Some(RelationField::RelatedThreats),
            ]
        );
    }

    #[test]
    fn overview_owns_no_rules() {
        assert_eq!(rules_for(Section::Overview).count(), 0);
    }

    #[test]
    fn cardinality_bounds() {
        assert!(Cardinality::ZeroOrOne.allows(0));
        assert!(Cardinality::ZeroOrOne.allows(1));
        assert!(!Cardinality::ZeroOrOne.allows(2));
        assert!(!Cardinality::ExactlyOne.allows(0));
        assert!(Cardinality::ZeroOrMore.allows(7));
    }
}
