//! Relationship resolution: relation fields become edges.
//!
//! # Responsibility
//! - Walk the report again and apply `RELATION_POLICY` to every entry.
//! - Resolve every named target through the indexer's lookups.
//!
//! # Invariants
//! - Pure function of `(report, lookups, stamp)`.
//! - An unresolvable title is an error, never a dropped edge.
//! - Emission order: section, entry, policy rule, then list order.

use crate::model::graph::{Edge, EdgeStamp};
use crate::model::report::{Entry, RelationField, Report};
use crate::model::section::Section;
use crate::pipeline::index::Lookups;
use crate::relation::policy::{rules_for, RelationRule, RelationSource, ANCHOR_TITLE};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ResolveResult<T> = Result<T, ResolveError>;

/// Referential-integrity errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// A relation names a title absent from the target section.
    UnresolvedReference {
        section: Section,
        title: String,
        via: RelationSource,
        target: Section,
        missing: String,
    },
    /// The entry itself was never indexed (lookups built from another report).
    UnindexedEntry { section: Section, title: String },
    /// The entry lacks a relation field its section's policy reads.
    MissingRelation {
        section: Section,
        title: String,
        field: RelationField,
    },
}

impl Display for ResolveError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnresolvedReference {
                section,
                title,
                via,
                target,
                missing,
            } => write!(
                f,
                "{section} entry `{title}` references unknown {target} entry `{missing}` via {via}"
            ),
            Self::UnindexedEntry { section, title } => {
                write!(f, "{section} entry `{title}` has no indexed node")
            }
            Self::MissingRelation {
                section,
                title,
                field,
            } => write!(
                f,
                "{section} entry `{title}` is missing relation field `{field}`"
            ),
        }
    }
}

impl Error for ResolveError {}

/// Emits one edge per resolved reference in `report`.
///
/// # Errors
/// - `ResolveError::UnresolvedReference` when a target title is not indexed.
/// - `ResolveError::UnindexedEntry` / `MissingRelation` when `report` and
///   `lookups` do not belong together or the report skipped validation.
pub fn resolve_edges(
    report: &Report,
    lookups: &Lookups,
    stamp: &EdgeStamp,
) -> ResolveResult<Vec<Edge>> {
    let mut edges = Vec::new();

    for (section, entry) in report.entries() {
        let from = lookups
            .get(section, &entry.title)
            .ok_or_else(|| ResolveError::UnindexedEntry {
                section,
                title: entry.title.clone(),
            })?;

        for rule in rules_for(section) {
            for target_title in rule_targets(rule, entry)? {
                let to = lookups.get(rule.target, target_title).ok_or_else(|| {
                    ResolveError::UnresolvedReference {
                        section,
                        title: entry.title.clone(),
                        via: rule.via,
                        target: rule.target,
                        missing: target_title.to_string(),
                    }
                })?;
                edges.push(stamp.edge(from, to));
            }
        }
    }

    Ok(edges)
}

/// Titles one rule asks to link `entry` to. Empty for the `"None"` sentinel.
fn rule_targets<'a>(rule: &RelationRule, entry: &'a Entry) -> ResolveResult<Vec<&'a str>> {
    match rule.via {
        RelationSource::Implicit => Ok(vec![ANCHOR_TITLE]),
        RelationSource::Field(field) => {
            let value = entry
                .relation(field)
                .ok_or_else(|| ResolveError::MissingRelation {
                    section: rule.source,
                    title: entry.title.clone(),
                    field,
                })?;
            Ok(value.titles().iter().map(String::as_str).collect())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{resolve_edges, ResolveError};
    use crate::model::graph::EdgeStamp;
    use crate::model::report::{Entry, RelationField, RelationValue, Report, ReportSection};
    use crate::model::section::Section;
    use crate::pipeline::index::Lookups;
    use crate::relation::policy::RelationSource;
    use uuid::Uuid;

    fn stamp() -> EdgeStamp {
        EdgeStamp {
            type_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
        }
    }

    fn titles(values: &[&str]) -> RelationValue {
        RelationValue::Titles(values.iter().map(|value| value.to_string()).collect())
    }

    #[test]
    fn resolves_against_hand_built_lookups() {
        let anchor = Uuid::new_v4();
        let server = Uuid::new_v4();
        let patch = Uuid::new_v4();
        let mut lookups = Lookups::with_anchor(anchor);
        lookups.insert(Section::Assets, "Server A", server);
        lookups.insert(Section::Activities, "Patch Server", patch);

        let report = Report::new(vec![
            ReportSection::new(Section::Assets, vec![Entry::new("Server A", "")]),
            ReportSection::new(
                Section::Activities,
                vec![Entry::new("Patch Server", "")
                    .with_relation(RelationField::RelatedAssets, titles(&["Server A"]))],
            ),
        ]);

        let edges = resolve_edges(&report, &lookups, &stamp()).unwrap();
        let pairs: Vec<_> = edges.iter().map(|edge| (edge.from, edge.to)).collect();
        assert_eq!(pairs, vec![(server, anchor), (patch, server)]);
        assert!(edges.iter().all(|edge| edge.directed && edge.weight == 1));
    }

    #[test]
    fn sentinel_emits_nothing() {
        let vuln = Uuid::new_v4();
        let mut lookups = Lookups::with_anchor(Uuid::new_v4());
        lookups.insert(Section::Vulnerabilities, "Open port", vuln);

        let report = Report::new(vec![ReportSection::new(
            Section::Vulnerabilities,
            vec![Entry::new("Open port", "")
                .with_relation(RelationField::RelatedAsset, RelationValue::None)
                .with_relation(RelationField::RelatedActivity, RelationValue::None)
                .with_relation(RelationField::RelatedThreats, RelationValue::None)],
        )]);

        assert!(resolve_edges(&report, &lookups, &stamp()).unwrap().is_empty());
    }

    #[test]
    fn follows_field_then_list_order() {
        let vuln = Uuid::new_v4();
        let asset = Uuid::new_v4();
        let activity = Uuid::new_v4();
        let theft = Uuid::new_v4();
        let phishing = Uuid::new_v4();
        let mut lookups = Lookups::with_anchor(Uuid::new_v4());
        lookups.insert(Section::Vulnerabilities, "Weak auth", vuln);
        lookups.insert(Section::Assets, "Mailbox", asset);
        lookups.insert(Section::Activities, "Login", activity);
        lookups.insert(Section::Threats, "Theft", theft);
        lookups.insert(Section::Threats, "Phishing", phishing);

        let report = Report::new(vec![ReportSection::new(
            Section::Vulnerabilities,
            vec![Entry::new("Weak auth", "")
                .with_relation(RelationField::RelatedThreats, titles(&["Phishing", "Theft"]))
                .with_relation(RelationField::RelatedActivity, titles(&["Login"]))
                .with_relation(RelationField::RelatedAsset, titles(&["Mailbox"]))],
        )]);

        let edges = resolve_edges(&report, &lookups, &stamp()).unwrap();
        let targets: Vec<_> = edges.iter().map(|edge| edge.to).collect();
        assert_eq!(targets, vec![asset, activity, phishing, theft]);
        assert!(edges.iter().all(|edge| edge.from == vuln));
    }

    #[test]
    fn unknown_target_is_an_error() {
        let mut lookups = Lookups::with_anchor(Uuid::new_v4());
        lookups.insert(Section::Recommendations, "Rotate keys", Uuid::new_v4());

        let report = Report::new(vec![ReportSection::new(
            Section::Recommendations,
            vec![Entry::new("Rotate keys", "").with_relation(
                RelationField::RelatedVulnerabilities,
                titles(&["Leaked key"]),
            )],
        )]);

        let err = resolve_edges(&report, &lookups, &stamp()).unwrap_err();
        assert_eq!(
            err,
            ResolveError::UnresolvedReference {
                section: Section::Recommendations,
                title: "Rotate keys".to_string(),
                via: RelationSource::Field(RelationField::RelatedVulnerabilities),
                target: Section::Vulnerabilities,
                missing: "Leaked key".to_string(),
            }
        );
        assert!(err.to_string().contains("Leaked key"));
    }

    #[test]
    fn unindexed_entry_is_an_error() {
        let lookups = Lookups::with_anchor(Uuid::new_v4());
        let report = Report::new(vec![ReportSection::new(
            Section::Assets,
            vec![Entry::new("Ghost", "")],
        )]);

        let err = resolve_edges(&report, &lookups, &stamp()).unwrap_err();
        assert!(matches!(err, ResolveError::UnindexedEntry { .. }));
    }

    #[test]
    fn missing_relation_field_is_an_error() {
        let mut lookups = Lookups::with_anchor(Uuid::new_v4());
        lookups.insert(Section::Threats, "Flood", Uuid::new_v4());
        let report = Report::new(vec![ReportSection::new(
            Section::Threats,
            vec![Entry::new("Flood", "")],
        )]);

        let err = resolve_edges(&report, &lookups, &stamp()).unwrap_err();
        assert_eq!(
            err,
            ResolveError::MissingRelation {
                section: Section::Threats,
                title: "Flood".to_string(),
                field: RelationField::RelatedAsset,
            }
        );
    }
}
