//! Validated report model.
//!
//! # Responsibility
//! - Hold report data after the input boundary has normalized it.
//! - Expose relation fields by canonical name only.
//!
//! # Invariants
//! - Every `Entry` has a title; titles are unique per section kind.
//! - `RelationValue::None` is the only representation of the `"None"` sentinel.

use crate::model::section::Section;
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

/// Literal marker meaning "no relation of this kind".
pub const NONE_SENTINEL: &str = "None";

/// Canonical relation field names.
///
/// The input boundary maps spelling variants onto these before the core
/// ever sees an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RelationField {
    RelatedAssets,
    RelatedAsset,
    RelatedActivity,
    RelatedThreats,
    RelatedVulnerabilities,
}

impl RelationField {
    /// Input key for this field.
    pub fn wire_name(self) -> &'static str {
        match self {
            Self::RelatedAssets => "relatedAssets",
            Self::RelatedAsset => "relatedAsset",
            Self::RelatedActivity => "relatedActivity",
            Self::RelatedThreats => "relatedThreats",
            Self::RelatedVulnerabilities => "relatedVulnerabilities",
        }
    }
}

impl Display for RelationField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// Value of one relation field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelationValue {
    /// The `"None"` sentinel.
    None,
    /// Target titles in declaration order.
    Titles(Vec<String>),
}

impl RelationValue {
    /// Titles to resolve; empty for the sentinel.
    pub fn titles(&self) -> &[String] {
        match self {
            Self::None => &[],
            Self::Titles(titles) => titles,
        }
    }
}

/// One record within a report section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub title: String,
    pub description: String,
    relations: BTreeMap<RelationField, RelationValue>,
}

impl Entry {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            relations: BTreeMap::new(),
        }
    }

    /// Builder-style setter, mostly for tests and programmatic reports.
    pub fn with_relation(mut self, field: RelationField, value: RelationValue) -> Self {
        self.set_relation(field, value);
        self
    }

    pub fn set_relation(&mut self, field: RelationField, value: RelationValue) {
        self.relations.insert(field, value);
    }

    pub fn relation(&self, field: RelationField) -> Option<&RelationValue> {
        self.relations.get(&field)
    }
}

/// Entries of one input section, in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSection {
    pub section: Section,
    pub entries: Vec<Entry>,
}

impl ReportSection {
    pub fn new(section: Section, entries: Vec<Entry>) -> Self {
        Self { section, entries }
    }
}

/// A validated RAWRR report.
///
/// The same section kind may appear more than once; entries of all
/// occurrences share one lookup table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    pub sections: Vec<ReportSection>,
}

impl Report {
    pub fn new(sections: Vec<ReportSection>) -> Self {
        Self { sections }
    }

    /// Total entry count across all sections.
    pub fn entry_count(&self) -> usize {
        self.sections
            .iter()
            .map(|section| section.entries.len())
            .sum()
    }

    /// Iterates `(section, entry)` pairs in input order.
    pub fn entries(&self) -> impl Iterator<Item = (Section, &Entry)> + '_ {
        self.sections.iter().flat_map(|report_section| {
            report_section
                .entries
                .iter()
                .map(move |entry| (report_section.section, entry))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{Entry, RelationField, RelationValue, Report, ReportSection};
    use crate::model::section::Section;

    #[test]
    fn sentinel_has_no_titles() {
        assert!(RelationValue::None.titles().is_empty());
    }

    #[test]
    fn entries_iterate_in_input_order() {
        let report = Report::new(vec![
            ReportSection::new(
                Section::Activities,
                vec![Entry::new("Patch", "").with_relation(
                    RelationField::RelatedAssets,
                    RelationValue::Titles(vec!["Server".to_string()]),
                )],
            ),
            ReportSection::new(Section::Assets, vec![Entry::new("Server", "")]),
        ]);

        let order: Vec<(Section, &str)> = report
            .entries()
            .map(|(section, entry)| (section, entry.title.as_str()))
            .collect();
        assert_eq!(
            order,
            vec![(Section::Activities, "Patch"), (Section::Assets, "Server")]
        );
        assert_eq!(report.entry_count(), 2);
    }
}
