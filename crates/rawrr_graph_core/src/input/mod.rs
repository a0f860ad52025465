//! RAWRR report input boundary.
//!
//! # Responsibility
//! - Decode the JSON report and normalize it into a validated `Report`.
//! - Reject malformed input before any graph data is produced.
//!
//! # Invariants
//! - Field-name variants are normalized here and never reach the core.
//! - Every relation field the policy requires for a section is present.
//! - Titles are unique per section kind, and the anchor title is reserved
//!   in the overview section.

mod raw;

use crate::config::GraphConfig;
use crate::model::report::{Entry, RelationField, RelationValue, Report, ReportSection, NONE_SENTINEL};
use crate::model::section::Section;
use crate::relation::policy::{rules_for, ANCHOR_TITLE};
use log::debug;
use raw::{RawEntry, RawRelation, RawReport};
use std::collections::{HashMap, HashSet};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type InputResult<T> = Result<T, InputError>;

/// Malformed-input errors.
#[derive(Debug)]
pub enum InputError {
    /// The document is not JSON or has the wrong value shapes.
    Json(serde_json::Error),
    MissingField {
        path: String,
        field: &'static str,
    },
    UnknownSection(String),
    MissingRelation {
        section: Section,
        title: String,
        field: RelationField,
    },
    TooManyTargets {
        section: Section,
        title: String,
        field: RelationField,
        count: usize,
    },
    DuplicateTitle {
        section: Section,
        title: String,
    },
}

impl Display for InputError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(_) => write!(f, "invalid report json"),
            Self::MissingField { path, field } => {
                write!(f, "report is missing required field `{field}` at {path}")
            }
            Self::UnknownSection(name) => write!(f, "unknown report section: {name}"),
            Self::MissingRelation {
                section,
                title,
                field,
            } => write!(
                f,
                "{section} entry `{title}` is missing relation field `{field}`"
            ),
            Self::TooManyTargets {
                section,
                title,
                field,
                count,
            } => write!(
                f,
                "{section} entry `{title}` names {count} targets in single-valued field `{field}`"
            ),
            Self::DuplicateTitle { section, title } => {
                write!(f, "{section} title is duplicated: {title}")
            }
        }
    }
}

impl Error for InputError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for InputError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

/// Parses and validates a RAWRR JSON report.
///
/// # Errors
/// - `InputError::Json` when the text is not a JSON report shape.
/// - `InputError::MissingField` for absent `sections`, `sectionName`,
///   `entries` or `title`.
/// - `InputError::UnknownSection` when a section name is neither canonical
///   nor a configured alias.
/// - `InputError::MissingRelation` / `TooManyTargets` when an entry breaks
///   the relation policy shape.
/// - `InputError::DuplicateTitle` when a title repeats within a section kind.
pub fn parse_report(input: &str, config: &GraphConfig) -> InputResult<Report> {
    let raw: RawReport = serde_json::from_str(input)?;
    let raw_sections = raw.sections.ok_or_else(|| InputError::MissingField {
        path: "$".to_string(),
        field: "sections",
    })?;

    let mut seen: HashMap<Section, HashSet<String>> = HashMap::new();
    seen.entry(Section::Overview)
        .or_default()
        .insert(ANCHOR_TITLE.to_string());

    let mut sections = Vec::with_capacity(raw_sections.len());
    for (section_index, raw_section) in raw_sections.into_iter().enumerate() {
        let path = format!("sections[{section_index}]");
        let name = raw_section
            .section_name
            .ok_or_else(|| InputError::MissingField {
                path: path.clone(),
                field: "sectionName",
            })?;
        let section = config
            .resolve_section_name(&name)
            .ok_or(InputError::UnknownSection(name))?;
        let raw_entries = raw_section.entries.ok_or_else(|| InputError::MissingField {
            path: path.clone(),
            field: "entries",
        })?;

        let titles = seen.entry(section).or_default();
        let mut entries = Vec::with_capacity(raw_entries.len());
        for (entry_index, raw_entry) in raw_entries.into_iter().enumerate() {
            let entry_path = format!("{path}.entries[{entry_index}]");
            let entry = normalize_entry(section, raw_entry, &entry_path)?;
            if !titles.insert(entry.title.clone()) {
                return Err(InputError::DuplicateTitle {
                    section,
                    title: entry.title,
                });
            }
            entries.push(entry);
        }

        debug!(
            "event=section_parsed module=input status=ok section={} entries={}",
            section,
            entries.len()
        );
        sections.push(ReportSection::new(section, entries));
    }

    Ok(Report::new(sections))
}

fn normalize_entry(section: Section, mut raw: RawEntry, path: &str) -> InputResult<Entry> {
    let title = raw.title.take().ok_or_else(|| InputError::MissingField {
        path: path.to_string(),
        field: "title",
    })?;
    let description = raw.description.take().unwrap_or_default();
    let mut entry = Entry::new(title, description);

    for rule in rules_for(section) {
        let Some(field) = rule.field() else {
            continue;
        };
        let value = match raw.take_relation(field) {
            Some(value) => normalize_relation(value),
            None => {
                return Err(InputError::MissingRelation {
                    section,
                    title: entry.title,
                    field,
                })
            }
        };
        let count = value.titles().len();
        if !rule.cardinality.allows(count) {
            return Err(InputError::TooManyTargets {
                section,
                title: entry.title,
                field,
                count,
            });
        }
        entry.set_relation(field, value);
    }

    Ok(entry)
}

fn normalize_relation(raw: RawRelation) -> RelationValue {
    match raw {
        RawRelation::Single(value) if value == NONE_SENTINEL => RelationValue::None,
        RawRelation::Single(title) => RelationValue::Titles(vec![title]),
        RawRelation::Many(targets) => {
            RelationValue::Titles(targets.into_iter().map(|target| target.into_title()).collect())
        }
    }
}
