//! Serde mirror of the RAWRR JSON report.
//!
//! Every field is optional here so that missing data is reported by the
//! boundary with a path instead of a bare serde message.

use crate::model::report::RelationField;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct RawReport {
    pub(crate) sections: Option<Vec<RawSection>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawSection {
    pub(crate) section_name: Option<String>,
    pub(crate) entries: Option<Vec<RawEntry>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawEntry {
    pub(crate) title: Option<String>,
    pub(crate) description: Option<String>,
    related_assets: Option<RawRelation>,
    related_asset: Option<RawRelation>,
    // RAWRR exports spell this key `relatedAcivity`.
    #[serde(alias = "relatedAcivity")]
    related_activity: Option<RawRelation>,
    related_threats: Option<RawRelation>,
    related_vulnerabilities: Option<RawRelation>,
}

impl RawEntry {
    pub(crate) fn take_relation(&mut self, field: RelationField) -> Option<RawRelation> {
        match field {
            RelationField::RelatedAssets => self.related_assets.take(),
            RelationField::RelatedAsset => self.related_asset.take(),
            RelationField::RelatedActivity => self.related_activity.take(),
            RelationField::RelatedThreats => self.related_threats.take(),
            RelationField::RelatedVulnerabilities => self.related_vulnerabilities.take(),
        }
    }
}

/// A relation field: either a bare string (title or `"None"`) or a list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum RawRelation {
    Single(String),
    Many(Vec<RawTarget>),
}

/// One list item. RAWRR wraps titles in objects keyed per target section.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum RawTarget {
    Named(NamedTarget),
    Bare(String),
}

impl RawTarget {
    pub(crate) fn into_title(self) -> String {
        match self {
            Self::Named(target) => target.name,
            Self::Bare(title) => title,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct NamedTarget {
    #[serde(
        alias = "assetName",
        alias = "activityName",
        alias = "threatName",
        alias = "vulnerabilityName"
    )]
    name: String,
}
