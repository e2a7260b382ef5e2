//! Raw document shapes found in a content export and their normalization into
//! the canonical model.
//!
//! Two project shapes coexist in exports:
//!
//! - CMS documents (`_type: "project"`), whose sector data went through three
//!   layouts over time: a plain sector name, a single `sector` reference, and
//!   the current `sectors` reference array. Summaries are either plain text or
//!   Portable Text blocks.
//! - Legacy static records with an `id`, a single `sector` name and a
//!   completion `year`, and no `_type`.
//!
//! Everything collapses into [`Project`] here so nothing downstream needs to
//! know which shape a record came from.

use serde::Deserialize;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::str::FromStr;

use crate::model::project::{ImageRef, Project, Status};
use crate::model::sector::{Sector, SectorTag, slugify};

/// Prefix the CMS uses for unpublished drafts.
pub const DRAFT_PREFIX: &str = "drafts.";

/// What an export line turned out to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentKind {
    Sector,
    Project,
    LegacyProject,
    Draft,
    Other(String),
}

/// Classify a raw export document without deserializing it.
#[must_use]
pub fn classify(value: &Value) -> DocumentKind {
    let id = value.get("_id").and_then(Value::as_str);
    if id.is_some_and(|id| id.starts_with(DRAFT_PREFIX)) {
        return DocumentKind::Draft;
    }

    match value.get("_type").and_then(Value::as_str) {
        Some("sector") => DocumentKind::Sector,
        Some("project") => DocumentKind::Project,
        Some(other) => DocumentKind::Other(other.to_string()),
        None if value.get("id").is_some_and(Value::is_string) => DocumentKind::LegacyProject,
        None => DocumentKind::Other(String::from("<untyped>")),
    }
}

/// Why a single document could not be normalized.
#[derive(Debug, thiserror::Error)]
pub enum NormalizeError {
    #[error("document does not match the expected shape: {0}")]
    Shape(#[from] serde_json::Error),

    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("invalid status '{0}' (expected current or previous)")]
    InvalidStatus(String),
}

/// A normalized project and the sector references it carried that no sector
/// document answers to. Those tags are dropped; the project stays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedProject {
    pub project: Project,
    pub dangling_references: Vec<String>,
}

impl From<Project> for NormalizedProject {
    fn from(project: Project) -> Self {
        Self {
            project,
            dangling_references: Vec::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawSlug {
    Plain(String),
    Field { current: String },
}

impl RawSlug {
    fn into_string(self) -> String {
        match self {
            Self::Plain(slug) | Self::Field { current: slug } => slug,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawSectorField {
    Reference {
        #[serde(rename = "_ref")]
        reference: String,
    },
    Expanded {
        #[serde(rename = "_id", default)]
        id: Option<String>,
        name: String,
        #[serde(default)]
        slug: Option<RawSlug>,
    },
    Name(String),
}

#[derive(Debug, Default, Deserialize)]
struct RawSpan {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct RawBlock {
    #[serde(rename = "_type", default)]
    kind: Option<String>,
    #[serde(default)]
    children: Vec<RawSpan>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawSummary {
    Text(String),
    Blocks(Vec<RawBlock>),
}

impl RawSummary {
    fn into_text(self) -> String {
        match self {
            Self::Text(text) => text.trim().to_string(),
            Self::Blocks(blocks) => blocks
                .into_iter()
                .filter(|block| block.kind.as_deref().is_none_or(|kind| kind == "block"))
                .map(|block| {
                    block
                        .children
                        .into_iter()
                        .map(|span| span.text)
                        .collect::<String>()
                })
                .map(|paragraph| paragraph.trim().to_string())
                .filter(|paragraph| !paragraph.is_empty())
                .collect::<Vec<_>>()
                .join("\n\n"),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawAsset {
    #[serde(rename = "_ref", default)]
    reference: Option<String>,
    #[serde(rename = "_id", default)]
    id: Option<String>,
    #[serde(default)]
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawImage {
    #[serde(default)]
    asset: Option<RawAsset>,
    #[serde(default)]
    alt: Option<String>,
    #[serde(default)]
    caption: Option<String>,
}

impl RawImage {
    fn into_image(self) -> Option<ImageRef> {
        let asset = self.asset?;
        let location = asset.url.or(asset.id).or(asset.reference)?;
        Some(ImageRef {
            asset: location,
            alt: non_blank(self.alt),
            caption: non_blank(self.caption),
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSector {
    #[serde(rename = "_id")]
    id: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    slug: Option<RawSlug>,
    #[serde(default)]
    order: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawProject {
    #[serde(rename = "_id")]
    id: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    slug: Option<RawSlug>,
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    sectors: Option<Vec<Option<RawSectorField>>>,
    #[serde(default)]
    sector: Option<RawSectorField>,
    #[serde(default)]
    summary: Option<RawSummary>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    featured: Option<bool>,
    #[serde(default)]
    order: Option<i64>,
    #[serde(default)]
    hero_image: Option<RawImage>,
    #[serde(default)]
    gallery: Option<Vec<RawImage>>,
}

#[derive(Debug, Deserialize)]
struct RawLegacyProject {
    id: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    year: Option<u16>,
    #[serde(default)]
    sector: Option<String>,
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    featured: Option<bool>,
}

/// Sector documents keyed for reference resolution.
#[derive(Debug, Default)]
pub struct SectorIndex<'a> {
    by_id: HashMap<&'a str, &'a Sector>,
    by_name: HashMap<&'a str, &'a Sector>,
}

impl<'a> SectorIndex<'a> {
    #[must_use]
    pub fn new(sectors: &'a [Sector]) -> Self {
        let mut index = Self::default();
        for sector in sectors {
            index.by_id.insert(sector.id.as_str(), sector);
            index.by_name.entry(sector.name.as_str()).or_insert(sector);
        }
        index
    }

    /// Resolve one sector field. `Err` carries a reference id with no
    /// matching sector document.
    fn resolve(&self, field: RawSectorField) -> Result<SectorTag, String> {
        match field {
            RawSectorField::Reference { reference } => self
                .by_id
                .get(reference.as_str())
                .map(|sector| SectorTag::from(*sector))
                .ok_or(reference),
            RawSectorField::Expanded { id, name, slug } => Ok(SectorTag {
                id,
                name,
                slug: slug.map(RawSlug::into_string),
            }),
            RawSectorField::Name(name) => Ok(self.resolve_name(&name)),
        }
    }

    fn resolve_name(&self, name: &str) -> SectorTag {
        self.by_name
            .get(name)
            .map_or_else(|| SectorTag::named(name), |sector| SectorTag::from(*sector))
    }
}

/// Normalize a `_type: "sector"` document.
///
/// # Errors
///
/// Fails when the document is not an object with an `_id` or has no name.
pub fn sector_from_value(value: Value) -> Result<Sector, NormalizeError> {
    let raw: RawSector = serde_json::from_value(value)?;
    let name = non_blank(raw.name).ok_or(NormalizeError::MissingField("name"))?;
    let slug = raw
        .slug
        .map(RawSlug::into_string)
        .filter(|slug| !slug.trim().is_empty())
        .unwrap_or_else(|| slugify(&name));

    Ok(Sector {
        id: raw.id,
        name,
        slug,
        order: raw.order.unwrap_or(0),
    })
}

/// Normalize a `_type: "project"` document, resolving sector references
/// against `sectors`. `null` entries and references to deleted sectors are
/// dropped from the tag list.
///
/// # Errors
///
/// Fails on a missing name or slug, or an unknown status.
pub fn project_from_value(
    value: Value,
    sectors: &SectorIndex<'_>,
) -> Result<NormalizedProject, NormalizeError> {
    let raw: RawProject = serde_json::from_value(value)?;
    let name = non_blank(raw.name).ok_or(NormalizeError::MissingField("name"))?;
    let slug = raw
        .slug
        .map(RawSlug::into_string)
        .filter(|slug| !slug.trim().is_empty())
        .ok_or(NormalizeError::MissingField("slug"))?;
    let status = parse_status(raw.status)?;

    // The array layout wins once it has entries; older documents only carry
    // the single `sector` field.
    let list: Vec<RawSectorField> = raw.sectors.into_iter().flatten().flatten().collect();
    let fields = if list.is_empty() {
        raw.sector.into_iter().collect()
    } else {
        list
    };

    let mut tags = Vec::with_capacity(fields.len());
    let mut dangling_references = Vec::new();
    for field in fields {
        match sectors.resolve(field) {
            Ok(tag) => tags.push(tag),
            Err(reference) => dangling_references.push(reference),
        }
    }

    let project = Project {
        id: raw.id,
        slug,
        name,
        location: raw.location.unwrap_or_default().trim().to_string(),
        status,
        sectors: dedup_tags(tags),
        order: raw.order,
        featured: raw.featured.unwrap_or(false),
        summary: raw.summary.map(RawSummary::into_text).unwrap_or_default(),
        year: None,
        hero_image: raw.hero_image.and_then(RawImage::into_image),
        gallery: raw
            .gallery
            .unwrap_or_default()
            .into_iter()
            .filter_map(RawImage::into_image)
            .collect(),
    };
    Ok(NormalizedProject {
        project,
        dangling_references,
    })
}

/// Normalize a legacy static record (`id`, single `sector` name, `year`).
///
/// # Errors
///
/// Fails on a missing name or an unknown status.
pub fn legacy_project_from_value(
    value: Value,
    sectors: &SectorIndex<'_>,
) -> Result<Project, NormalizeError> {
    let raw: RawLegacyProject = serde_json::from_value(value)?;
    let name = non_blank(raw.name).ok_or(NormalizeError::MissingField("name"))?;
    if raw.id.trim().is_empty() {
        return Err(NormalizeError::MissingField("id"));
    }
    let status = parse_status(raw.status)?;
    let tags = non_blank(raw.sector)
        .map(|sector| sectors.resolve_name(&sector))
        .into_iter()
        .collect();

    Ok(Project {
        slug: raw.id.clone(),
        id: raw.id,
        name,
        location: raw.location.unwrap_or_default().trim().to_string(),
        status,
        sectors: tags,
        order: None,
        featured: raw.featured.unwrap_or(false),
        summary: raw.summary.unwrap_or_default().trim().to_string(),
        year: raw.year,
        hero_image: None,
        gallery: Vec::new(),
    })
}

fn parse_status(raw: Option<String>) -> Result<Status, NormalizeError> {
    match raw {
        None => Ok(Status::default()),
        Some(text) => Status::from_str(&text).map_err(|_| NormalizeError::InvalidStatus(text)),
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

fn dedup_tags(tags: Vec<SectorTag>) -> Vec<SectorTag> {
    let mut seen = HashSet::new();
    tags.into_iter()
        .filter(|tag| seen.insert(tag.name.clone()))
        .collect()
}
