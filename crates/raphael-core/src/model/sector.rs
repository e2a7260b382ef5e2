use serde::{Deserialize, Serialize};

/// Sector names offered as filters when the store carries no sector documents.
pub const FALLBACK_SECTORS: [&str; 6] = [
    "Retail",
    "Office",
    "Industrial",
    "Mixed Use",
    "Residential",
    "Development",
];

/// A named facet value. `order` sorts filter chips ascending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sector {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub order: i64,
}

impl Sector {
    /// Build a sector with an id and slug derived from its name.
    #[must_use]
    pub fn new(name: &str, order: i64) -> Self {
        let slug = slugify(name);
        Self {
            id: format!("sector-{slug}"),
            name: name.to_string(),
            slug,
            order,
        }
    }
}

/// A project's reference to a sector. Matching is always by `name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectorTag {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
}

impl SectorTag {
    /// A tag that carries only a display name.
    #[must_use]
    pub fn named(name: &str) -> Self {
        Self {
            id: None,
            name: name.to_string(),
            slug: None,
        }
    }
}

impl From<&Sector> for SectorTag {
    fn from(sector: &Sector) -> Self {
        Self {
            id: Some(sector.id.clone()),
            name: sector.name.clone(),
            slug: Some(sector.slug.clone()),
        }
    }
}

/// Lowercase `name` and collapse each whitespace run into a single `-`.
#[must_use]
pub fn slugify(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}
