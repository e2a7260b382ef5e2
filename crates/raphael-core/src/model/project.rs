use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use super::sector::SectorTag;
use super::{ParseEnumError, normalize};

/// Ordering weight of projects that editors have not ranked.
///
/// Ranked projects sort by weight descending, so unranked ones fall behind any
/// non-negative weight.
pub const UNRANKED_ORDER: i64 = -1;

/// The two lifecycle states of a case study.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Current,
    Previous,
}

impl Status {
    pub const ALL: [Self; 2] = [Self::Current, Self::Previous];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Current => "current",
            Self::Previous => "previous",
        }
    }

    /// Title-case label used on status toggles.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Current => "Current",
            Self::Previous => "Previous",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "current" => Ok(Self::Current),
            "previous" => Ok(Self::Previous),
            _ => Err(ParseEnumError {
                expected: "status",
                got: s.to_string(),
            }),
        }
    }
}

/// An image attached to a project. `asset` is whatever the store uses to
/// locate the binary (CDN url, asset document id, or reference).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    pub asset: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

/// A track-record case study in its canonical shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    /// Store document id.
    pub id: String,
    /// Stable, URL-safe identity.
    pub slug: String,
    pub name: String,
    pub location: String,
    pub status: Status,
    pub sectors: Vec<SectorTag>,
    /// Manual ordering weight; `None` means unranked.
    pub order: Option<i64>,
    pub featured: bool,
    pub summary: String,
    pub year: Option<u16>,
    pub hero_image: Option<ImageRef>,
    pub gallery: Vec<ImageRef>,
}

impl Default for Project {
    fn default() -> Self {
        Self {
            id: String::new(),
            slug: String::new(),
            name: String::new(),
            location: String::new(),
            status: Status::Current,
            sectors: Vec::new(),
            order: None,
            featured: false,
            summary: String::new(),
            year: None,
            hero_image: None,
            gallery: Vec::new(),
        }
    }
}

impl Project {
    /// Minimal project keyed by `slug`; the id mirrors the slug.
    #[must_use]
    pub fn new(slug: &str, name: &str, status: Status) -> Self {
        Self {
            id: slug.to_string(),
            slug: slug.to_string(),
            name: name.to_string(),
            status,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_sectors<'a>(mut self, names: impl IntoIterator<Item = &'a str>) -> Self {
        self.sectors = names.into_iter().map(SectorTag::named).collect();
        self
    }

    #[must_use]
    pub const fn with_featured(mut self, featured: bool) -> Self {
        self.featured = featured;
        self
    }

    #[must_use]
    pub const fn with_order(mut self, order: i64) -> Self {
        self.order = Some(order);
        self
    }

    /// Weight used for catalog ordering, with [`UNRANKED_ORDER`] standing in
    /// for a missing value.
    #[must_use]
    pub fn ordering_weight(&self) -> i64 {
        self.order.unwrap_or(UNRANKED_ORDER)
    }

    pub fn sector_names(&self) -> impl Iterator<Item = &str> {
        self.sectors.iter().map(|tag| tag.name.as_str())
    }

    /// True when any tag is named exactly `name`.
    #[must_use]
    pub fn has_sector(&self, name: &str) -> bool {
        self.sector_names().any(|tag| tag == name)
    }

    #[must_use]
    pub fn is_untagged(&self) -> bool {
        self.sectors.is_empty()
    }

    /// Projects are the same record when their slugs match.
    #[must_use]
    pub fn same_identity(&self, other: &Self) -> bool {
        self.slug == other.slug
    }
}
