//! Sector and status facets.
//!
//! A project is visible when it passes both facets. The sector facet passes
//! when the project carries *any* tag with the selected name; the status facet
//! passes on an exact status match. Either facet set to "all" passes
//! everything. Output keeps catalog order.

use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use tracing::trace;

use raphael_core::model::ParseEnumError;
use raphael_core::model::sector::FALLBACK_SECTORS;
use raphael_core::{Project, Sector, Status};

/// Wire value of the catch-all option on both facets.
pub const ALL_VALUE: &str = "all";
const ALL_LABEL: &str = "All";

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum SectorSelection {
    #[default]
    All,
    Named(String),
}

impl SectorSelection {
    /// `"all"` (any case, surrounding whitespace ignored) selects every
    /// sector; anything else is taken as a sector name verbatim.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case(ALL_VALUE) {
            Self::All
        } else {
            Self::Named(raw.to_string())
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::All => ALL_VALUE,
            Self::Named(name) => name,
        }
    }

    #[must_use]
    pub fn matches(&self, project: &Project) -> bool {
        match self {
            Self::All => true,
            Self::Named(name) => project.has_sector(name),
        }
    }
}

impl fmt::Display for SectorSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum StatusSelection {
    #[default]
    All,
    Only(Status),
}

impl StatusSelection {
    /// Every status toggle in display order, All first.
    pub const CHOICES: [Self; 3] = [
        Self::All,
        Self::Only(Status::Current),
        Self::Only(Status::Previous),
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => ALL_LABEL,
            Self::Only(status) => status.label(),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => ALL_VALUE,
            Self::Only(status) => status.as_str(),
        }
    }

    #[must_use]
    pub fn matches(self, project: &Project) -> bool {
        match self {
            Self::All => true,
            Self::Only(status) => project.status == status,
        }
    }
}

impl fmt::Display for StatusSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatusSelection {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case(ALL_VALUE) {
            return Ok(Self::All);
        }
        s.parse::<Status>().map(Self::Only).map_err(|_| ParseEnumError {
            expected: "status filter",
            got: s.to_string(),
        })
    }
}

impl From<Status> for StatusSelection {
    fn from(status: Status) -> Self {
        Self::Only(status)
    }
}

/// The pair of facet values currently chosen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Selection {
    pub sector: SectorSelection,
    pub status: StatusSelection,
}

impl Selection {
    #[must_use]
    pub const fn new(sector: SectorSelection, status: StatusSelection) -> Self {
        Self { sector, status }
    }

    #[must_use]
    pub fn matches(&self, project: &Project) -> bool {
        self.sector.matches(project) && self.status.matches(project)
    }
}

/// Apply both facets, keeping input order.
///
/// Accepts any iterator of project references so an already-filtered list
/// can be filtered again.
pub fn filter_projects<'a, I>(projects: I, selection: &Selection) -> Vec<&'a Project>
where
    I: IntoIterator<Item = &'a Project>,
{
    let visible: Vec<&Project> = projects
        .into_iter()
        .filter(|project| selection.matches(project))
        .collect();
    trace!(
        sector = %selection.sector,
        status = %selection.status,
        visible = visible.len(),
        "applied facets"
    );
    visible
}

/// A chip or toggle the user can pick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterOption {
    pub label: String,
    pub value: String,
}

impl FilterOption {
    fn all() -> Self {
        Self {
            label: ALL_LABEL.to_string(),
            value: ALL_VALUE.to_string(),
        }
    }

    fn named(name: &str) -> Self {
        Self {
            label: name.to_string(),
            value: name.to_string(),
        }
    }
}

/// Sector chips: "All" first, then every sector at least one project carries.
///
/// With sector documents available the chips follow their display order;
/// without any, the built-in [`FALLBACK_SECTORS`] order applies. Sectors no
/// project uses are never offered.
#[must_use]
pub fn sector_options(projects: &[Project], sectors: &[Sector]) -> Vec<FilterOption> {
    let used: HashSet<&str> = projects.iter().flat_map(Project::sector_names).collect();

    let mut options = vec![FilterOption::all()];
    if sectors.is_empty() {
        options.extend(
            FALLBACK_SECTORS
                .iter()
                .filter(|name| used.contains(*name))
                .map(|name| FilterOption::named(name)),
        );
    } else {
        let mut seen = HashSet::new();
        options.extend(
            sectors
                .iter()
                .map(|sector| sector.name.as_str())
                .filter(|name| used.contains(name) && seen.insert(*name))
                .map(FilterOption::named),
        );
    }
    options
}

/// Status toggles: All, Current, Previous.
#[must_use]
pub fn status_options() -> Vec<FilterOption> {
    StatusSelection::CHOICES
        .into_iter()
        .map(|status| FilterOption {
            label: status.label().to_string(),
            value: status.as_str().to_string(),
        })
        .collect()
}
