//! In-memory snapshot of the catalog store.
//!
//! Projects are kept in display order (ordering weight descending, unranked
//! last, ties in store order) and sectors in filter-chip order (display order
//! ascending).

use serde::Serialize;
use std::cmp::Reverse;

use crate::model::project::{Project, Status};
use crate::model::sector::Sector;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    projects: Vec<Project>,
    sectors: Vec<Sector>,
}

/// One line of the ordering diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderingRow {
    pub position: usize,
    pub slug: String,
    pub name: String,
    /// Raw weight as stored; `None` when unranked.
    pub order: Option<i64>,
    pub featured: bool,
}

impl Catalog {
    #[must_use]
    pub fn new(mut projects: Vec<Project>, mut sectors: Vec<Sector>) -> Self {
        projects.sort_by_key(|project| Reverse(project.ordering_weight()));
        sectors.sort_by_key(|sector| sector.order);
        Self { projects, sectors }
    }

    #[must_use]
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    #[must_use]
    pub fn sectors(&self) -> &[Sector] {
        &self.sectors
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.projects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    #[must_use]
    pub fn project(&self, slug: &str) -> Option<&Project> {
        self.projects.iter().find(|project| project.slug == slug)
    }

    /// Featured projects in display order (the home-page carousel).
    pub fn featured(&self) -> impl Iterator<Item = &Project> {
        self.projects.iter().filter(|project| project.featured)
    }

    pub fn with_status(&self, status: Status) -> impl Iterator<Item = &Project> {
        self.projects
            .iter()
            .filter(move |project| project.status == status)
    }

    #[must_use]
    pub fn ordering_report(&self) -> Vec<OrderingRow> {
        self.projects
            .iter()
            .enumerate()
            .map(|(index, project)| OrderingRow {
                position: index + 1,
                slug: project.slug.clone(),
                name: project.name.clone(),
                order: project.order,
                featured: project.featured,
            })
            .collect()
    }
}
