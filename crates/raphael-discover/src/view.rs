//! Track-record view-model.
//!
//! Owns the facet selection and the pagination window for one catalog, and
//! keeps them consistent: changing either facet to a different value collapses
//! the window back to a single page.

use serde::Serialize;
use tracing::debug;

use raphael_core::{Catalog, Project};

use crate::filter::{
    FilterOption, Selection, SectorSelection, StatusSelection, filter_projects, sector_options,
};
use crate::window::{PageSize, PaginationWindow, WindowState};

#[derive(Debug, Clone)]
pub struct TrackRecordView<'c> {
    catalog: &'c Catalog,
    selection: Selection,
    window: PaginationWindow,
}

/// What the page renders right now.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewSnapshot<'c> {
    pub sector: String,
    pub status: String,
    /// Size of the filtered list.
    pub total: usize,
    pub revealed: usize,
    pub has_more: bool,
    pub state: WindowState,
    pub visible: Vec<&'c Project>,
}

impl<'c> TrackRecordView<'c> {
    #[must_use]
    pub const fn new(catalog: &'c Catalog, page: PageSize) -> Self {
        Self {
            catalog,
            selection: Selection::new(SectorSelection::All, StatusSelection::All),
            window: PaginationWindow::new(page),
        }
    }

    #[must_use]
    pub const fn selection(&self) -> &Selection {
        &self.selection
    }

    #[must_use]
    pub const fn window(&self) -> &PaginationWindow {
        &self.window
    }

    /// Returns `true` when the selection actually changed.
    pub fn select_sector(&mut self, sector: SectorSelection) -> bool {
        if self.selection.sector == sector {
            return false;
        }
        debug!(from = %self.selection.sector, to = %sector, "sector facet changed");
        self.selection.sector = sector;
        self.window.reset();
        true
    }

    /// Returns `true` when the selection actually changed.
    pub fn select_status(&mut self, status: StatusSelection) -> bool {
        if self.selection.status == status {
            return false;
        }
        debug!(from = %self.selection.status, to = %status, "status facet changed");
        self.selection.status = status;
        self.window.reset();
        true
    }

    #[must_use]
    pub fn filtered(&self) -> Vec<&'c Project> {
        filter_projects(self.catalog.projects(), &self.selection)
    }

    /// Reveal another page of the current filtered list.
    pub fn show_more(&mut self) -> bool {
        let total = self.filtered().len();
        self.window.show_more(total)
    }

    #[must_use]
    pub fn snapshot(&self) -> ViewSnapshot<'c> {
        let filtered = self.filtered();
        let slice = self.window.slice(&filtered);
        ViewSnapshot {
            sector: self.selection.sector.to_string(),
            status: self.selection.status.to_string(),
            total: filtered.len(),
            revealed: slice.visible.len(),
            has_more: slice.has_more,
            state: self.window.state(filtered.len()),
            visible: slice.visible.to_vec(),
        }
    }

    /// Sector chips for the whole catalog, independent of the current facets.
    #[must_use]
    pub fn sector_options(&self) -> Vec<FilterOption> {
        sector_options(self.catalog.projects(), self.catalog.sectors())
    }
}
