//! Reveal-in-pages pagination.
//!
//! The track record shows a fixed grid of cards and a "view more" control.
//! Each step reveals one more page; the count only ever goes back to a single
//! page when the facet selection changes.
//!
//! ```text
//!            show_more (more remain)          show_more (reaches end)
//! Collapsed ------------------------> Expanded --------------------> Exhausted
//!     ^                                  |                               |
//!     +------------ selection changed ---+-------------------------------+
//! ```

use serde::{Deserialize, Serialize};
use tracing::trace;

/// Grid shape of one page. Both dimensions are at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSize {
    rows: usize,
    columns: usize,
}

impl PageSize {
    /// Two rows of three cards.
    pub const DEFAULT: Self = Self {
        rows: 2,
        columns: 3,
    };

    /// Zero dimensions are raised to 1.
    #[must_use]
    pub const fn new(rows: usize, columns: usize) -> Self {
        Self {
            rows: if rows == 0 { 1 } else { rows },
            columns: if columns == 0 { 1 } else { columns },
        }
    }

    #[must_use]
    pub const fn rows(self) -> usize {
        self.rows
    }

    #[must_use]
    pub const fn columns(self) -> usize {
        self.columns
    }

    /// Cards per page.
    #[must_use]
    pub const fn items(self) -> usize {
        self.rows.saturating_mul(self.columns)
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowState {
    /// One page revealed.
    Collapsed,
    /// More than one page revealed, more remain.
    Expanded,
    /// Nothing left to reveal after expanding.
    Exhausted,
}

impl WindowState {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Collapsed => "collapsed",
            Self::Expanded => "expanded",
            Self::Exhausted => "exhausted",
        }
    }
}

/// The visible prefix of a filtered list.
#[derive(Debug, PartialEq, Eq)]
pub struct WindowSlice<'s, T> {
    pub visible: &'s [T],
    pub has_more: bool,
}

/// First `revealed` items of `filtered`, and whether anything is hidden.
#[must_use]
pub fn window<T>(filtered: &[T], revealed: usize) -> WindowSlice<'_, T> {
    let end = revealed.min(filtered.len());
    WindowSlice {
        visible: &filtered[..end],
        has_more: filtered.len() > revealed,
    }
}

/// Reveal counter for one filtered list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaginationWindow {
    page_size: usize,
    revealed: usize,
}

impl PaginationWindow {
    #[must_use]
    pub const fn new(page: PageSize) -> Self {
        let page_size = page.items();
        Self {
            page_size,
            revealed: page_size,
        }
    }

    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    #[must_use]
    pub const fn revealed(&self) -> usize {
        self.revealed
    }

    /// Back to a single page.
    pub const fn reset(&mut self) {
        self.revealed = self.page_size;
    }

    #[must_use]
    pub const fn has_more(&self, filtered_len: usize) -> bool {
        filtered_len > self.revealed
    }

    /// Reveal one more page, never past the end of the list.
    ///
    /// Returns `false`, leaving the window untouched, when nothing is hidden.
    pub fn show_more(&mut self, filtered_len: usize) -> bool {
        if !self.has_more(filtered_len) {
            return false;
        }
        self.revealed = self
            .revealed
            .saturating_add(self.page_size)
            .min(filtered_len);
        trace!(revealed = self.revealed, total = filtered_len, "revealed next page");
        true
    }

    #[must_use]
    pub const fn state(&self, filtered_len: usize) -> WindowState {
        if self.revealed <= self.page_size {
            WindowState::Collapsed
        } else if self.revealed >= filtered_len {
            WindowState::Exhausted
        } else {
            WindowState::Expanded
        }
    }

    #[must_use]
    pub fn slice<'s, T>(&self, filtered: &'s [T]) -> WindowSlice<'s, T> {
        window(filtered, self.revealed)
    }
}

impl Default for PaginationWindow {
    fn default() -> Self {
        Self::new(PageSize::DEFAULT)
    }
}
