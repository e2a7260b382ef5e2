#![forbid(unsafe_code)]
//! raphael-discover library.
//!
//! Pure, synchronous discovery logic over an already-loaded catalog:
//!
//! - [`filter`]: sector/status facets and the filter options offered to users
//! - [`recommend`]: weighted-rule related-project suggestions
//! - [`window`]: reveal-in-pages pagination
//! - [`view`]: the track-record view-model tying the three together
//!
//! Nothing here performs I/O. Every function is total over well-formed input,
//! including empty catalogs.
//!
//! # Conventions
//!
//! - **Errors**: only selection parsing can fail; it reuses
//!   [`raphael_core::model::ParseEnumError`].
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod filter;
pub mod recommend;
pub mod view;
pub mod window;

pub use filter::{FilterOption, Selection, SectorSelection, StatusSelection, filter_projects};
pub use recommend::{Score, ScoreWeights, Suggestion, rank, suggest};
pub use view::{TrackRecordView, ViewSnapshot};
pub use window::{PageSize, PaginationWindow, WindowSlice, WindowState, window};
