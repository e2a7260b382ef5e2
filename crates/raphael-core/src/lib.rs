#![forbid(unsafe_code)]
//! raphael-core library.
//!
//! Data model for track-record projects and sectors, the adapter that turns a
//! CMS content export into a [`catalog::Catalog`], configuration loading, and
//! contact-form validation.
//!
//! # Conventions
//!
//! - **Errors**: `thiserror` enums for library failures, `anyhow::Result` where
//!   a caller only needs context (config loading).
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod catalog;
pub mod config;
pub mod contact;
pub mod error;
pub mod model;
pub mod store;

pub use catalog::Catalog;
pub use model::project::{Project, Status};
pub use model::sector::{Sector, SectorTag};
