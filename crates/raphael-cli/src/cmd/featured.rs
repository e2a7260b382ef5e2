//! `rc featured`: projects flagged for the home-page carousel.

use crate::cmd::{ProjectRow, load_catalog};
use crate::output::{OutputMode, render_list};
use clap::Args;
use raphael_core::config::EffectiveConfig;

#[derive(Args, Debug)]
pub struct FeaturedArgs {}

/// Execute `rc featured`.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded or output fails.
pub fn run_featured(
    _args: &FeaturedArgs,
    output: OutputMode,
    config: &EffectiveConfig,
) -> anyhow::Result<()> {
    let loaded = load_catalog(config, output)?;
    let rows: Vec<ProjectRow> = loaded.catalog.featured().map(ProjectRow::from).collect();
    render_list(&rows, output)?;
    Ok(())
}
