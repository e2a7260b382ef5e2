//! `rc sectors`: the filter chips the track-record page offers.

use crate::cmd::load_catalog;
use crate::output::{OutputMode, pretty_kv, pretty_section, render_mode};
use clap::Args;
use raphael_core::Catalog;
use raphael_core::config::EffectiveConfig;
use raphael_discover::filter::{
    Selection, SectorSelection, StatusSelection, filter_projects, sector_options,
};
use serde::Serialize;
use std::io::Write;

#[derive(Args, Debug)]
pub struct SectorsArgs {}

/// A filter option and how many projects it would show on its own.
#[derive(Debug, Serialize)]
pub struct OptionCount {
    pub label: String,
    pub value: String,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct FilterOptions {
    pub sectors: Vec<OptionCount>,
    pub statuses: Vec<OptionCount>,
}

fn count(catalog: &Catalog, selection: &Selection) -> usize {
    filter_projects(catalog.projects(), selection).len()
}

fn collect_options(catalog: &Catalog) -> FilterOptions {
    let sectors = sector_options(catalog.projects(), catalog.sectors())
        .into_iter()
        .map(|option| {
            let selection =
                Selection::new(SectorSelection::parse(&option.value), StatusSelection::All);
            OptionCount {
                count: count(catalog, &selection),
                label: option.label,
                value: option.value,
            }
        })
        .collect();

    let statuses = StatusSelection::CHOICES
        .into_iter()
        .map(|status| OptionCount {
            label: status.label().to_string(),
            value: status.as_str().to_string(),
            count: count(catalog, &Selection::new(SectorSelection::All, status)),
        })
        .collect();

    FilterOptions { sectors, statuses }
}

/// Execute `rc sectors`.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded or output fails.
pub fn run_sectors(
    _args: &SectorsArgs,
    output: OutputMode,
    config: &EffectiveConfig,
) -> anyhow::Result<()> {
    let loaded = load_catalog(config, output)?;
    let options = collect_options(&loaded.catalog);

    render_mode(
        output,
        &options,
        |options, w| {
            for option in options.sectors.iter().chain(&options.statuses) {
                writeln!(w, "{}  {}", option.value, option.count)?;
            }
            Ok(())
        },
        |options, w| {
            pretty_section(w, "Sectors")?;
            for option in &options.sectors {
                pretty_kv(w, &option.label, option.count.to_string())?;
            }
            writeln!(w)?;
            pretty_section(w, "Status")?;
            for option in &options.statuses {
                pretty_kv(w, &option.label, option.count.to_string())?;
            }
            Ok(())
        },
    )
}
