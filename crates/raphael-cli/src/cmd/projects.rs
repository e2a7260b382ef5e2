//! `rc projects`: the track-record grid with facets and "view more".

use crate::cmd::{ProjectRow, load_catalog};
use crate::output::{CliError, OutputMode, pretty_rule, pretty_section, render_error, render_mode};
use clap::Args;
use raphael_core::config::EffectiveConfig;
use raphael_core::error::ErrorCode;
use raphael_discover::filter::{SectorSelection, StatusSelection};
use raphael_discover::view::TrackRecordView;
use raphael_discover::window::{PageSize, WindowState};
use serde::Serialize;
use std::io::Write;

#[derive(Args, Debug)]
pub struct ProjectsArgs {
    /// Sector name to filter by, or "all".
    #[arg(short, long, default_value = "all")]
    pub sector: String,

    /// Status to filter by: all, current, previous.
    #[arg(long, default_value = "all")]
    pub status: String,

    /// Number of "view more" steps to apply after the first page.
    #[arg(short, long, default_value_t = 0)]
    pub more: usize,
}

/// The grid as the page would render it.
#[derive(Debug, Serialize)]
pub struct ProjectListing {
    pub sector: String,
    pub status: String,
    pub total: usize,
    pub revealed: usize,
    pub has_more: bool,
    pub state: WindowState,
    pub projects: Vec<ProjectRow>,
}

/// Execute `rc projects`.
///
/// # Errors
///
/// Returns an error if the status value is unknown, the catalog cannot be
/// loaded, or output rendering fails.
pub fn run_projects(
    args: &ProjectsArgs,
    output: OutputMode,
    config: &EffectiveConfig,
) -> anyhow::Result<()> {
    let status = match args.status.parse::<StatusSelection>() {
        Ok(status) => status,
        Err(err) => {
            render_error(output, &CliError::coded(ErrorCode::InvalidEnumValue, err.to_string()))?;
            anyhow::bail!("{err}");
        }
    };

    let loaded = load_catalog(config, output)?;
    let grid = &config.project.track_record;
    let mut view = TrackRecordView::new(&loaded.catalog, PageSize::new(grid.rows, grid.columns));
    view.select_sector(SectorSelection::parse(&args.sector));
    view.select_status(status);
    for _ in 0..args.more {
        if !view.show_more() {
            break;
        }
    }

    let snapshot = view.snapshot();
    let listing = ProjectListing {
        sector: snapshot.sector,
        status: snapshot.status,
        total: snapshot.total,
        revealed: snapshot.revealed,
        has_more: snapshot.has_more,
        state: snapshot.state,
        projects: snapshot.visible.into_iter().map(ProjectRow::from).collect(),
    };

    render_mode(
        output,
        &listing,
        |listing, w| render_projects_text(listing, w),
        |listing, w| render_projects_human(listing, args.more, w),
    )
}

fn render_projects_human(
    listing: &ProjectListing,
    more: usize,
    w: &mut dyn Write,
) -> std::io::Result<()> {
    pretty_section(
        w,
        &format!(
            "Track record (sector: {}, status: {})",
            listing.sector, listing.status
        ),
    )?;
    if listing.projects.is_empty() {
        writeln!(w, "No projects match the selected filters.")?;
        return Ok(());
    }
    for row in &listing.projects {
        row.write_pretty_line(w)?;
    }
    pretty_rule(w)?;
    write!(w, "showing {} of {}", listing.revealed, listing.total)?;
    if listing.has_more {
        write!(w, " (rc projects --more {} for more)", more + 1)?;
    }
    writeln!(w)
}

fn render_projects_text(listing: &ProjectListing, w: &mut dyn Write) -> std::io::Result<()> {
    for row in &listing.projects {
        row.write_text_line(w)?;
    }
    writeln!(
        w,
        "# {} of {} ({})",
        listing.revealed,
        listing.total,
        listing.state.as_str()
    )
}
