//! Subcommand handlers and the pieces they share: catalog loading and the
//! project row used by every listing.

pub mod check;
pub mod completions;
pub mod contact;
pub mod featured;
pub mod orders;
pub mod projects;
pub mod related;
pub mod sectors;
pub mod show;

use crate::output::{CliError, OutputMode, Renderable, render_error};
use raphael_core::Project;
use raphael_core::config::EffectiveConfig;
use raphael_core::store::{CatalogSource, ExportFile, Loaded};
use serde::Serialize;
use std::io::{self, Write};
use tracing::{debug, warn};

/// Load the configured catalog export, reporting failures on stderr.
pub fn load_catalog(config: &EffectiveConfig, output: OutputMode) -> anyhow::Result<Loaded> {
    let source = ExportFile::new(&config.catalog_path);
    match source.load() {
        Ok(loaded) => {
            debug!(
                source = %source.describe(),
                projects = loaded.report.projects,
                "catalog loaded"
            );
            if !loaded.report.skipped.is_empty() {
                warn!(
                    skipped = loaded.report.skipped.len(),
                    "some documents were skipped; run `rc check` for details"
                );
            }
            if !loaded.report.dangling_references.is_empty() {
                warn!(
                    dangling = loaded.report.dangling_references.len(),
                    "some sector references point at deleted sectors"
                );
            }
            Ok(loaded)
        }
        Err(err) => {
            render_error(output, &CliError::from(&err))?;
            Err(err.into())
        }
    }
}

/// A project as it appears in listings.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectRow {
    pub slug: String,
    pub name: String,
    pub location: String,
    pub status: String,
    pub sectors: Vec<String>,
    pub featured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
}

impl From<&Project> for ProjectRow {
    fn from(project: &Project) -> Self {
        Self {
            slug: project.slug.clone(),
            name: project.name.clone(),
            location: project.location.clone(),
            status: project.status.as_str().to_string(),
            sectors: project.sector_names().map(str::to_string).collect(),
            featured: project.featured,
            order: project.order,
        }
    }
}

impl ProjectRow {
    fn sector_list(&self) -> String {
        if self.sectors.is_empty() {
            "-".to_string()
        } else {
            self.sectors.join(", ")
        }
    }

    /// One aligned line for pretty listings.
    pub fn write_pretty_line(&self, w: &mut dyn Write) -> io::Result<()> {
        let star = if self.featured { "*" } else { " " };
        writeln!(
            w,
            "{star} {:<28} {:<20} {:<9} {}",
            self.name,
            self.location,
            self.status,
            self.sector_list()
        )
    }

    pub fn write_text_line(&self, w: &mut dyn Write) -> io::Result<()> {
        writeln!(
            w,
            "{}  {}  {}  {}",
            self.slug,
            self.status,
            self.sector_list(),
            self.name
        )
    }
}

impl Renderable for ProjectRow {
    const HEADERS: &'static [&'static str] = &["slug", "status", "sectors", "name"];

    fn write_card(&self, w: &mut dyn Write) -> io::Result<()> {
        self.write_pretty_line(w)
    }

    fn write_row(&self, w: &mut dyn Write) -> io::Result<()> {
        self.write_text_line(w)
    }
}
