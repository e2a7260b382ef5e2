//! `rc check`: load the catalog and report what was kept, ignored and skipped.

use crate::cmd::load_catalog;
use crate::output::{OutputMode, pretty_kv, pretty_section, render_mode};
use clap::Args;
use raphael_core::config::EffectiveConfig;
use raphael_core::store::LoadReport;
use raphael_core::{Catalog, Status};
use serde::Serialize;
use std::io::Write;

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Exit non-zero when any document was skipped.
    #[arg(long)]
    pub strict: bool,
}

#[derive(Debug, Serialize)]
pub struct CheckReport {
    #[serde(flatten)]
    pub load: LoadReport,
    pub current: usize,
    pub previous: usize,
    pub featured: usize,
    pub untagged: Vec<String>,
}

impl CheckReport {
    fn new(load: LoadReport, catalog: &Catalog) -> Self {
        Self {
            load,
            current: catalog.with_status(Status::Current).count(),
            previous: catalog.with_status(Status::Previous).count(),
            featured: catalog.featured().count(),
            untagged: catalog
                .projects()
                .iter()
                .filter(|project| project.is_untagged())
                .map(|project| project.slug.clone())
                .collect(),
        }
    }
}

/// Execute `rc check`.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded, output fails, or
/// `--strict` is set and documents were skipped.
pub fn run_check(args: &CheckArgs, output: OutputMode, config: &EffectiveConfig) -> anyhow::Result<()> {
    let loaded = load_catalog(config, output)?;
    let report = CheckReport::new(loaded.report, &loaded.catalog);

    render_mode(
        output,
        &report,
        |report, w| render_check_text(report, w),
        |report, w| render_check_human(report, w),
    )?;

    let skipped = report.load.skipped.len();
    if args.strict && skipped > 0 {
        anyhow::bail!("{skipped} document(s) skipped");
    }
    Ok(())
}

fn render_check_human(report: &CheckReport, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, &format!("Catalog {}", report.load.source))?;
    pretty_kv(w, "documents", report.load.documents.to_string())?;
    pretty_kv(w, "projects", report.load.projects.to_string())?;
    pretty_kv(w, "  current", report.current.to_string())?;
    pretty_kv(w, "  previous", report.previous.to_string())?;
    pretty_kv(w, "  featured", report.featured.to_string())?;
    pretty_kv(w, "sectors", report.load.sectors.to_string())?;
    pretty_kv(w, "ignored", report.load.ignored.to_string())?;
    pretty_kv(w, "skipped", report.load.skipped.len().to_string())?;

    if !report.load.skipped.is_empty() {
        writeln!(w)?;
        pretty_section(w, "Skipped documents")?;
        for skipped in &report.load.skipped {
            writeln!(w, "{}: {}", skipped.id, skipped.reason)?;
        }
    }
    if !report.load.dangling_references.is_empty() {
        writeln!(w)?;
        pretty_section(w, "Dropped sector references")?;
        for dangling in &report.load.dangling_references {
            writeln!(w, "{}: {}", dangling.project, dangling.reference)?;
        }
    }
    if !report.untagged.is_empty() {
        writeln!(w)?;
        pretty_section(w, "Projects without sectors")?;
        for slug in &report.untagged {
            writeln!(w, "{slug}")?;
        }
    }
    Ok(())
}

fn render_check_text(report: &CheckReport, w: &mut dyn Write) -> std::io::Result<()> {
    writeln!(
        w,
        "documents={} projects={} sectors={} ignored={} skipped={}",
        report.load.documents,
        report.load.projects,
        report.load.sectors,
        report.load.ignored,
        report.load.skipped.len()
    )?;
    for skipped in &report.load.skipped {
        writeln!(w, "skipped  {}  {}", skipped.id, skipped.reason)?;
    }
    for dangling in &report.load.dangling_references {
        writeln!(w, "dangling  {}  {}", dangling.project, dangling.reference)?;
    }
    for slug in &report.untagged {
        writeln!(w, "untagged  {slug}")?;
    }
    Ok(())
}
