//! `rc related`: ranked suggestions for a project, with each score's parts.

use crate::cmd::load_catalog;
use crate::cmd::show::find_project;
use crate::output::{OutputMode, pretty_section, render_mode};
use clap::Args;
use raphael_core::config::EffectiveConfig;
use raphael_discover::recommend::{ScoreWeights, rank};
use serde::Serialize;
use std::io::Write;

#[derive(Args, Debug)]
pub struct RelatedArgs {
    /// Reference project slug.
    pub slug: String,

    /// Maximum suggestions (defaults to `[related] limit`).
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct RelatedRow {
    pub rank: usize,
    pub slug: String,
    pub name: String,
    pub score: u32,
    pub shared_sectors: usize,
    pub same_status: bool,
    pub featured: bool,
}

#[derive(Debug, Serialize)]
pub struct RelatedReport {
    pub reference: String,
    pub weights: ScoreWeights,
    pub related: Vec<RelatedRow>,
}

/// Execute `rc related <slug>`.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded, the slug is unknown, or
/// output rendering fails.
pub fn run_related(
    args: &RelatedArgs,
    output: OutputMode,
    config: &EffectiveConfig,
) -> anyhow::Result<()> {
    let loaded = load_catalog(config, output)?;
    let reference = find_project(&loaded.catalog, &args.slug, output)?;
    let weights = ScoreWeights::from(&config.project.related);
    let limit = args.limit.unwrap_or(config.project.related.limit);

    let related = rank(reference, loaded.catalog.projects(), &weights, limit)
        .into_iter()
        .enumerate()
        .map(|(i, suggestion)| RelatedRow {
            rank: i + 1,
            slug: suggestion.project.slug.clone(),
            name: suggestion.project.name.clone(),
            score: suggestion.score.total,
            shared_sectors: suggestion.score.shared_sectors,
            same_status: suggestion.score.same_status,
            featured: suggestion.score.featured,
        })
        .collect();
    let report = RelatedReport {
        reference: reference.slug.clone(),
        weights,
        related,
    };

    render_mode(
        output,
        &report,
        |report, w| {
            for row in &report.related {
                writeln!(w, "{}  {}  {}", row.rank, row.score, row.slug)?;
            }
            Ok(())
        },
        |report, w| render_related_human(report, w),
    )
}

fn render_related_human(report: &RelatedReport, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, &format!("Related to {}", report.reference))?;
    if report.related.is_empty() {
        writeln!(w, "No other projects in the catalog.")?;
        return Ok(());
    }
    writeln!(
        w,
        "{:>2}  {:>5}  {:>6}  {:<6}  {:<8}  name",
        "#", "score", "shared", "status", "featured"
    )?;
    for row in &report.related {
        writeln!(
            w,
            "{:>2}  {:>5}  {:>6}  {:<6}  {:<8}  {}",
            row.rank,
            row.score,
            row.shared_sectors,
            if row.same_status { "same" } else { "-" },
            if row.featured { "yes" } else { "-" },
            row.name
        )?;
    }
    Ok(())
}
