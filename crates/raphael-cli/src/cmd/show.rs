//! `rc show`: one project's detail page, with its related projects.

use crate::cmd::{ProjectRow, load_catalog};
use crate::output::{
    CliError, OutputMode, pretty_kv, pretty_rule, pretty_section, render_error, render_mode,
};
use clap::Args;
use raphael_core::config::EffectiveConfig;
use raphael_core::error::ErrorCode;
use raphael_core::model::project::ImageRef;
use raphael_core::{Catalog, Project};
use raphael_discover::recommend::{ScoreWeights, rank};
use serde::Serialize;
use std::io::Write;

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Project slug, as listed by `rc projects`.
    pub slug: String,
}

#[derive(Debug, Serialize)]
pub struct ProjectDetail {
    pub id: String,
    pub slug: String,
    pub name: String,
    pub location: String,
    pub status: String,
    pub sectors: Vec<String>,
    pub featured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<u16>,
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hero_image: Option<ImageRef>,
    pub gallery: Vec<ImageRef>,
    pub related: Vec<ProjectRow>,
}

impl ProjectDetail {
    fn new(project: &Project, related: Vec<ProjectRow>) -> Self {
        Self {
            id: project.id.clone(),
            slug: project.slug.clone(),
            name: project.name.clone(),
            location: project.location.clone(),
            status: project.status.label().to_string(),
            sectors: project.sector_names().map(str::to_string).collect(),
            featured: project.featured,
            order: project.order,
            year: project.year,
            summary: project.summary.clone(),
            hero_image: project.hero_image.clone(),
            gallery: project.gallery.clone(),
            related,
        }
    }
}

/// Look up `slug`, rendering a coded error when it is unknown.
pub fn find_project<'c>(
    catalog: &'c Catalog,
    slug: &str,
    output: OutputMode,
) -> anyhow::Result<&'c Project> {
    if let Some(project) = catalog.project(slug) {
        return Ok(project);
    }
    render_error(
        output,
        &CliError::coded(
            ErrorCode::ProjectNotFound,
            format!("project '{slug}' not found"),
        ),
    )?;
    anyhow::bail!("project '{slug}' not found")
}

/// Execute `rc show <slug>`.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded, the slug is unknown, or
/// output rendering fails.
pub fn run_show(args: &ShowArgs, output: OutputMode, config: &EffectiveConfig) -> anyhow::Result<()> {
    let loaded = load_catalog(config, output)?;
    let project = find_project(&loaded.catalog, &args.slug, output)?;

    let related = rank(
        project,
        loaded.catalog.projects(),
        &ScoreWeights::from(&config.project.related),
        config.project.related.limit,
    )
    .into_iter()
    .map(|suggestion| ProjectRow::from(suggestion.project))
    .collect();
    let detail = ProjectDetail::new(project, related);

    render_mode(
        output,
        &detail,
        |detail, w| render_show_text(detail, w),
        |detail, w| render_show_human(detail, w),
    )
}

fn render_show_human(detail: &ProjectDetail, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, &detail.name)?;
    if !detail.location.is_empty() {
        pretty_kv(w, "location", &detail.location)?;
    }
    pretty_kv(w, "status", &detail.status)?;
    if !detail.sectors.is_empty() {
        pretty_kv(w, "sectors", detail.sectors.join(", "))?;
    }
    if let Some(year) = detail.year {
        pretty_kv(w, "year", year.to_string())?;
    }
    if detail.featured {
        pretty_kv(w, "featured", "yes")?;
    }
    if !detail.gallery.is_empty() {
        pretty_kv(w, "gallery", format!("{} images", detail.gallery.len()))?;
    }

    if !detail.summary.is_empty() {
        writeln!(w)?;
        for line in detail.summary.lines() {
            writeln!(w, "{line}")?;
        }
    }

    if !detail.related.is_empty() {
        writeln!(w)?;
        pretty_section(w, "Related projects")?;
        for row in &detail.related {
            row.write_pretty_line(w)?;
        }
        pretty_rule(w)?;
    }
    Ok(())
}

fn render_show_text(detail: &ProjectDetail, w: &mut dyn Write) -> std::io::Result<()> {
    writeln!(w, "{}  {}", detail.slug, detail.name)?;
    writeln!(w, "location  {}", detail.location)?;
    writeln!(w, "status  {}", detail.status)?;
    writeln!(w, "sectors  {}", detail.sectors.join(", "))?;
    for row in &detail.related {
        writeln!(w, "related  {}", row.slug)?;
    }
    Ok(())
}
