//! Catalog store adapter.
//!
//! The hosted CMS owns the content; this module reads an export of it and
//! builds a [`Catalog`]. Loading is best-effort per document: a record that
//! cannot be normalized is skipped and listed in the [`LoadReport`], while an
//! unreadable or syntactically broken export fails the whole load. A sector
//! reference to a deleted sector only costs the project that tag.
//!
//! # Export layouts
//!
//! ```text
//! export.ndjson   one JSON document per line (CMS dataset export)
//! export.json     a JSON array of documents
//! ```

pub mod document;

use serde::Serialize;
use serde_json::Value;
use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::catalog::Catalog;
use crate::error::ErrorCode;
use document::{
    DocumentKind, NormalizedProject, SectorIndex, classify, legacy_project_from_value,
    project_from_value, sector_from_value,
};

/// Errors that abort a catalog load.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog export not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read catalog export {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed JSON in {} at line {line}: {source}", path.display())]
    Json {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

impl CatalogError {
    #[must_use]
    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::NotFound(_) => ErrorCode::CatalogNotFound,
            Self::Io { .. } => ErrorCode::CatalogUnreadable,
            Self::Json { .. } => ErrorCode::CatalogMalformed,
        }
    }

    #[must_use]
    pub fn suggestion(&self) -> String {
        self.error_code()
            .hint()
            .unwrap_or("Check the catalog export and retry.")
            .to_string()
    }
}

/// A document that was left out of the catalog, and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedDocument {
    pub id: String,
    pub reason: String,
}

/// A project sector reference with no sector document behind it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DanglingReference {
    pub project: String,
    pub reference: String,
}

/// Summary of a load: what was read, kept, ignored and skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    pub source: String,
    pub documents: usize,
    pub projects: usize,
    pub sectors: usize,
    /// Drafts and document types the catalog does not use.
    pub ignored: usize,
    pub skipped: Vec<SkippedDocument>,
    /// Tags dropped from kept projects.
    pub dangling_references: Vec<DanglingReference>,
}

/// A loaded catalog together with its report.
#[derive(Debug, Clone)]
pub struct Loaded {
    pub catalog: Catalog,
    pub report: LoadReport,
}

/// Anything that can hand over a materialized catalog.
pub trait CatalogSource {
    /// Human-readable origin, used in logs and reports.
    fn describe(&self) -> String;

    /// Read and normalize the whole catalog.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] when the source cannot be read or parsed.
    fn load(&self) -> Result<Loaded, CatalogError>;
}

/// A CMS export on disk.
#[derive(Debug, Clone)]
pub struct ExportFile {
    path: PathBuf,
}

impl ExportFile {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CatalogSource for ExportFile {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&self) -> Result<Loaded, CatalogError> {
        if !self.path.exists() {
            return Err(CatalogError::NotFound(self.path.clone()));
        }

        let content = std::fs::read_to_string(&self.path).map_err(|source| CatalogError::Io {
            path: self.path.clone(),
            source,
        })?;
        let documents = parse_export(&self.path, &content)?;
        debug!(path = %self.path.display(), documents = documents.len(), "parsed catalog export");

        Ok(assemble(self.describe(), documents))
    }
}

/// Split an export into raw documents. A leading `[` selects the array
/// layout; anything else is read as NDJSON, skipping blank lines.
///
/// # Errors
///
/// Returns [`CatalogError::Json`] with the 1-based line of the first
/// malformed document.
pub fn parse_export(path: &Path, content: &str) -> Result<Vec<Value>, CatalogError> {
    if content.trim_start().starts_with('[') {
        return serde_json::from_str::<Vec<Value>>(content).map_err(|source| CatalogError::Json {
            path: path.to_path_buf(),
            line: source.line(),
            source,
        });
    }

    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            serde_json::from_str::<Value>(line).map_err(|source| CatalogError::Json {
                path: path.to_path_buf(),
                line: index + 1,
                source,
            })
        })
        .collect()
}

/// Normalize raw documents into a catalog.
///
/// Sector documents are read first so project references can resolve
/// regardless of export order. The first project to claim a slug keeps it.
#[must_use]
pub fn assemble(source: String, documents: Vec<Value>) -> Loaded {
    let mut report = LoadReport {
        source,
        documents: documents.len(),
        ..LoadReport::default()
    };

    let mut sectors = Vec::new();
    let mut project_docs = Vec::new();
    for value in documents {
        match classify(&value) {
            DocumentKind::Sector => {
                let id = document_id(&value);
                match sector_from_value(value) {
                    Ok(sector) => sectors.push(sector),
                    Err(err) => skip(&mut report, id, &err),
                }
            }
            kind @ (DocumentKind::Project | DocumentKind::LegacyProject) => {
                project_docs.push((kind, value));
            }
            DocumentKind::Draft => report.ignored += 1,
            DocumentKind::Other(kind) => {
                debug!(kind = %kind, "ignoring document type");
                report.ignored += 1;
            }
        }
    }

    let mut projects = Vec::new();
    {
        let index = SectorIndex::new(&sectors);
        let mut slugs = HashSet::new();
        for (kind, value) in project_docs {
            let id = document_id(&value);
            let normalized = if kind == DocumentKind::LegacyProject {
                legacy_project_from_value(value, &index).map(NormalizedProject::from)
            } else {
                project_from_value(value, &index)
            };
            match normalized {
                Ok(NormalizedProject { project, .. }) if slugs.contains(&project.slug) => {
                    let reason = format!("duplicate slug '{}'", project.slug);
                    warn!(id = %id, reason = %reason, "skipping document");
                    report.skipped.push(SkippedDocument { id, reason });
                }
                Ok(NormalizedProject {
                    project,
                    dangling_references,
                }) => {
                    for reference in dangling_references {
                        warn!(
                            project = %project.slug,
                            reference = %reference,
                            "dropping dangling sector reference"
                        );
                        report.dangling_references.push(DanglingReference {
                            project: project.slug.clone(),
                            reference,
                        });
                    }
                    slugs.insert(project.slug.clone());
                    projects.push(project);
                }
                Err(err) => skip(&mut report, id, &err),
            }
        }
    }

    report.projects = projects.len();
    report.sectors = sectors.len();
    debug!(
        projects = report.projects,
        sectors = report.sectors,
        skipped = report.skipped.len(),
        dangling = report.dangling_references.len(),
        "assembled catalog"
    );

    Loaded {
        catalog: Catalog::new(projects, sectors),
        report,
    }
}

fn document_id(value: &Value) -> String {
    value
        .get("_id")
        .or_else(|| value.get("id"))
        .and_then(Value::as_str)
        .unwrap_or("<unknown>")
        .to_string()
}

fn skip(report: &mut LoadReport, id: String, err: &document::NormalizeError) {
    let reason = err.to_string();
    warn!(id = %id, reason = %reason, "skipping document");
    report.skipped.push(SkippedDocument { id, reason });
}
