use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable that overrides the configured catalog export path.
pub const CATALOG_ENV: &str = "RAPHAEL_CATALOG";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub track_record: TrackRecordConfig,
    #[serde(default)]
    pub related: RelatedConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default = "default_catalog_path")]
    pub path: PathBuf,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: default_catalog_path(),
        }
    }
}

/// Grid shape of the track-record page; one page is `rows * columns` cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackRecordConfig {
    #[serde(default = "default_rows")]
    pub rows: usize,
    #[serde(default = "default_columns")]
    pub columns: usize,
}

impl Default for TrackRecordConfig {
    fn default() -> Self {
        Self {
            rows: default_rows(),
            columns: default_columns(),
        }
    }
}

/// Related-project suggestion size and scoring weights.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedConfig {
    #[serde(default = "default_related_limit")]
    pub limit: usize,
    #[serde(default = "default_sector_match")]
    pub sector_match: u32,
    #[serde(default = "default_extra_sector")]
    pub extra_sector: u32,
    #[serde(default = "default_same_status")]
    pub same_status: u32,
    #[serde(default = "default_featured")]
    pub featured: u32,
}

impl Default for RelatedConfig {
    fn default() -> Self {
        Self {
            limit: default_related_limit(),
            sector_match: default_sector_match(),
            extra_sector: default_extra_sector(),
            same_status: default_same_status(),
            featured: default_featured(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct UserConfig {
    #[serde(default)]
    pub output: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectiveConfig {
    pub project: ProjectConfig,
    pub user: UserConfig,
    pub catalog_path: PathBuf,
}

pub fn load_project_config(project_root: &Path) -> Result<ProjectConfig> {
    let path = project_root.join(".raphael/config.toml");
    if !path.exists() {
        return Ok(ProjectConfig::default());
    }

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<ProjectConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

pub fn load_user_config() -> Result<UserConfig> {
    let Some(config_dir) = dirs::config_dir() else {
        return Ok(UserConfig::default());
    };

    let path = config_dir.join("raphael/config.toml");
    if !path.exists() {
        return Ok(UserConfig::default());
    }

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<UserConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

/// Load both config layers and settle the catalog path.
///
/// Precedence for the catalog path: `cli_catalog`, then `RAPHAEL_CATALOG`,
/// then `[catalog] path`. Relative paths resolve against `project_root`.
pub fn resolve_config(project_root: &Path, cli_catalog: Option<&Path>) -> Result<EffectiveConfig> {
    let project = load_project_config(project_root)?;
    let user = load_user_config()?;

    let env_catalog = std::env::var_os(CATALOG_ENV).map(PathBuf::from);
    let catalog_path = resolve_catalog_path(project_root, &project, cli_catalog, env_catalog);

    Ok(EffectiveConfig {
        project,
        user,
        catalog_path,
    })
}

fn resolve_catalog_path(
    project_root: &Path,
    project: &ProjectConfig,
    cli_catalog: Option<&Path>,
    env_catalog: Option<PathBuf>,
) -> PathBuf {
    let chosen = cli_catalog
        .map(Path::to_path_buf)
        .or_else(|| env_catalog.filter(|path| !path.as_os_str().is_empty()))
        .unwrap_or_else(|| project.catalog.path.clone());

    if chosen.is_absolute() {
        chosen
    } else {
        project_root.join(chosen)
    }
}

fn default_catalog_path() -> PathBuf {
    PathBuf::from("content/export.ndjson")
}

const fn default_rows() -> usize {
    2
}

const fn default_columns() -> usize {
    3
}

const fn default_related_limit() -> usize {
    3
}

const fn default_sector_match() -> u32 {
    100
}

const fn default_extra_sector() -> u32 {
    20
}

const fn default_same_status() -> u32 {
    50
}

const fn default_featured() -> u32 {
    10
}
