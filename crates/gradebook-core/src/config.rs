//! Gradebook configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::grading::GradeScale;
use crate::storage::DEFAULT_DATA_FILE;

/// Name of the per-directory config file.
pub const CONFIG_FILE: &str = "gradebook.toml";

/// Top-level gradebook configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradebookConfig {
    /// Where the roster is saved and loaded.
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,
    /// Save automatically when leaving the interactive menu.
    #[serde(default = "default_autosave")]
    pub autosave_on_exit: bool,
    /// Minimum averages for each letter grade.
    #[serde(default)]
    pub grade_scale: GradeScale,
}

fn default_data_file() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_FILE)
}
fn default_autosave() -> bool {
    true
}

impl Default for GradebookConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            autosave_on_exit: default_autosave(),
            grade_scale: GradeScale::default(),
        }
    }
}

impl GradebookConfig {
    /// Parse a TOML document and validate the grade scale.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: GradebookConfig = toml::from_str(content)?;
        config.grade_scale.validate()?;
        Ok(config)
    }
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order without an explicit path:
/// 1. `gradebook.toml` in the current directory
/// 2. `~/.config/gradebook/config.toml`
///
/// Falls back to defaults when neither exists.
pub fn load_config_from(path: Option<&Path>) -> Result<GradebookConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from(CONFIG_FILE);
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = GradebookConfig::from_toml_str(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!("using config {}", path.display());
            Ok(config)
        }
        None => Ok(GradebookConfig::default()),
    }
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("gradebook"))
}
