//! Subcommand implementations.

pub mod add;
pub mod delete;
pub mod init;
pub mod list;
pub mod report;
pub mod score;
pub mod shell;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use gradebook_core::config::load_config_from;
use gradebook_core::grading::GradeScale;
use gradebook_core::roster::Roster;
use gradebook_core::storage;

/// Effective settings after merging the config file with command-line flags.
#[derive(Debug, Clone)]
pub struct Settings {
    pub data_file: PathBuf,
    pub autosave_on_exit: bool,
    pub grade_scale: GradeScale,
}

impl Settings {
    pub fn resolve(config_path: Option<&Path>, data_file: Option<PathBuf>) -> Result<Self> {
        let config = load_config_from(config_path)?;
        let settings = Self {
            data_file: data_file.unwrap_or(config.data_file),
            autosave_on_exit: config.autosave_on_exit,
            grade_scale: config.grade_scale,
        };
        tracing::debug!(?settings, "resolved settings");
        Ok(settings)
    }

    /// Load the roster, treating a missing data file as an empty roster.
    pub fn load_roster(&self) -> Result<Roster> {
        storage::load_or_default(&self.data_file)
            .with_context(|| format!("failed to load {}", self.data_file.display()))
    }

    pub fn save_roster(&self, roster: &Roster) -> Result<()> {
        storage::save(roster, &self.data_file)
            .with_context(|| format!("failed to save {}", self.data_file.display()))
    }
}
