// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Project configuration management.
//!
//! Configuration is stored in `.declog/config.toml` and includes:
//! - `prefix`: The prefix for decision IDs (e.g., "exec" → "exec-a1b2c3d4")
//! - `workspace`: Optional directory holding the database instead of `.declog/`
//! - `actor`: Optional default actor recorded in the audit trail

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use dl_core::id::{validate_prefix, DEFAULT_PREFIX};

use crate::error::{Error, Result};

const WORK_DIR_NAME: &str = ".declog";
const CONFIG_FILE_NAME: &str = "config.toml";
const DB_FILE_NAME: &str = "decisions.db";
const GITIGNORE_FILE_NAME: &str = ".gitignore";

fn default_prefix() -> String {
    DEFAULT_PREFIX.to_string()
}

/// Project configuration stored in `.declog/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Prefix for decision IDs (2+ lowercase alphanumeric with at least one letter).
    #[serde(default = "default_prefix")]
    pub prefix: String,
    /// Optional directory for the database (relative to project root or absolute).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace: Option<String>,
    /// Default actor when neither `--actor` nor `DL_ACTOR` is given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actor: Option<String>,
}

impl Config {
    /// Creates a new config with the given prefix.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPrefix`] if prefix is not 2+ lowercase alphanumeric with at least one letter.
    pub fn new(prefix: String) -> Result<Self> {
        if !validate_prefix(&prefix) {
            return Err(Error::InvalidPrefix);
        }
        Ok(Config {
            prefix,
            workspace: None,
            actor: None,
        })
    }

    pub fn with_workspace(mut self, workspace: impl Into<String>) -> Self {
        self.workspace = Some(workspace.into());
        self
    }

    pub fn with_actor(mut self, actor: impl Into<String>) -> Self {
        self.actor = Some(actor.into());
        self
    }

    /// Loads configuration from the given `.declog/` directory.
    pub fn load(work_dir: &Path) -> Result<Self> {
        let config_path = work_dir.join(CONFIG_FILE_NAME);
        let content = fs::read_to_string(&config_path)
            .map_err(|e| Error::Config(format!("failed to read config: {}", e)))?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;
        if !validate_prefix(&config.prefix) {
            return Err(Error::InvalidPrefix);
        }
        Ok(config)
    }

    /// Saves configuration to the given `.declog/` directory.
    pub fn save(&self, work_dir: &Path) -> Result<()> {
        let config_path = work_dir.join(CONFIG_FILE_NAME);
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("failed to serialize config: {}", e)))?;
        fs::write(&config_path, content)?;
        Ok(())
    }
}

/// Find the `.declog` directory by walking up from the current directory.
pub fn find_work_dir() -> Result<PathBuf> {
    find_work_dir_from(&std::env::current_dir()?)
}

/// Find the `.declog` directory by walking up from `start`.
pub fn find_work_dir_from(start: &Path) -> Result<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        let work_dir = current.join(WORK_DIR_NAME);
        if work_dir.is_dir() {
            return Ok(work_dir);
        }
        if !current.pop() {
            return Err(Error::NotInitialized);
        }
    }
}

/// Get the database path from config.
pub fn get_db_path(work_dir: &Path, config: &Config) -> PathBuf {
    match &config.workspace {
        Some(workspace) => {
            let workspace_path = Path::new(workspace);
            if workspace_path.is_absolute() {
                workspace_path.join(DB_FILE_NAME)
            } else {
                // Relative to the project root
                work_dir
                    .parent()
                    .unwrap_or(work_dir)
                    .join(workspace)
                    .join(DB_FILE_NAME)
            }
        }
        None => work_dir.join(DB_FILE_NAME),
    }
}

/// Initialize a new `.declog` directory at `path` with the given config.
pub fn init_work_dir(path: &Path, config: &Config) -> Result<PathBuf> {
    let work_dir = path.join(WORK_DIR_NAME);

    if work_dir.exists() {
        return Err(Error::AlreadyInitialized(work_dir.display().to_string()));
    }

    if let Some(workspace) = &config.workspace {
        let workspace_path = Path::new(workspace);
        let resolved = if workspace_path.is_absolute() {
            workspace_path.to_path_buf()
        } else {
            path.join(workspace)
        };
        if !resolved.is_dir() {
            return Err(Error::WorkspaceNotFound(workspace.clone()));
        }
    }

    fs::create_dir_all(&work_dir)?;
    config.save(&work_dir)?;
    Ok(work_dir)
}

/// Write a .gitignore file to the work directory so the database stays local.
pub fn write_gitignore(work_dir: &Path) -> Result<()> {
    let content = "# Decision database\ndecisions.db\ndecisions.db-wal\ndecisions.db-shm\n";
    fs::write(work_dir.join(GITIGNORE_FILE_NAME), content)?;
    Ok(())
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
