//! Runtime configuration resolved from the environment.
//!
//! # Responsibility
//! - Locate the planner database and log directory.
//! - Pick the log level.
//!
//! # Invariants
//! - Blank environment values count as unset.
//! - Resolved paths are absolute whenever the platform data dir is known.

use crate::logging::{default_log_level, normalize_level};
use std::path::{Path, PathBuf};

pub const ENV_DB_PATH: &str = "PLANBOARD_DB_PATH";
pub const ENV_LOG_LEVEL: &str = "PLANBOARD_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "PLANBOARD_LOG_DIR";

const APP_DIR_NAME: &str = "planboard";
const DB_FILE_NAME: &str = "planboard.sqlite3";
const LOG_DIR_NAME: &str = "logs";

/// Where the planner keeps its state and how loudly it logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannerConfig {
    pub db_path: PathBuf,
    pub log_level: &'static str,
    pub log_dir: PathBuf,
}

impl PlannerConfig {
    /// Resolves configuration from the process environment.
    ///
    /// # Errors
    /// - `PLANBOARD_LOG_LEVEL` is set to an unsupported level.
    pub fn from_env() -> Result<Self, String> {
        Self::resolve(|name| std::env::var(name).ok())
    }

    /// Resolves configuration using `lookup` for variable values.
    pub fn resolve(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let db_path = read(ENV_DB_PATH)
            .map(PathBuf::from)
            .unwrap_or_else(default_db_path);
        let log_level = match read(ENV_LOG_LEVEL) {
            Some(level) => normalize_level(&level)?,
            None => default_log_level(),
        };
        let log_dir = read(ENV_LOG_DIR)
            .map(PathBuf::from)
            .unwrap_or_else(|| log_dir_beside(&db_path));

        Ok(Self {
            db_path,
            log_level,
            log_dir,
        })
    }

    /// Replaces the database path; the log dir follows unless set explicitly.
    pub fn with_db_path(mut self, db_path: impl Into<PathBuf>) -> Self {
        let follows_db = self.log_dir == log_dir_beside(&self.db_path);
        self.db_path = db_path.into();
        if follows_db {
            self.log_dir = log_dir_beside(&self.db_path);
        }
        self
    }

    pub fn with_log_level(mut self, level: &str) -> Result<Self, String> {
        self.log_level = normalize_level(level)?;
        Ok(self)
    }

    /// Creates the database's parent directory when it is missing.
    pub fn ensure_db_dir(&self) -> std::io::Result<()> {
        match self.db_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent),
            _ => Ok(()),
        }
    }
}

fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(APP_DIR_NAME)
        .join(DB_FILE_NAME)
}

fn log_dir_beside(db_path: &Path) -> PathBuf {
    db_path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(std::env::temp_dir)
        .join(LOG_DIR_NAME)
}
