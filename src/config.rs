//! Planner configuration.
//!
//! Read from an optional TOML file. Every key has a default, so an absent
//! file and an empty file describe the same setup.

use crate::calendar::{PlanningRange, RangeError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable naming the TOML config file.
pub const CONFIG_ENV: &str = "PLANNER_CONFIG";
/// Environment variable overriding `store.data_dir`.
pub const DATA_DIR_ENV: &str = "PLANNER_DATA_DIR";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid planning range: {0}")]
    Range(#[from] RangeError),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Json,
    Sqlite,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: StoreBackend,
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(".planner")
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            data_dir: default_data_dir(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannerConfig {
    #[serde(default = "default_range_start")]
    pub range_start: NaiveDate,
    #[serde(default = "default_range_end")]
    pub range_end: NaiveDate,
    #[serde(default)]
    pub store: StoreConfig,
}

fn default_range_start() -> NaiveDate {
    PlanningRange::default().start()
}

fn default_range_end() -> NaiveDate {
    PlanningRange::default().end()
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            range_start: default_range_start(),
            range_end: default_range_end(),
            store: StoreConfig::default(),
        }
    }
}

impl PlannerConfig {
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let config: PlannerConfig = toml::from_str(input)?;
        config.range()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Config from `PLANNER_CONFIG` (defaults when unset), then the
    /// `PLANNER_DATA_DIR` override.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::load(PathBuf::from(path))?,
            None => Self::default(),
        };
        if let Some(dir) = std::env::var_os(DATA_DIR_ENV) {
            config.store.data_dir = PathBuf::from(dir);
        }
        Ok(config)
    }

    pub fn range(&self) -> Result<PlanningRange, RangeError> {
        PlanningRange::new(self.range_start, self.range_end)
    }

    pub fn sqlite_path(&self) -> PathBuf {
        self.store.data_dir.join("planner.sqlite3")
    }
}
