//! `gibi.toml` configuration.
//!
//! ```toml
//! [logging]
//! level = "info"
//! file = "gibi.log"
//!
//! [output]
//! format = "json"
//!
//! # Optional: replaces the shipped rate schedule entirely.
//! [schedule]
//! pension_rate = "0.07"
//! # ...
//! [[schedule.employment_brackets]]
//! upper_bound = "2000"
//! rate = "0"
//! ```

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use gibi_core::{RateSchedule, RateScheduleError};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::output::OutputFormat;

/// File looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "gibi.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid rate schedule: {0}")]
    Schedule(#[from] RateScheduleError),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log filter used when neither `--log-level` nor `RUST_LOG` is set.
    pub level: String,
    /// Appends log records to this file as well as stderr.
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub output: OutputConfig,
    /// Replacement rate schedule; the shipped one is used when absent.
    pub schedule: Option<RateSchedule>,
}

impl AppConfig {
    /// Parses and validates configuration text.
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(input)?;
        if let Some(schedule) = &config.schedule {
            schedule.validate()?;
        }
        Ok(config)
    }

    /// Loads configuration from `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded config file");
        Self::from_toml_str(&text)
    }

    /// Loads [`DEFAULT_CONFIG_FILE`] from `dir` if it exists, otherwise
    /// returns the defaults.
    pub fn discover(dir: &Path) -> Result<Self, ConfigError> {
        let path = dir.join(DEFAULT_CONFIG_FILE);
        if path.is_file() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// The schedule calculations should use.
    pub fn schedule(&self) -> RateSchedule {
        self.schedule.clone().unwrap_or_default()
    }
}
