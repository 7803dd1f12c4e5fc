//! Configuration file (`tweetstore.json`)
//!
//! ```json
//! {
//!   "data_dir": "./tweets",
//!   "length_unit": "chars",
//!   "lamports_per_byte_year": 3480,
//!   "exemption_threshold_years": 2,
//!   "log_level": "info"
//! }
//! ```
//!
//! Only `data_dir` is required.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::observability::Severity;
use crate::store::Rent;
use crate::validator::LengthUnit;

/// Default config file name
pub const DEFAULT_CONFIG_FILE: &str = "tweetstore.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Store configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TweetConfig {
    /// Data directory (required)
    pub data_dir: PathBuf,

    /// How topic and content lengths are counted
    #[serde(default)]
    pub length_unit: LengthUnit,

    #[serde(default = "default_lamports_per_byte_year")]
    pub lamports_per_byte_year: u64,

    #[serde(default = "default_exemption_threshold_years")]
    pub exemption_threshold_years: u64,

    /// Minimum log severity: trace, info, warn, error or fatal
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_lamports_per_byte_year() -> u64 {
    Rent::default().lamports_per_byte_year
}
fn default_exemption_threshold_years() -> u64 {
    Rent::default().exemption_threshold_years
}
fn default_log_level() -> String {
    "info".to_string()
}

impl TweetConfig {
    /// Configuration with defaults for everything but the data directory
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            length_unit: LengthUnit::default(),
            lamports_per_byte_year: default_lamports_per_byte_year(),
            exemption_threshold_years: default_exemption_threshold_years(),
            log_level: default_log_level(),
        }
    }

    /// Load and validate configuration from `path`
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// Parse and validate configuration text
    pub fn from_json(content: &str) -> ConfigResult<Self> {
        let config: TweetConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> ConfigResult<()> {
        if self.data_dir.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("data_dir must not be empty".into()));
        }
        if self.lamports_per_byte_year == 0 {
            return Err(ConfigError::Invalid("lamports_per_byte_year must be > 0".into()));
        }
        if self.exemption_threshold_years == 0 {
            return Err(ConfigError::Invalid(
                "exemption_threshold_years must be > 0".into(),
            ));
        }
        self.log_severity()?;
        Ok(())
    }

    pub fn data_path(&self) -> &Path {
        &self.data_dir
    }

    pub fn rent(&self) -> Rent {
        Rent {
            lamports_per_byte_year: self.lamports_per_byte_year,
            exemption_threshold_years: self.exemption_threshold_years,
        }
    }

    /// Parsed `log_level`
    pub fn log_severity(&self) -> ConfigResult<Severity> {
        self.log_level.parse().map_err(ConfigError::Invalid)
    }
}
