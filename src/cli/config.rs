//! Configuration file
//!
//! ```json
//! {
//!   "schema_dir": "./schemas",
//!   "collection_wrapper": "ObjectCollection",
//!   "log_level": "info"
//! }
//! ```
//!
//! A relative `schema_dir` is resolved against the config file's directory.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use super::errors::{CliError, CliResult};
use crate::observability::Severity;

/// Configuration file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory of `*.json` schema files (required)
    pub schema_dir: String,

    /// Collection wrapper applied to nested-object lists (optional)
    #[serde(default)]
    pub collection_wrapper: Option<String>,

    /// Minimum log severity (optional, default "warn")
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Directory the config was loaded from
    #[serde(skip)]
    base_dir: PathBuf,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::Config(format!("Failed to read config: {}", e)))?;

        let mut config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::Config(format!("Invalid config JSON: {}", e)))?;

        config.base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        if self.schema_dir.trim().is_empty() {
            return Err(CliError::Config("schema_dir must not be empty".into()));
        }

        self.severity()?;

        if let Some(wrapper) = &self.collection_wrapper {
            if wrapper.trim().is_empty() {
                return Err(CliError::Config("collection_wrapper must not be empty".into()));
            }
        }

        Ok(())
    }

    /// The configured minimum log severity
    pub fn severity(&self) -> CliResult<Severity> {
        Severity::parse(&self.log_level).ok_or_else(|| {
            CliError::Config(format!(
                "Invalid log_level: '{}'. Expected trace, info, warn, error or fatal.",
                self.log_level
            ))
        })
    }

    /// Schema directory, resolved against the config file location
    pub fn schema_path(&self) -> PathBuf {
        let dir = Path::new(&self.schema_dir);
        if dir.is_absolute() {
            dir.to_path_buf()
        } else {
            self.base_dir.join(dir)
        }
    }
}
