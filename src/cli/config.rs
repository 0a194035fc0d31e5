//! Configuration file for the shapeguard CLI
//!
//! JSON, every key optional:
//! - `extra_field_policy`: "strict" (default) or "lenient"
//! - `log_level`: "trace", "info", "warn" (default) or "error"
//! - `schema_dir`: default directory for schema files

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::errors::{CliError, CliResult};
use crate::observability::Severity;
use crate::schema::ExtraFieldPolicy;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub extra_field_policy: ExtraFieldPolicy,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub schema_dir: Option<PathBuf>,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            extra_field_policy: ExtraFieldPolicy::default(),
            log_level: default_log_level(),
            schema_dir: None,
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        self.log_severity()?;

        if let Some(dir) = &self.schema_dir {
            if dir.as_os_str().is_empty() {
                return Err(CliError::config_error("schema_dir must not be empty"));
            }
        }

        Ok(())
    }

    pub fn log_severity(&self) -> CliResult<Severity> {
        self.log_level
            .parse()
            .map_err(|e: String| CliError::config_error(format!("Invalid log_level: {}", e)))
    }
}
