//! Configuration settings for microdb-cli

use config::{Config, Environment, File};
use microdb::ConnectionConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::defaults;
use crate::error::{CliError, Result};

/// Main configuration struct for the command-line tool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CliConfig {
    /// Path to the database file, or `:memory:`
    #[serde(default = "default_database")]
    pub database: String,

    /// Open the database read-only
    #[serde(default = "default_read_only")]
    pub read_only: bool,

    /// How long to wait on a locked database, in milliseconds
    #[serde(default)]
    pub busy_timeout_ms: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    /// Can be overridden by RUST_LOG env var
    #[serde(default)]
    pub log_level: Option<String>,
}

// Default value functions for serde
fn default_database() -> String {
    defaults::DATABASE.to_string()
}
fn default_read_only() -> bool {
    defaults::READ_ONLY
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            database: default_database(),
            read_only: default_read_only(),
            busy_timeout_ms: None,
            log_level: None,
        }
    }
}

impl CliConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: CliConfig = toml::from_str(&content).map_err(|e| {
            CliError::ConfigError(format!(
                "Failed to parse config file {}: {}",
                path.display(),
                e
            ))
        })?;
        Ok(config)
    }

    /// Load configuration using config-rs (file + environment variables)
    ///
    /// An explicit `config_path` is read with [`CliConfig::from_file`], so it
    /// must be TOML whatever its extension. Without one, `microdb.toml` is
    /// used when present.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();

        if let Some(path) = config_path {
            let file_config = Self::from_file(path)?;
            builder = builder.add_source(Config::try_from(&file_config)?);
        } else {
            // Try default locations
            builder = builder.add_source(File::with_name(defaults::CONFIG_FILE).required(false));
        }

        // Override with environment variables (MICRODB_*)
        builder = builder.add_source(Environment::with_prefix(defaults::ENV_PREFIX));

        let config: CliConfig = builder.build()?.try_deserialize()?;

        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.database.trim().is_empty() {
            return Err(CliError::ValidationError("database is required".into()));
        }

        if self.read_only && self.database == microdb::config::defaults::IN_MEMORY {
            return Err(CliError::ValidationError(
                "a read-only in-memory database is always empty".into(),
            ));
        }

        Ok(())
    }

    /// Settings used to open the connection
    pub fn connection(&self) -> ConnectionConfig {
        ConnectionConfig {
            database: self.database.clone(),
            read_only: self.read_only,
            busy_timeout_ms: self.busy_timeout_ms,
        }
    }
}
