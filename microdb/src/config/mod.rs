//! Connection settings

pub mod defaults;

use serde::{Deserialize, Serialize};

/// Settings fixed when a connection is opened.
///
/// There is no way to change them on a live connection; open a new one
/// instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Path of the database file, or `:memory:`
    #[serde(default = "default_database")]
    pub database: String,

    /// Open the database read-only
    #[serde(default = "default_read_only")]
    pub read_only: bool,

    /// How long to wait on a locked database before failing
    #[serde(default)]
    pub busy_timeout_ms: Option<u64>,
}

// Default value functions for serde
fn default_database() -> String {
    defaults::DATABASE.to_string()
}
fn default_read_only() -> bool {
    defaults::READ_ONLY
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            database: default_database(),
            read_only: default_read_only(),
            busy_timeout_ms: None,
        }
    }
}

impl ConnectionConfig {
    /// Settings for the database at `database`, everything else default.
    pub fn new(database: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            ..Default::default()
        }
    }

    pub fn in_memory() -> Self {
        Self::new(defaults::IN_MEMORY)
    }

    pub fn read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    pub fn busy_timeout_ms(mut self, timeout: u64) -> Self {
        self.busy_timeout_ms = Some(timeout);
        self
    }

    pub fn is_in_memory(&self) -> bool {
        self.database == defaults::IN_MEMORY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ConnectionConfig::default();
        assert!(config.is_in_memory());
        assert!(!config.read_only);
        assert!(config.busy_timeout_ms.is_none());
    }

    #[test]
    fn test_deserialize_partial() {
        let config: ConnectionConfig =
            serde_json::from_str(r#"{"database": "app.db", "busy_timeout_ms": 250}"#).unwrap();
        assert_eq!(config, ConnectionConfig::new("app.db").busy_timeout_ms(250));
    }
}
