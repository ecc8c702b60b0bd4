//! Default configuration values - single source of truth

/// Configuration file looked up when none is given (extension optional)
pub const CONFIG_FILE: &str = "microdb";

/// Prefix of environment variable overrides (`MICRODB_DATABASE`, ...)
pub const ENV_PREFIX: &str = "MICRODB";

/// Database used when nothing else is configured
pub const DATABASE: &str = microdb::config::defaults::DATABASE;

/// Whether to open the database read-only by default
pub const READ_ONLY: bool = microdb::config::defaults::READ_ONLY;
