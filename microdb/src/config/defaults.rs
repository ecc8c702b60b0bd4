//! Default connection settings - single source of truth

/// Database opened when none is configured
pub const DATABASE: &str = ":memory:";

/// Special database name for a private in-memory database
pub const IN_MEMORY: &str = ":memory:";

/// Whether connections are opened read-only by default
pub const READ_ONLY: bool = false;
