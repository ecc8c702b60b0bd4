//! microdb-cli: run queries and SQL scripts against a database from the shell
//!
//! This crate provides both the `microdb` binary and the library it is built
//! on, so the commands can be driven programmatically (and tested) without a
//! terminal.
//!
//! # CLI Usage
//!
//! ```bash
//! microdb --database app.db import schema.sql
//! microdb --database app.db exec "INSERT INTO users (name) VALUES (?)" -p Alice
//! microdb --database app.db query "SELECT * FROM users WHERE name = :name" -n :name=Alice
//! ```
//!
//! # Configuration
//!
//! Settings are read from `microdb.toml` (or the file given with `--config`)
//! and can be overridden with `MICRODB_*` environment variables:
//!
//! ```toml
//! database = "app.db"
//! busy_timeout_ms = 500
//! log_level = "info"
//! ```

pub mod config;
pub mod error;
pub mod input;

use std::io::Write;
use std::path::Path;

use microdb::{Connection, InsertId, Params};
use tracing::info;

pub use config::CliConfig;
pub use error::{CliError, Result};

/// Open the database configured in `config`.
pub fn connect(config: &CliConfig) -> Result<Connection> {
    config.validate()?;
    let conn = Connection::open(&config.connection())?;
    Ok(conn)
}

/// Run a select query and write every row to `out` as one JSON object per line.
///
/// Returns the number of rows written.
pub fn run_query(
    conn: &Connection,
    sql: &str,
    params: &Params,
    out: &mut impl Write,
) -> Result<usize> {
    let rows = conn.select(sql, params)?;
    for row in &rows {
        serde_json::to_writer(&mut *out, row)?;
        writeln!(out)?;
    }
    Ok(rows.len())
}

/// Run a data-changing statement and return the number of affected rows.
pub fn run_exec(conn: &Connection, sql: &str, params: &Params) -> Result<u64> {
    let affected = conn.update(sql, params)?;
    info!(affected, "statement executed");
    Ok(affected)
}

/// Run an insert statement and return the identifier of the inserted row.
pub fn run_insert_id(
    conn: &Connection,
    sql: &str,
    params: &Params,
    sequence: Option<&str>,
) -> Result<InsertId> {
    Ok(conn.insert_get_id(sql, params, sequence)?)
}

/// Run every statement of a SQL script file.
pub fn run_import(conn: &Connection, path: &Path) -> Result<()> {
    info!("Importing SQL script: {:?}", path);
    conn.import_file(path)?;
    Ok(())
}
