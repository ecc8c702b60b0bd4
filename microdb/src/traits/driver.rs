//! Driver traits implemented by database backends

use crate::bind::{BindTarget, ParamType};
use crate::error::DriverError;
use crate::row::Row;
use crate::value::Value;

/// A database connection able to prepare statements.
///
/// All calls are synchronous. A driver is owned by a single caller at a
/// time; implementations need not be `Sync`.
pub trait Driver {
    /// Prepared statement type, borrowing the connection.
    type Statement<'c>: Statement
    where
        Self: 'c;

    /// Prepare a single SQL statement.
    fn prepare(&self, sql: &str) -> Result<Self::Statement<'_>, DriverError>;

    /// Identifier of the last inserted row, as reported by the database.
    ///
    /// `sequence` names the sequence object to read from, for databases that
    /// have them.
    fn last_insert_id(&self, sequence: Option<&str>) -> Result<String, DriverError>;

    /// Execute one or more `;`-separated statements without binding.
    fn exec_raw(&self, sql: &str) -> Result<(), DriverError>;
}

/// A prepared statement.
pub trait Statement {
    /// Bind one value to a placeholder.
    fn bind(
        &mut self,
        target: &BindTarget,
        value: &Value,
        param_type: ParamType,
    ) -> Result<(), DriverError>;

    /// Execute the statement with the values bound so far.
    fn execute(&mut self) -> Result<(), DriverError>;

    /// All remaining result rows.
    fn fetch_all(&mut self) -> Result<Vec<Row>, DriverError>;

    /// The next result row, or `None` when there are no more.
    fn fetch_one(&mut self) -> Result<Option<Row>, DriverError>;

    /// Number of rows changed by the last execution.
    fn affected_row_count(&self) -> u64;
}
