//! SQLite prepared statement

use std::collections::VecDeque;

use rusqlite::Connection;

use crate::bind::{BindTarget, ParamType};
use crate::error::DriverError;
use crate::row::Row;
use crate::traits::Statement;
use crate::value::Value;

use super::types::{from_sqlite_value, invalid_parameter, to_sqlite_value};

const NAME_PREFIXES: [char; 3] = [':', '@', '$'];

/// A prepared SQLite statement.
///
/// Result rows are read in full when the statement is executed and handed
/// out by the fetch methods afterwards.
pub struct SqliteStatement<'c> {
    conn: &'c Connection,
    inner: rusqlite::Statement<'c>,
    rows: VecDeque<Row>,
    affected: u64,
}

impl<'c> SqliteStatement<'c> {
    pub(crate) fn new(conn: &'c Connection, inner: rusqlite::Statement<'c>) -> Self {
        Self {
            conn,
            inner,
            rows: VecDeque::new(),
            affected: 0,
        }
    }

    /// 1-based index of the placeholder `target` refers to.
    fn parameter_index(&self, target: &BindTarget) -> Result<usize, DriverError> {
        match target {
            BindTarget::Position(position) => {
                if (1..=self.inner.parameter_count()).contains(position) {
                    Ok(*position)
                } else {
                    Err(invalid_parameter(target))
                }
            }
            BindTarget::Name(name) => {
                if let Some(index) = self.inner.parameter_index(name)? {
                    return Ok(index);
                }
                // Accept bare names the way `:name` placeholders are usually written
                if !name.starts_with(NAME_PREFIXES) {
                    if let Some(index) = self.inner.parameter_index(&format!(":{}", name))? {
                        return Ok(index);
                    }
                }
                Err(invalid_parameter(target))
            }
        }
    }
}

impl Statement for SqliteStatement<'_> {
    fn bind(
        &mut self,
        target: &BindTarget,
        value: &Value,
        param_type: ParamType,
    ) -> Result<(), DriverError> {
        let index = self.parameter_index(target)?;
        let value = to_sqlite_value(value, param_type)?;
        self.inner.raw_bind_parameter(index, value)?;
        Ok(())
    }

    fn execute(&mut self) -> Result<(), DriverError> {
        self.rows.clear();

        if self.inner.column_count() == 0 {
            self.affected = self.inner.raw_execute()? as u64;
            return Ok(());
        }

        let columns: Vec<String> = self
            .inner
            .column_names()
            .into_iter()
            .map(str::to_string)
            .collect();
        let readonly = self.inner.readonly();

        let mut rows = VecDeque::new();
        let mut raw_rows = self.inner.raw_query();
        while let Some(raw_row) = raw_rows.next()? {
            let mut cells = Vec::with_capacity(columns.len());
            for (i, column) in columns.iter().enumerate() {
                cells.push((column.clone(), from_sqlite_value(raw_row.get_ref(i)?)));
            }
            rows.push_back(Row::new(cells));
        }
        drop(raw_rows);

        self.rows = rows;
        // Statements like `INSERT ... RETURNING` return rows and change data
        self.affected = if readonly { 0 } else { self.conn.changes() };
        Ok(())
    }

    fn fetch_all(&mut self) -> Result<Vec<Row>, DriverError> {
        Ok(self.rows.drain(..).collect())
    }

    fn fetch_one(&mut self) -> Result<Option<Row>, DriverError> {
        Ok(self.rows.pop_front())
    }

    fn affected_row_count(&self) -> u64 {
        self.affected
    }
}
