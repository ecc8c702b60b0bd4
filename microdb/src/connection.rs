//! High-level query API over a driver

use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::debug;

use crate::bind::bind_all;
use crate::config::ConnectionConfig;
use crate::error::{ResourceError, Result};
use crate::normalize::{wrap, Failure};
use crate::params::Params;
use crate::row::Row;
use crate::sqlite::SqliteDriver;
use crate::traits::{Driver, Statement};

/// Identifier returned by [`Connection::insert_get_id`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum InsertId {
    Int(i64),
    Str(String),
}

impl InsertId {
    /// Numeric identifiers become [`InsertId::Int`], others stay text.
    ///
    /// Surrounding whitespace is ignored. Fractional numbers are truncated
    /// toward zero; numbers outside the `i64` range stay text.
    pub fn parse(id: &str) -> Self {
        let trimmed = id.trim();
        if let Ok(v) = trimmed.parse::<i64>() {
            return InsertId::Int(v);
        }
        match trimmed.parse::<f64>() {
            // i64::MAX as f64 is 2^63, one past the range
            Ok(v) if v.is_finite() && v >= i64::MIN as f64 && v < i64::MAX as f64 => {
                InsertId::Int(v.trunc() as i64)
            }
            _ => InsertId::Str(id.to_string()),
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            InsertId::Int(v) => Some(*v),
            InsertId::Str(_) => None,
        }
    }
}

/// A database connection with a small, safe query API.
///
/// Every method prepares the query, binds the parameters with
/// [`bind_all`], executes it and turns any failure into an [`Error`](crate::Error) that
/// names the query and the bound values.
///
/// # Example
///
/// ```
/// use microdb::{params, Connection};
///
/// let db = Connection::open_in_memory()?;
/// db.raw_statements("CREATE TABLE users(id INTEGER PRIMARY KEY, name TEXT)")?;
/// db.insert("INSERT INTO users (name) VALUES (?)", &params!["Alice"])?;
///
/// let row = db.select_first("SELECT * FROM users WHERE name = :name", &params![":name" => "Alice"])?;
/// assert_eq!(row.unwrap().get::<i64>("id")?, 1);
/// # Ok::<(), microdb::Error>(())
/// ```
#[derive(Debug)]
pub struct Connection<D: Driver = SqliteDriver> {
    driver: D,
}

impl Connection<SqliteDriver> {
    /// Open a SQLite database.
    pub fn open(config: &ConnectionConfig) -> Result<Self> {
        let driver = SqliteDriver::open(config).map_err(|e| wrap(e.into(), None, None))?;
        Ok(Self::new(driver))
    }

    /// Open a private in-memory SQLite database.
    pub fn open_in_memory() -> Result<Self> {
        Self::open(&ConnectionConfig::in_memory())
    }
}

impl<D: Driver> Connection<D> {
    pub fn new(driver: D) -> Self {
        Self { driver }
    }

    /// Get a reference to the underlying driver.
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Run a select query and return all result rows.
    pub fn select(&self, query: &str, params: &Params) -> Result<Vec<Row>> {
        self.run(query, params, |stmt, _| Ok(stmt.fetch_all()?))
    }

    /// Run a select query and return the first result row, if any.
    pub fn select_first(&self, query: &str, params: &Params) -> Result<Option<Row>> {
        self.run(query, params, |stmt, _| Ok(stmt.fetch_one()?))
    }

    /// Run an insert query and return the number of inserted rows.
    pub fn insert(&self, query: &str, params: &Params) -> Result<u64> {
        self.run(query, params, |stmt, _| Ok(stmt.affected_row_count()))
    }

    /// Run an insert query and return the identifier of the last inserted row.
    ///
    /// `sequence` names the sequence object to read the identifier from, on
    /// databases that use them.
    pub fn insert_get_id(
        &self,
        query: &str,
        params: &Params,
        sequence: Option<&str>,
    ) -> Result<InsertId> {
        self.run(query, params, |_, driver| {
            let id = driver.last_insert_id(sequence)?;
            Ok(InsertId::parse(&id))
        })
    }

    /// Run an update query and return the number of updated rows.
    pub fn update(&self, query: &str, params: &Params) -> Result<u64> {
        self.run(query, params, |stmt, _| Ok(stmt.affected_row_count()))
    }

    /// Run a delete query and return the number of deleted rows.
    pub fn delete(&self, query: &str, params: &Params) -> Result<u64> {
        self.run(query, params, |stmt, _| Ok(stmt.affected_row_count()))
    }

    /// Run a single statement of any kind, discarding its result.
    ///
    /// When `query` holds several `;`-separated statements only the first
    /// one runs; use [`Connection::raw_statements`] for scripts.
    pub fn statement(&self, query: &str, params: &Params) -> Result<()> {
        self.run(query, params, |_, _| Ok(()))
    }

    /// Run all the `;`-separated statements in `sql`. Nothing is bound.
    pub fn raw_statements(&self, sql: &str) -> Result<()> {
        debug!(query = sql, "executing raw statements");
        self.driver
            .exec_raw(sql)
            .map_err(|e| wrap(e.into(), Some(sql), None))
    }

    /// Run the SQL script stored in a file.
    pub fn import_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            ResourceError::new(
                format!(
                    "Unable to open the file `{}` for reading: {}",
                    path.display(),
                    e
                ),
                Some(e),
            )
        })?;
        self.import_reader(file)
    }

    /// Read a SQL script to the end and run it.
    pub fn import_reader(&self, mut reader: impl Read) -> Result<()> {
        let mut sql = String::new();
        reader.read_to_string(&mut sql).map_err(|e| {
            ResourceError::new(format!("Failed to read from the resource: {}", e), Some(e))
        })?;
        self.raw_statements(&sql)
    }

    fn run<'c, T>(
        &'c self,
        query: &str,
        params: &Params,
        then: impl FnOnce(&mut D::Statement<'c>, &'c D) -> std::result::Result<T, Failure>,
    ) -> Result<T> {
        debug!(query, params = params.len(), "executing statement");
        self.execute_statement(query, params)
            .and_then(|mut stmt| then(&mut stmt, &self.driver))
            .map_err(|e| wrap(e, Some(query), Some(params)))
    }

    fn execute_statement(
        &self,
        query: &str,
        params: &Params,
    ) -> std::result::Result<D::Statement<'_>, Failure> {
        let mut stmt = self.driver.prepare(query)?;
        bind_all(&mut stmt, params)?;
        stmt.execute()?;
        Ok(stmt)
    }
}

impl<D: Driver> From<D> for Connection<D> {
    fn from(driver: D) -> Self {
        Self::new(driver)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::params;
    use crate::value::Value;

    fn db() -> Connection {
        let db = Connection::open_in_memory().unwrap();
        db.raw_statements(
            "CREATE TABLE test(id INTEGER PRIMARY KEY ASC, name TEXT, price NUMERIC);
             INSERT INTO test (id, name, price) VALUES (1, 'Row 1', 14.5), (2, 'Row 2', 0);",
        )
        .unwrap();
        db
    }

    #[test]
    fn test_insert_id_parse() {
        assert_eq!(InsertId::parse("42"), InsertId::Int(42));
        assert_eq!(InsertId::parse("4.9"), InsertId::Int(4));
        assert_eq!(InsertId::parse(" 42 "), InsertId::Int(42));
        assert_eq!(InsertId::parse("-7.5"), InsertId::Int(-7));
        assert_eq!(InsertId::parse("1e3"), InsertId::Int(1000));
        assert_eq!(InsertId::parse("abc-1"), InsertId::Str("abc-1".into()));
        assert_eq!(InsertId::parse("1e30"), InsertId::Str("1e30".into()));
        assert_eq!(InsertId::parse("-1e30"), InsertId::Str("-1e30".into()));
        assert_eq!(
            InsertId::parse("9223372036854775807"),
            InsertId::Int(i64::MAX)
        );
        assert_eq!(InsertId::parse("NaN"), InsertId::Str("NaN".into()));
        assert_eq!(InsertId::parse(""), InsertId::Str("".into()));
    }

    #[test]
    fn test_select_first_none() {
        let db = db();
        let row = db
            .select_first("SELECT * FROM test WHERE name = :name", &params![":name" => "Foo"])
            .unwrap();
        assert!(row.is_none());
    }

    #[test]
    fn test_bad_query_is_wrapped_with_context() {
        let db = db();
        let err = db.select("I AM NOT A SQL", &params![1]).unwrap_err();
        match err {
            Error::Database(err) => {
                assert!(err.to_string().ends_with("; SQL query: (I AM NOT A SQL); bound values: [1]"));
                assert_eq!(err.query(), "I AM NOT A SQL");
                assert_eq!(err.values()[0].value, Value::Int(1));
            }
            other => panic!("expected a database error, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_value_is_an_invalid_argument() {
        let db = db();
        let err = db
            .select("SELECT ?", &params![Value::from(vec![1, 2])])
            .unwrap_err();
        match err {
            Error::InvalidArgument(err) => assert_eq!(
                err.message(),
                "Bound value #1 expected to be scalar or null, an array given"
            ),
            other => panic!("expected an invalid argument error, got {:?}", other),
        }
    }

    #[test]
    fn test_raw_statement_errors_carry_query_only() {
        let db = db();
        let err = db.raw_statements("I AM NOT A SQL").unwrap_err();
        let Error::Database(err) = err else {
            panic!("expected a database error");
        };
        assert!(err.to_string().ends_with("; SQL query: (I AM NOT A SQL)"));
        assert!(err.values().is_empty());
    }
}
