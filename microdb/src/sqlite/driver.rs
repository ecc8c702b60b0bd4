//! SQLite connection implementation

use std::time::Duration;

use rusqlite::fallible_iterator::FallibleIterator;
use rusqlite::{Batch, Connection, OpenFlags};
use tracing::debug;

use crate::config::ConnectionConfig;
use crate::error::DriverError;
use crate::traits::Driver;

use super::statement::SqliteStatement;

/// A SQLite database connection.
///
/// This wraps `rusqlite::Connection` and implements the microdb `Driver`
/// trait.
///
/// # Example
///
/// ```ignore
/// use microdb::{Connection, ConnectionConfig, SqliteDriver};
///
/// let driver = SqliteDriver::open(&ConnectionConfig::new("app.db"))?;
/// let conn = Connection::new(driver);
/// ```
#[derive(Debug)]
pub struct SqliteDriver {
    inner: Connection,
}

impl SqliteDriver {
    /// Open the database described by `config`.
    pub fn open(config: &ConnectionConfig) -> Result<Self, DriverError> {
        let flags = if config.read_only {
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_URI
        } else {
            OpenFlags::default()
        };

        let inner = if config.is_in_memory() {
            Connection::open_in_memory_with_flags(flags)?
        } else {
            Connection::open_with_flags(&config.database, flags)?
        };

        if let Some(timeout) = config.busy_timeout_ms {
            inner.busy_timeout(Duration::from_millis(timeout))?;
        }

        debug!(database = %config.database, read_only = config.read_only, "opened sqlite database");
        Ok(Self { inner })
    }

    /// Open a private in-memory database.
    pub fn open_in_memory() -> Result<Self, DriverError> {
        Self::open(&ConnectionConfig::in_memory())
    }

    /// Wrap an already opened rusqlite connection.
    pub fn from_connection(inner: Connection) -> Self {
        Self { inner }
    }

    /// Get a reference to the underlying rusqlite connection.
    pub fn inner(&self) -> &Connection {
        &self.inner
    }
}

impl Driver for SqliteDriver {
    type Statement<'c> = SqliteStatement<'c>;

    /// Prepare the first statement of `sql`. Any statements after it are
    /// ignored.
    fn prepare(&self, sql: &str) -> Result<Self::Statement<'_>, DriverError> {
        let statement = match Batch::new(&self.inner, sql).next()? {
            Some(statement) => statement,
            // Nothing but whitespace or comments
            None => self.inner.prepare(sql)?,
        };
        Ok(SqliteStatement::new(&self.inner, statement))
    }

    fn last_insert_id(&self, _sequence: Option<&str>) -> Result<String, DriverError> {
        // SQLite has no sequence objects; the rowid is all there is
        Ok(self.inner.last_insert_rowid().to_string())
    }

    fn exec_raw(&self, sql: &str) -> Result<(), DriverError> {
        self.inner.execute_batch(sql)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bind::{BindTarget, ParamType};
    use crate::traits::Statement;
    use crate::value::Value;

    fn driver() -> SqliteDriver {
        let driver = SqliteDriver::open_in_memory().unwrap();
        driver
            .exec_raw("CREATE TABLE test(id INTEGER PRIMARY KEY ASC, name TEXT, price NUMERIC)")
            .unwrap();
        driver
    }

    #[test]
    fn test_insert_and_select() {
        let driver = driver();

        let mut stmt = driver
            .prepare("INSERT INTO test (name, price) VALUES (:name, ?2)")
            .unwrap();
        stmt.bind(
            &BindTarget::Name(":name".into()),
            &Value::from("Baran"),
            ParamType::Str,
        )
        .unwrap();
        stmt.bind(
            &BindTarget::Position(2),
            &Value::Float(456.789),
            ParamType::Str,
        )
        .unwrap();
        stmt.execute().unwrap();
        assert_eq!(stmt.affected_row_count(), 1);
        drop(stmt);
        assert_eq!(driver.last_insert_id(None).unwrap(), "1");

        let mut stmt = driver.prepare("SELECT * FROM test").unwrap();
        stmt.execute().unwrap();
        assert_eq!(stmt.affected_row_count(), 0);
        let row = stmt.fetch_one().unwrap().unwrap();
        assert_eq!(row.get_value("name").unwrap(), &Value::from("Baran"));
        assert_eq!(row.get_value("price").unwrap(), &Value::Float(456.789));
        assert!(stmt.fetch_one().unwrap().is_none());
    }

    #[test]
    fn test_bare_name_resolves_to_colon_placeholder() {
        let driver = driver();
        let mut stmt = driver.prepare("SELECT :value AS value").unwrap();
        stmt.bind(
            &BindTarget::Name("value".into()),
            &Value::Int(5),
            ParamType::Int,
        )
        .unwrap();
        stmt.execute().unwrap();
        let rows = stmt.fetch_all().unwrap();
        assert_eq!(rows[0].get::<i64>("value").unwrap(), 5);
    }

    #[test]
    fn test_unknown_placeholder() {
        let driver = driver();
        let mut stmt = driver.prepare("SELECT ? AS value").unwrap();

        let err = stmt
            .bind(&BindTarget::Position(2), &Value::Int(1), ParamType::Int)
            .unwrap_err();
        assert_eq!(err.code, "HY093");

        let err = stmt
            .bind(
                &BindTarget::Name(":missing".into()),
                &Value::Int(1),
                ParamType::Int,
            )
            .unwrap_err();
        assert_eq!(err.code, "HY093");
        assert!(err.message.contains("`:missing`"));
    }

    #[test]
    fn test_syntax_error_is_reported_with_details() {
        let driver = driver();
        let err = driver.prepare("I AM NOT A SQL").err().unwrap();
        assert_eq!(err.code, "HY000");
        let info = err.info.unwrap();
        assert_eq!(info[0], "HY000");
        assert!(info[1].is_i64());
    }

    #[test]
    fn test_constraint_violation_code() {
        let driver = driver();
        driver
            .exec_raw("INSERT INTO test (id, name) VALUES (1, 'a')")
            .unwrap();
        let err = driver
            .exec_raw("INSERT INTO test (id, name) VALUES (1, 'b')")
            .unwrap_err();
        assert_eq!(err.code, "23000");
    }

    #[test]
    fn test_read_only_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.db");
        let config = ConnectionConfig::new(path.to_string_lossy());

        SqliteDriver::open(&config)
            .unwrap()
            .exec_raw("CREATE TABLE test(id INTEGER PRIMARY KEY)")
            .unwrap();

        let driver = SqliteDriver::open(&config.read_only(true)).unwrap();
        let err = driver
            .exec_raw("INSERT INTO test (id) VALUES (1)")
            .unwrap_err();
        assert_eq!(err.code, "HY000");
    }

    #[test]
    fn test_only_first_statement_is_prepared() {
        let driver = driver();
        let mut stmt = driver
            .prepare("INSERT INTO test (name) VALUES (?); DROP TABLE test;")
            .unwrap();
        stmt.bind(&BindTarget::Position(1), &Value::from("a"), ParamType::Str)
            .unwrap();
        stmt.execute().unwrap();
        assert_eq!(stmt.affected_row_count(), 1);
        drop(stmt);

        let mut stmt = driver.prepare("SELECT COUNT(*) AS n FROM test").unwrap();
        stmt.execute().unwrap();
        assert_eq!(stmt.fetch_one().unwrap().unwrap().get::<i64>("n").unwrap(), 1);
    }

    #[test]
    fn test_bind_refuses_mismatched_value() {
        let driver = driver();
        let mut stmt = driver.prepare("SELECT ? AS value").unwrap();
        let err = stmt
            .bind(
                &BindTarget::Position(1),
                &Value::List(vec![Value::Int(1)]),
                ParamType::Str,
            )
            .unwrap_err();
        assert_eq!(err.code, "HY105");

        let err = stmt
            .bind(&BindTarget::Position(1), &Value::Int(1), ParamType::Null)
            .unwrap_err();
        assert_eq!(err.code, "HY105");
    }
}
