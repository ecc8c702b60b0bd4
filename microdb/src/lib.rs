//! microdb - a minimal SQL access layer
//!
//! A thin layer over a database driver that binds parameters with
//! predictable types, materializes result rows and reports failures with
//! the offending query and bound values attached.
//!
//! # Features
//!
//! - **Mixed parameters**: positional and `:named` values in one map, via `params!`
//! - **Typed binding**: null, bool and integer values keep their type; floats and
//!   strings are bound as text so nothing is rounded
//! - **Rich errors**: driver failures carry the query and a truncated rendering of
//!   the bound values
//! - **SQLite driver**: built on `rusqlite`, other backends plug in through [`Driver`]
//!
//! # Example
//!
//! ```
//! use microdb::{params, Connection, Error};
//!
//! let db = Connection::open_in_memory()?;
//! db.raw_statements("CREATE TABLE test(id INTEGER PRIMARY KEY, name TEXT, price NUMERIC)")?;
//! db.insert(
//!     "INSERT INTO test (name, price) VALUES (:name, :price)",
//!     &params![":name" => "Baran", ":price" => 456.789],
//! )?;
//!
//! let rows = db.select("SELECT * FROM test WHERE price > ?", &params![15])?;
//! assert_eq!(rows.len(), 1);
//!
//! match db.select("I AM NOT A SQL", &params![]) {
//!     Err(Error::Database(err)) => assert_eq!(err.query(), "I AM NOT A SQL"),
//!     _ => unreachable!(),
//! }
//! # Ok::<(), microdb::Error>(())
//! ```

pub mod bind;
pub mod config;
pub mod connection;
pub mod error;
pub mod normalize;
pub mod params;
pub mod render;
pub mod row;
pub mod sqlite;
pub mod traits;
pub mod value;

// Re-export main types
pub use bind::{bind_all, bind_value, BindTarget, ParamType};
pub use config::ConnectionConfig;
pub use connection::{Connection, InsertId};
pub use error::{
    ArgumentError, DatabaseError, DriverError, Error, InvalidArgumentError, ResourceError, Result,
};
pub use normalize::{wrap, Failure};
pub use params::{Param, ParamKey, Params};
pub use render::render;
pub use row::Row;
pub use sqlite::{SqliteDriver, SqliteStatement};
pub use traits::{Driver, FromValue, Statement};
pub use value::{MapKey, Value};
