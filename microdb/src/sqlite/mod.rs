//! SQLite implementation for microdb

mod driver;
mod statement;
mod types;

pub use driver::SqliteDriver;
pub use statement::SqliteStatement;
pub use types::{
    SQLSTATE_CONSTRAINT, SQLSTATE_GENERAL, SQLSTATE_INVALID_PARAMETER, SQLSTATE_INVALID_TYPE,
};
