//! Error types for microdb

use std::io;

use thiserror::Error;

use crate::bind::BindTarget;
use crate::params::{Param, Params};
use crate::render::render;

/// Result type alias for microdb operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during database operations
#[derive(Error, Debug)]
pub enum Error {
    /// The caller supplied an argument that can never work
    #[error(transparent)]
    InvalidArgument(#[from] InvalidArgumentError),

    /// The database driver reported a failure
    #[error(transparent)]
    Database(#[from] DatabaseError),

    /// An external file or stream could not be opened or read
    #[error(transparent)]
    Resource(#[from] ResourceError),

    /// Column not found in row
    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    /// Type conversion error
    #[error("Type conversion error: expected {expected}, got {actual}")]
    TypeConversion {
        expected: &'static str,
        actual: String,
    },
}

/// A failure reported by the underlying driver, before any context is added.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message}")]
pub struct DriverError {
    pub message: String,
    /// SQLSTATE-like error code
    pub code: String,
    /// Driver specific diagnostic details, passed through verbatim
    pub info: Option<serde_json::Value>,
}

impl DriverError {
    pub fn new(message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: code.into(),
            info: None,
        }
    }

    pub fn with_info(mut self, info: serde_json::Value) -> Self {
        self.info = Some(info);
        self
    }
}

/// A value handed to the binder that cannot be bound.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Bound value {target} expected to be scalar or null, {} {type_name} given", article(.type_name))]
pub struct ArgumentError {
    pub target: BindTarget,
    pub type_name: &'static str,
}

fn article(word: &str) -> &'static str {
    match word.chars().next() {
        Some('a' | 'e' | 'i' | 'o' | 'u') => "an",
        _ => "a",
    }
}

/// Library-level invalid argument error.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message}")]
pub struct InvalidArgumentError {
    message: String,
    #[source]
    source: Option<ArgumentError>,
}

impl InvalidArgumentError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// The binder failure this error was translated from, if any.
    pub fn cause(&self) -> Option<&ArgumentError> {
        self.source.as_ref()
    }
}

impl From<ArgumentError> for InvalidArgumentError {
    fn from(err: ArgumentError) -> Self {
        Self {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

/// A driver failure enriched with the query and bound values that caused it.
///
/// The message is composed once at construction:
/// `<message>; SQL query: (<query>); bound values: <values>`.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message}")]
pub struct DatabaseError {
    message: String,
    code: String,
    info: Option<serde_json::Value>,
    query: Option<String>,
    values: Option<Params>,
    #[source]
    source: Option<DriverError>,
}

impl DatabaseError {
    pub fn new(
        message: impl Into<String>,
        code: impl Into<String>,
        cause: Option<DriverError>,
        query: Option<&str>,
        values: Option<&Params>,
    ) -> Self {
        let mut message = message.into();
        if let Some(query) = query {
            message.push_str("; SQL query: (");
            message.push_str(query);
            message.push(')');
        }
        if let Some(values) = values {
            message.push_str("; bound values: ");
            message.push_str(&render(&values.to_value()));
        }

        Self {
            message,
            code: code.into(),
            info: None,
            query: query.map(str::to_string),
            values: values.cloned(),
            source: cause,
        }
    }

    /// Wrap a driver failure, copying its message, code and diagnostic info.
    pub fn from_driver(err: DriverError, query: Option<&str>, values: Option<&Params>) -> Self {
        let message = err.message.clone();
        let code = err.code.clone();
        let info = err.info.clone();
        Self {
            info,
            ..Self::new(message, code, Some(err), query, values)
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn info(&self) -> Option<&serde_json::Value> {
        self.info.as_ref()
    }

    /// SQL query which caused the error (empty if not caused by a query)
    pub fn query(&self) -> &str {
        self.query.as_deref().unwrap_or("")
    }

    /// Bound values (empty if not caused by a query)
    pub fn values(&self) -> &[Param] {
        self.values.as_ref().map(Params::as_slice).unwrap_or(&[])
    }

    pub fn cause(&self) -> Option<&DriverError> {
        self.source.as_ref()
    }
}

/// Failure while opening or reading an external file or stream.
#[derive(Error, Debug)]
#[error("{message}")]
pub struct ResourceError {
    message: String,
    #[source]
    source: Option<io::Error>,
}

impl ResourceError {
    pub fn new(message: impl Into<String>, source: Option<io::Error>) -> Self {
        Self {
            message: message.into(),
            source,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
