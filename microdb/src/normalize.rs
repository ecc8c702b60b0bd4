//! Translation of low-level failures into the library error taxonomy

use crate::error::{ArgumentError, DatabaseError, DriverError, Error, InvalidArgumentError};
use crate::params::Params;

/// Anything that can go wrong while talking to a driver.
#[derive(Debug)]
pub enum Failure {
    /// The driver reported an error
    Driver(DriverError),
    /// The binder rejected a value
    Argument(ArgumentError),
    /// Already a library error
    Library(Error),
}

impl From<DriverError> for Failure {
    fn from(err: DriverError) -> Self {
        Failure::Driver(err)
    }
}

impl From<ArgumentError> for Failure {
    fn from(err: ArgumentError) -> Self {
        Failure::Argument(err)
    }
}

impl From<Error> for Failure {
    fn from(err: Error) -> Self {
        Failure::Library(err)
    }
}

/// Turn a failure into a library [`Error`].
///
/// Driver errors become [`Error::Database`] with the query and the bound
/// values appended to the message when given. Binder errors become
/// [`Error::InvalidArgument`] and keep the original as their source.
/// Library errors are returned unchanged, so wrapping twice is the same as
/// wrapping once.
pub fn wrap(failure: Failure, query: Option<&str>, values: Option<&Params>) -> Error {
    match failure {
        Failure::Library(err) => err,
        Failure::Driver(err) => Error::Database(DatabaseError::from_driver(err, query, values)),
        Failure::Argument(err) => Error::InvalidArgument(InvalidArgumentError::from(err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bind::BindTarget;
    use crate::params;
    use crate::value::Value;
    use std::error::Error as _;

    fn driver_error() -> DriverError {
        DriverError::new("near \"BAD\": syntax error", "HY000")
            .with_info(serde_json::json!(["HY000", 1, "near \"BAD\": syntax error"]))
    }

    #[test]
    fn test_wrap_driver_error_with_context() {
        let err = wrap(
            driver_error().into(),
            Some("BAD SQL"),
            Some(&params![true, Value::Null, "hi"]),
        );
        let Error::Database(err) = err else {
            panic!("expected a database error");
        };
        assert!(err
            .to_string()
            .ends_with("; SQL query: (BAD SQL); bound values: [true, null, \"hi\"]"));
        assert_eq!(err.code(), "HY000");
        assert_eq!(err.info(), driver_error().info.as_ref());
        assert_eq!(err.cause(), Some(&driver_error()));
        assert_eq!(err.values().len(), 3);
    }

    #[test]
    fn test_wrap_driver_error_without_context() {
        let err = wrap(driver_error().into(), None, None);
        assert_eq!(err.to_string(), "near \"BAD\": syntax error");
    }

    #[test]
    fn test_wrap_empty_params_renders_empty_list() {
        let err = wrap(driver_error().into(), Some("SELECT 1"), Some(&Params::new()));
        assert!(err.to_string().ends_with("; bound values: []"));
    }

    #[test]
    fn test_wrap_argument_error() {
        let argument = ArgumentError {
            target: BindTarget::Position(1),
            type_name: "object",
        };
        let err = wrap(argument.clone().into(), Some("SELECT ?"), None);
        let Error::InvalidArgument(err) = err else {
            panic!("expected an invalid argument error");
        };
        assert_eq!(err.message(), argument.to_string());
        assert_eq!(err.cause(), Some(&argument));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_wrap_is_idempotent() {
        let once = wrap(driver_error().into(), Some("BAD SQL"), Some(&params![1]));
        let Error::Database(expected) = &once else {
            panic!("expected a database error");
        };
        let expected = expected.clone();

        let twice = wrap(once.into(), Some("OTHER SQL"), Some(&params![2]));
        match twice {
            Error::Database(err) => assert_eq!(err, expected),
            other => panic!("expected a database error, got {:?}", other),
        }
    }

    #[test]
    fn test_wrap_passes_other_library_errors_through() {
        let err = wrap(
            Error::ColumnNotFound("id".into()).into(),
            Some("SELECT 1"),
            None,
        );
        assert!(matches!(err, Error::ColumnNotFound(ref c) if c == "id"));
    }
}
