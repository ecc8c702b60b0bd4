//! Type conversion utilities for SQLite

use rusqlite::types::{Value as SqliteValue, ValueRef};
use rusqlite::ErrorCode;
use serde_json::json;

use crate::bind::ParamType;
use crate::error::DriverError;
use crate::value::Value;

/// SQLSTATE reported for constraint violations
pub const SQLSTATE_CONSTRAINT: &str = "23000";

/// SQLSTATE reported for every other SQLite failure
pub const SQLSTATE_GENERAL: &str = "HY000";

/// SQLSTATE reported when a placeholder does not exist
pub const SQLSTATE_INVALID_PARAMETER: &str = "HY093";

/// SQLSTATE reported when a value cannot be bound with the requested type
pub const SQLSTATE_INVALID_TYPE: &str = "HY105";

/// Convert a microdb Value to the SQLite value it is bound as.
///
/// The [`ParamType`] decides the storage class; the value only supplies the
/// content. A value that does not fit its type is refused.
pub fn to_sqlite_value(value: &Value, param_type: ParamType) -> Result<SqliteValue, DriverError> {
    let bound = match (param_type, value) {
        (ParamType::Null, Value::Null) => SqliteValue::Null,
        (ParamType::Bool, Value::Bool(v)) => SqliteValue::Integer(i64::from(*v)),
        (ParamType::Int, Value::Int(v)) => SqliteValue::Integer(*v),
        (ParamType::Str, Value::String(v)) => SqliteValue::Text(v.clone()),
        (ParamType::Str, Value::Float(v)) => SqliteValue::Text(v.to_string()),
        (ParamType::Str, Value::Bytes(v)) => SqliteValue::Blob(v.clone()),
        (param_type, value) => return Err(invalid_type(value, param_type)),
    };
    Ok(bound)
}

/// Convert a SQLite column value to a microdb Value
pub fn from_sqlite_value(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(v) => Value::Int(v),
        ValueRef::Real(v) => Value::Float(v),
        ValueRef::Text(v) => match std::str::from_utf8(v) {
            Ok(s) => Value::String(s.to_string()),
            Err(_) => Value::Bytes(v.to_vec()),
        },
        ValueRef::Blob(v) => Value::Bytes(v.to_vec()),
    }
}

/// A "parameter was not defined" failure for `target`.
pub fn invalid_parameter(target: impl std::fmt::Display) -> DriverError {
    let message = format!("Invalid parameter number: parameter {} was not defined", target);
    DriverError::new(message.clone(), SQLSTATE_INVALID_PARAMETER).with_info(json!([
        SQLSTATE_INVALID_PARAMETER,
        null,
        message
    ]))
}

fn invalid_type(value: &Value, param_type: ParamType) -> DriverError {
    let message = format!(
        "Invalid parameter type: {} value cannot be bound as {:?}",
        value.type_name(),
        param_type
    );
    DriverError::new(message.clone(), SQLSTATE_INVALID_TYPE).with_info(json!([
        SQLSTATE_INVALID_TYPE,
        null,
        message
    ]))
}

impl From<rusqlite::Error> for DriverError {
    fn from(err: rusqlite::Error) -> Self {
        let (sqlstate, extended_code) = match &err {
            rusqlite::Error::SqliteFailure(failure, _) => {
                let sqlstate = if failure.code == ErrorCode::ConstraintViolation {
                    SQLSTATE_CONSTRAINT
                } else {
                    SQLSTATE_GENERAL
                };
                (sqlstate, Some(failure.extended_code))
            }
            _ => (SQLSTATE_GENERAL, None),
        };
        let message = err.to_string();

        DriverError::new(message.clone(), sqlstate).with_info(json!([
            sqlstate,
            extended_code,
            message
        ]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_float_is_bound_as_text() {
        assert_eq!(
            to_sqlite_value(&Value::Float(-15.67891), ParamType::Str).unwrap(),
            SqliteValue::Text("-15.67891".into())
        );
    }

    #[test]
    fn test_bool_is_bound_as_integer() {
        assert_eq!(
            to_sqlite_value(&Value::Bool(true), ParamType::Bool).unwrap(),
            SqliteValue::Integer(1)
        );
    }

    #[test]
    fn test_bytes_are_bound_as_blob() {
        assert_eq!(
            to_sqlite_value(&Value::Bytes(vec![0, 159]), ParamType::Str).unwrap(),
            SqliteValue::Blob(vec![0, 159])
        );
    }

    #[test]
    fn test_mismatched_type_is_refused() {
        let err = to_sqlite_value(&Value::from(vec![1, 2]), ParamType::Str).unwrap_err();
        assert_eq!(err.code, SQLSTATE_INVALID_TYPE);
        assert!(err.message.contains("array"));

        let err = to_sqlite_value(&Value::Int(5), ParamType::Null).unwrap_err();
        assert_eq!(err.code, SQLSTATE_INVALID_TYPE);

        assert!(to_sqlite_value(&Value::Resource, ParamType::Int).is_err());
        assert!(to_sqlite_value(&Value::from("1"), ParamType::Int).is_err());
    }

    #[test]
    fn test_from_sqlite_value() {
        assert_eq!(from_sqlite_value(ValueRef::Integer(7)), Value::Int(7));
        assert_eq!(from_sqlite_value(ValueRef::Real(0.5)), Value::Float(0.5));
        assert_eq!(
            from_sqlite_value(ValueRef::Text(b"abc")),
            Value::String("abc".into())
        );
        assert_eq!(
            from_sqlite_value(ValueRef::Text(&[0xff, 0xfe])),
            Value::Bytes(vec![0xff, 0xfe])
        );
    }
}
