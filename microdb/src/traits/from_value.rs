//! FromValue trait for converting database values to Rust types

use crate::error::{Error, Result};
use crate::value::Value;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;

/// Trait for types that can be constructed from a database value.
///
/// This is automatically implemented for common Rust types and can
/// be manually implemented for custom types (e.g., enums).
pub trait FromValue: Sized {
    /// Convert a database value to this type.
    fn from_value(value: Value) -> Result<Self>;
}

impl FromValue for Value {
    fn from_value(value: Value) -> Result<Self> {
        Ok(value)
    }
}

impl FromValue for bool {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Bool(v) => Ok(v),
            // SQLite has no boolean storage class
            Value::Int(v) => Ok(v != 0),
            _ => Err(Error::TypeConversion {
                expected: "bool",
                actual: value.type_name().to_string(),
            }),
        }
    }
}

macro_rules! impl_from_value_int {
    ($($t:ty),*) => {
        $(
            impl FromValue for $t {
                fn from_value(value: Value) -> Result<Self> {
                    match value {
                        Value::Int(v) => v.try_into().map_err(|_| Error::TypeConversion {
                            expected: stringify!($t),
                            actual: format!("integer({}) out of range", v),
                        }),
                        Value::String(ref s) => s.parse().map_err(|_| Error::TypeConversion {
                            expected: stringify!($t),
                            actual: format!("invalid integer string: {}", s),
                        }),
                        _ => Err(Error::TypeConversion {
                            expected: stringify!($t),
                            actual: value.type_name().to_string(),
                        }),
                    }
                }
            }
        )*
    };
}

impl_from_value_int!(i8, i16, i32, i64, u8, u16, u32, u64);

impl FromValue for f64 {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Float(v) => Ok(v),
            Value::Int(v) => Ok(v as f64),
            // Floats are bound as text and may be stored that way
            Value::String(ref s) => s.parse().map_err(|_| Error::TypeConversion {
                expected: "f64",
                actual: format!("invalid float string: {}", s),
            }),
            _ => Err(Error::TypeConversion {
                expected: "f64",
                actual: value.type_name().to_string(),
            }),
        }
    }
}

impl FromValue for f32 {
    fn from_value(value: Value) -> Result<Self> {
        f64::from_value(value).map(|v| v as f32)
    }
}

impl FromValue for String {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::String(v) => Ok(v),
            Value::Bytes(v) => String::from_utf8(v).map_err(|e| Error::TypeConversion {
                expected: "utf8 string",
                actual: format!("invalid utf8: {}", e),
            }),
            _ => Err(Error::TypeConversion {
                expected: "string",
                actual: value.type_name().to_string(),
            }),
        }
    }
}

impl FromValue for Vec<u8> {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Bytes(v) => Ok(v),
            Value::String(v) => Ok(v.into_bytes()),
            _ => Err(Error::TypeConversion {
                expected: "bytes",
                actual: value.type_name().to_string(),
            }),
        }
    }
}

impl FromValue for NaiveDate {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::String(ref s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .or_else(|_| NaiveDateTime::from_value(value.clone()).map(|v| v.date()))
                .map_err(|_| Error::TypeConversion {
                    expected: "date",
                    actual: format!("invalid date string: {}", s),
                }),
            _ => Err(Error::TypeConversion {
                expected: "date",
                actual: value.type_name().to_string(),
            }),
        }
    }
}

impl FromValue for NaiveDateTime {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::String(ref s) => NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f")
                .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f"))
                .map_err(|_| Error::TypeConversion {
                    expected: "datetime",
                    actual: format!("invalid datetime string: {}", s),
                }),
            _ => Err(Error::TypeConversion {
                expected: "datetime",
                actual: value.type_name().to_string(),
            }),
        }
    }
}

impl FromValue for NaiveTime {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::String(ref s) => {
                NaiveTime::parse_from_str(s, "%H:%M:%S%.f").map_err(|_| Error::TypeConversion {
                    expected: "time",
                    actual: format!("invalid time string: {}", s),
                })
            }
            _ => Err(Error::TypeConversion {
                expected: "time",
                actual: value.type_name().to_string(),
            }),
        }
    }
}

impl FromValue for Decimal {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Int(v) => Ok(Decimal::from(v)),
            Value::Float(v) => Decimal::try_from(v).map_err(|_| Error::TypeConversion {
                expected: "decimal",
                actual: format!("double({}) out of range", v),
            }),
            Value::String(v) => v.parse().map_err(|_| Error::TypeConversion {
                expected: "decimal",
                actual: format!("invalid decimal string: {}", v),
            }),
            _ => Err(Error::TypeConversion {
                expected: "decimal",
                actual: value.type_name().to_string(),
            }),
        }
    }
}

impl FromValue for serde_json::Value {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::String(v) => serde_json::from_str(&v).map_err(|e| Error::TypeConversion {
                expected: "json",
                actual: format!("invalid json: {}", e),
            }),
            _ => Err(Error::TypeConversion {
                expected: "json",
                actual: value.type_name().to_string(),
            }),
        }
    }
}

// Implement for Option<T>
impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Null => Ok(None),
            _ => Ok(Some(T::from_value(value)?)),
        }
    }
}
