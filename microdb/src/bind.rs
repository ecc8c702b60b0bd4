//! Binding of parameter maps to prepared statements

use std::fmt;

use tracing::trace;

use crate::error::ArgumentError;
use crate::normalize::Failure;
use crate::params::{ParamKey, Params};
use crate::traits::Statement;
use crate::value::Value;

/// Driver-level type a value is bound as.
///
/// Floats are bound as [`ParamType::Str`], in their textual form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamType {
    Null,
    Bool,
    Int,
    Str,
}

impl ParamType {
    /// Classify a value, or `None` if it cannot be bound at all.
    pub fn of(value: &Value) -> Option<Self> {
        match value {
            Value::Null => Some(ParamType::Null),
            Value::Bool(_) => Some(ParamType::Bool),
            Value::Int(_) => Some(ParamType::Int),
            Value::Float(_) | Value::String(_) | Value::Bytes(_) => Some(ParamType::Str),
            Value::List(_) | Value::Map(_) | Value::Object(_) | Value::Resource => None,
        }
    }
}

/// The placeholder a value is bound to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BindTarget {
    /// 1-based position of a `?` placeholder
    Position(usize),
    /// Placeholder name, as written by the caller
    Name(String),
}

impl fmt::Display for BindTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindTarget::Position(position) => write!(f, "#{}", position),
            BindTarget::Name(name) => write!(f, "`{}`", name),
        }
    }
}

/// Bind every entry of `params` to `statement`, in order.
///
/// The position counter starts at 1 and advances once per entry, named
/// entries included, so `["Foo", ":number" => 123, "bar"]` binds `bar` at
/// position 3.
///
/// Binding stops at the first failure. Values bound before it stay bound,
/// so the statement must be discarded.
pub fn bind_all<S: Statement + ?Sized>(statement: &mut S, params: &Params) -> Result<(), Failure> {
    for (i, param) in params.iter().enumerate() {
        let target = match &param.key {
            ParamKey::Named(name) => BindTarget::Name(name.clone()),
            ParamKey::Positional => BindTarget::Position(i + 1),
        };
        bind_value(statement, target, &param.value)?;
    }
    Ok(())
}

/// Bind a single value, inferring its driver type.
pub fn bind_value<S: Statement + ?Sized>(
    statement: &mut S,
    target: BindTarget,
    value: &Value,
) -> Result<(), Failure> {
    let Some(param_type) = ParamType::of(value) else {
        return Err(Failure::Argument(ArgumentError {
            target,
            type_name: value.type_name(),
        }));
    };

    trace!(%target, ?param_type, "binding value");
    statement.bind(&target, value, param_type)?;
    Ok(())
}
