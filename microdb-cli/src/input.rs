//! Parsing of parameter values given on the command line

use microdb::{Params, Value};

use crate::error::{CliError, Result};

/// Interpret a command-line word as a value.
///
/// `null`, `true` and `false` are keywords, anything that parses as an
/// integer or a float is a number, everything else is a string. Quote a
/// keyword with single quotes (`'null'`) to pass it as a string.
pub fn parse_value(raw: &str) -> Value {
    match raw {
        "null" => return Value::Null,
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        _ => {}
    }

    if let Some(quoted) = raw
        .strip_prefix('\'')
        .and_then(|rest| rest.strip_suffix('\''))
    {
        return Value::String(quoted.to_string());
    }
    if let Ok(v) = raw.parse::<i64>() {
        return Value::Int(v);
    }
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => Value::Float(v),
        _ => Value::String(raw.to_string()),
    }
}

/// Parse a `NAME=VALUE` pair.
pub fn parse_named(raw: &str) -> Result<(String, Value)> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| CliError::InvalidParameter(format!("expected NAME=VALUE, got `{}`", raw)))?;
    if name.is_empty() {
        return Err(CliError::InvalidParameter(format!(
            "missing parameter name in `{}`",
            raw
        )));
    }
    Ok((name.to_string(), parse_value(value)))
}

/// Build a parameter map: positional values first, then named ones.
pub fn build_params(positional: &[String], named: &[String]) -> Result<Params> {
    let mut params = Params::new();
    for raw in positional {
        params.push(parse_value(raw));
    }
    for raw in named {
        let (name, value) = parse_named(raw)?;
        params.push_named(name, value);
    }
    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use microdb::ParamKey;

    #[test]
    fn test_parse_value() {
        assert_eq!(parse_value("null"), Value::Null);
        assert_eq!(parse_value("true"), Value::Bool(true));
        assert_eq!(parse_value("-12"), Value::Int(-12));
        assert_eq!(parse_value("14.5"), Value::Float(14.5));
        assert_eq!(parse_value("Row 3"), Value::from("Row 3"));
        assert_eq!(parse_value("'null'"), Value::from("null"));
        assert_eq!(parse_value("inf"), Value::from("inf"));
    }

    #[test]
    fn test_parse_named() {
        assert_eq!(
            parse_named(":price=0").unwrap(),
            (":price".to_string(), Value::Int(0))
        );
        assert_eq!(
            parse_named(":expr=a=b").unwrap(),
            (":expr".to_string(), Value::from("a=b"))
        );
        assert!(parse_named("novalue").is_err());
        assert!(parse_named("=1").is_err());
    }

    #[test]
    fn test_build_params_order() {
        let params = build_params(&["1".into(), "x".into()], &[":n=2".into()]).unwrap();
        let keys: Vec<_> = params.iter().map(|p| p.key.clone()).collect();
        assert_eq!(
            keys,
            vec![
                ParamKey::Positional,
                ParamKey::Positional,
                ParamKey::Named(":n".into())
            ]
        );
    }
}
