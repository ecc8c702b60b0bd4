//! Rendering of arbitrary values for diagnostic messages
//!
//! The output is meant for humans reading error messages. It is never used
//! to build SQL and never escapes anything.

use crate::value::{MapKey, Value};

/// Strings longer than this many characters are truncated.
pub const MAX_RENDERED_CHARS: usize = 100;

/// Number of characters kept from a truncated string, before the `...`.
pub const TRUNCATED_CHARS: usize = 97;

/// Convert a value to a short, human readable string.
///
/// ```
/// use microdb::{render, Value};
///
/// assert_eq!(render(&Value::Null), "null");
/// assert_eq!(render(&Value::from("hi")), "\"hi\"");
/// assert_eq!(render(&Value::from(vec![1, 2])), "[1, 2]");
/// ```
pub fn render(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(true) => "true".to_string(),
        Value::Bool(false) => "false".to_string(),
        Value::Int(v) => v.to_string(),
        Value::Float(v) => v.to_string(),
        Value::String(v) => quote(v),
        Value::Bytes(v) => quote(&String::from_utf8_lossy(v)),
        Value::Object(type_name) => format!("a {} instance", type_name),
        Value::Resource => "a resource".to_string(),
        Value::List(items) => {
            let items: Vec<String> = items.iter().map(render).collect();
            format!("[{}]", items.join(", "))
        }
        Value::Map(entries) if is_list(entries) => {
            let items: Vec<String> = entries.iter().map(|(_, v)| render(v)).collect();
            format!("[{}]", items.join(", "))
        }
        Value::Map(entries) => {
            let items: Vec<String> = entries
                .iter()
                .map(|(k, v)| format!("{} => {}", render_key(k), render(v)))
                .collect();
            format!("[{}]", items.join(", "))
        }
    }
}

fn render_key(key: &MapKey) -> String {
    match key {
        MapKey::Index(i) => i.to_string(),
        MapKey::Name(name) => quote(name),
    }
}

// Keys are exactly 0, 1, 2, ... in order
fn is_list(entries: &[(MapKey, Value)]) -> bool {
    entries
        .iter()
        .enumerate()
        .all(|(i, (key, _))| matches!(key, MapKey::Index(k) if usize::try_from(*k) == Ok(i)))
}

// Lengths are counted in chars, never bytes
fn quote(s: &str) -> String {
    if s.chars().count() > MAX_RENDERED_CHARS {
        let head: String = s.chars().take(TRUNCATED_CHARS).collect();
        format!("\"{}...\"", head)
    } else {
        format!("\"{}\"", s)
    }
}
