//! Result rows

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::error::{Error, Result};
use crate::traits::FromValue;
use crate::value::{MapKey, Value};

/// A result row: column names mapped to values, in select order.
///
/// # Example
///
/// ```ignore
/// let row = conn.select_first("SELECT id, name FROM users WHERE id = ?", &params![1])?;
/// if let Some(row) = row {
///     let name: String = row.get("name")?;
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    columns: Vec<(String, Value)>,
}

impl Row {
    pub fn new(columns: Vec<(String, Value)>) -> Self {
        Self { columns }
    }

    /// Get a value from the row by column name.
    ///
    /// Returns an error if the column doesn't exist.
    pub fn get_value(&self, column: &str) -> Result<&Value> {
        self.columns
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
            .ok_or_else(|| Error::ColumnNotFound(column.to_string()))
    }

    /// Get a typed value from the row by column name.
    pub fn get<T: FromValue>(&self, column: &str) -> Result<T> {
        T::from_value(self.get_value(column)?.clone())
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.columns.iter().map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// The row as a [`Value::Map`] keyed by column name.
    pub fn into_value(self) -> Value {
        Value::Map(
            self.columns
                .into_iter()
                .map(|(name, value)| (MapKey::Name(name), value))
                .collect(),
        )
    }
}

impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (name, value) in &self.columns {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> Row {
        Row::new(vec![
            ("id".into(), Value::Int(3)),
            ("name".into(), Value::from("Row 3")),
            ("price".into(), Value::Null),
        ])
    }

    #[test]
    fn test_get() {
        let row = row();
        assert_eq!(row.get::<i64>("id").unwrap(), 3);
        assert_eq!(row.get::<String>("name").unwrap(), "Row 3");
        assert_eq!(row.get::<Option<f64>>("price").unwrap(), None);
        assert!(matches!(row.get::<i64>("missing"), Err(Error::ColumnNotFound(c)) if c == "missing"));
    }

    #[test]
    fn test_column_order_is_preserved() {
        let row = row();
        assert_eq!(row.columns().collect::<Vec<_>>(), vec!["id", "name", "price"]);
        assert_eq!(
            serde_json::to_string(&row).unwrap(),
            r#"{"id":3,"name":"Row 3","price":null}"#
        );
    }
}
