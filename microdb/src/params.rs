//! Parameter maps passed alongside a query

use crate::value::{MapKey, Value};

/// How a parameter is addressed in the query text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParamKey {
    /// Unlabeled entry, bound to a `?` placeholder by position
    Positional,
    /// Explicit placeholder name, conventionally prefixed (e.g. `:name`)
    Named(String),
}

/// A single entry of a [`Params`] map.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub key: ParamKey,
    pub value: Value,
}

/// An ordered parameter map.
///
/// Positional and named entries may be mixed. Insertion order is the order
/// in which the values are bound.
///
/// # Example
///
/// ```
/// use microdb::{params, Params};
///
/// let params: Params = params!["Foo", ":number" => 123, "bar"];
/// assert_eq!(params.len(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params {
    entries: Vec<Param>,
}

impl Params {
    /// Create an empty parameter map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an unlabeled value.
    pub fn push(&mut self, value: impl Into<Value>) -> &mut Self {
        self.entries.push(Param {
            key: ParamKey::Positional,
            value: value.into(),
        });
        self
    }

    /// Append a value bound to a named placeholder.
    pub fn push_named(&mut self, name: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.entries.push(Param {
            key: ParamKey::Named(name.into()),
            value: value.into(),
        });
        self
    }

    /// Builder-style [`Params::push`].
    pub fn with(mut self, value: impl Into<Value>) -> Self {
        self.push(value);
        self
    }

    /// Builder-style [`Params::push_named`].
    pub fn with_named(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.push_named(name, value);
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Param> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[Param] {
        &self.entries
    }

    /// The map as an associative [`Value`], for diagnostics.
    ///
    /// Unlabeled entries are keyed `0, 1, 2...` counting only unlabeled
    /// entries; named entries keep their name.
    pub fn to_value(&self) -> Value {
        let mut next_index = 0;
        let entries = self
            .entries
            .iter()
            .map(|param| {
                let key = match &param.key {
                    ParamKey::Positional => {
                        let key = MapKey::Index(next_index);
                        next_index += 1;
                        key
                    }
                    ParamKey::Named(name) => MapKey::Name(name.clone()),
                };
                (key, param.value.clone())
            })
            .collect();
        Value::Map(entries)
    }
}

impl<'a> IntoIterator for &'a Params {
    type Item = &'a Param;
    type IntoIter = std::slice::Iter<'a, Param>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl FromIterator<Param> for Params {
    fn from_iter<I: IntoIterator<Item = Param>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<V: Into<Value>> From<Vec<V>> for Params {
    fn from(values: Vec<V>) -> Self {
        values
            .into_iter()
            .map(|value| Param {
                key: ParamKey::Positional,
                value: value.into(),
            })
            .collect()
    }
}

/// Build a [`Params`] map from mixed positional and named entries.
///
/// Named entries are written `"name" => value` and must use a string
/// literal for the name.
///
/// ```
/// use microdb::params;
///
/// let p = params![1, ":name" => "Alice", None::<i64>];
/// assert_eq!(p.len(), 3);
/// ```
#[macro_export]
macro_rules! params {
    (@acc $p:ident;) => {};
    (@acc $p:ident; $name:literal => $value:expr $(, $($rest:tt)*)?) => {
        $p.push_named($name, $value);
        $crate::params!(@acc $p; $($($rest)*)?);
    };
    (@acc $p:ident; $value:expr $(, $($rest:tt)*)?) => {
        $p.push($value);
        $crate::params!(@acc $p; $($($rest)*)?);
    };
    () => {
        $crate::Params::new()
    };
    ($($body:tt)+) => {{
        let mut params = $crate::Params::new();
        $crate::params!(@acc params; $($body)+);
        params
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_macro_mixed_entries() {
        let p = params!["Foo", ":number" => 123, "bar",];
        let keys: Vec<_> = p.iter().map(|param| param.key.clone()).collect();
        assert_eq!(
            keys,
            vec![
                ParamKey::Positional,
                ParamKey::Named(":number".into()),
                ParamKey::Positional
            ]
        );
        assert_eq!(p.as_slice()[1].value, Value::Int(123));
    }

    #[test]
    fn test_macro_empty() {
        let p: Params = params![];
        assert!(p.is_empty());
    }

    #[test]
    fn test_to_value_numbers_only_unlabeled_entries() {
        let p = Params::new()
            .with("one")
            .with_named("key", "two")
            .with("three");
        assert_eq!(
            p.to_value(),
            Value::Map(vec![
                (MapKey::Index(0), Value::from("one")),
                (MapKey::Name("key".into()), Value::from("two")),
                (MapKey::Index(1), Value::from("three")),
            ])
        );
    }

    #[test]
    fn test_from_vec() {
        let p = Params::from(vec![Value::from("Foo"), Value::Int(123), Value::Null]);
        assert_eq!(p.len(), 3);
        assert!(p.iter().all(|param| param.key == ParamKey::Positional));
    }
}
