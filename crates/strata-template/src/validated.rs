//! Results of validation.
//!
//! Scalar templates produce a plain [`Value`]. Mapping templates produce a
//! [`ValidatedView`], which only exposes the keys the template declared:
//! keys present in the source data but absent from the template are dropped
//! during validation and can never be read back.

use indexmap::IndexMap;
use std::ops::Index;
use strata_view::{ConfigError, KeyPath, Value};

/// A validated value.
#[derive(Debug, Clone, PartialEq)]
pub enum Validated {
    /// Result of a non-mapping template (or a mapping template's default)
    Value(Value),
    /// Result of a mapping template
    Mapping(ValidatedView),
}

/// A validated mapping restricted to declared keys.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedView {
    path: KeyPath,
    entries: IndexMap<String, Validated>,
}

impl ValidatedView {
    pub(crate) fn new(path: KeyPath, entries: IndexMap<String, Validated>) -> Self {
        Self { path, entries }
    }

    /// Look up a declared key.
    ///
    /// Fails with an `UndeclaredKey` error for keys the template did not
    /// declare, whatever the source data contains.
    pub fn get(&self, key: &str) -> Result<&Validated, ConfigError> {
        self.entries
            .get(key)
            .ok_or_else(|| ConfigError::undeclared_key(self.path.child(key)))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Declared keys in template order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Validated)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Path of the mapping this result was validated from.
    pub fn path(&self) -> &KeyPath {
        &self.path
    }

    pub fn into_value(self) -> Value {
        Value::Mapping(
            self.entries
                .into_iter()
                .map(|(k, v)| (k, v.into_value()))
                .collect(),
        )
    }
}

/// Panics on undeclared keys, like indexing a `HashMap`.
impl Index<&str> for ValidatedView {
    type Output = Validated;

    fn index(&self, key: &str) -> &Validated {
        match self.get(key) {
            Ok(value) => value,
            Err(e) => panic!("{}", e),
        }
    }
}

impl Validated {
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Validated::Value(value) => Some(value),
            Validated::Mapping(_) => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&ValidatedView> {
        match self {
            Validated::Mapping(view) => Some(view),
            Validated::Value(_) => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        self.as_value().and_then(Value::as_i64)
    }

    pub fn as_f64(&self) -> Option<f64> {
        self.as_value().and_then(Value::as_f64)
    }

    pub fn as_str(&self) -> Option<&str> {
        self.as_value().and_then(Value::as_str)
    }

    pub fn as_bool(&self) -> Option<bool> {
        self.as_value().and_then(Value::as_bool)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Validated::Value(Value::Null))
    }

    /// Get as a list of strings if this is a sequence of strings.
    pub fn as_str_seq(&self) -> Option<Vec<&str>> {
        self.as_value()?
            .as_sequence()?
            .iter()
            .map(Value::as_str)
            .collect()
    }

    /// Convert back into a plain value tree.
    pub fn into_value(self) -> Value {
        match self {
            Validated::Value(value) => value,
            Validated::Mapping(view) => view.into_value(),
        }
    }
}

/// Panics unless this is a mapping result declaring `key`.
impl Index<&str> for Validated {
    type Output = Validated;

    fn index(&self, key: &str) -> &Validated {
        match self {
            Validated::Mapping(view) => &view[key],
            Validated::Value(value) => {
                panic!("cannot index {} value with '{}'", value.kind(), key)
            }
        }
    }
}

impl PartialEq<Value> for Validated {
    fn eq(&self, other: &Value) -> bool {
        self.as_value() == Some(other)
    }
}

impl From<Validated> for Value {
    fn from(validated: Validated) -> Self {
        validated.into_value()
    }
}
