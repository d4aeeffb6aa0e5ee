//! Conversion from already-parsed YAML and JSON trees to [`Value`].
//!
//! Parsing itself happens elsewhere; these conversions only reshape the
//! parser's output into the generic tree that sources hold.

use crate::value::Value;
use indexmap::IndexMap;
use yaml_rust2::Yaml;

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Integer(i),
                // u64 beyond i64::MAX and all non-integers
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Sequence(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(entries) => Value::Mapping(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<&Yaml> for Value {
    fn from(yaml: &Yaml) -> Self {
        match yaml {
            Yaml::Null | Yaml::BadValue | Yaml::Alias(_) => Value::Null,
            Yaml::Boolean(b) => Value::Bool(*b),
            Yaml::Integer(n) => Value::Integer(*n),
            Yaml::Real(_) => Value::Float(yaml.as_f64().unwrap_or(f64::NAN)),
            Yaml::String(s) => Value::String(s.clone()),
            Yaml::Array(items) => Value::Sequence(items.iter().map(Value::from).collect()),
            Yaml::Hash(hash) => {
                let mut entries = IndexMap::with_capacity(hash.len());
                for (key, value) in hash {
                    match yaml_key(key) {
                        Some(key) => {
                            entries.insert(key, Value::from(value));
                        }
                        None => {
                            tracing::debug!(?key, "skipping mapping entry with non-scalar key");
                        }
                    }
                }
                Value::Mapping(entries)
            }
        }
    }
}

impl From<Yaml> for Value {
    fn from(yaml: Yaml) -> Self {
        Value::from(&yaml)
    }
}

/// Render a scalar YAML key as a string; collection keys have no rendering.
fn yaml_key(key: &Yaml) -> Option<String> {
    match key {
        Yaml::String(s) => Some(s.clone()),
        Yaml::Integer(n) => Some(n.to_string()),
        Yaml::Real(s) => Some(s.clone()),
        Yaml::Boolean(b) => Some(b.to_string()),
        Yaml::Null => Some("null".to_string()),
        _ => None,
    }
}
