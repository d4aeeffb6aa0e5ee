//! Schema shorthand and its inference into concrete templates.
//!
//! Writing out a full [`Template`] for every key is noisy. A [`Shorthand`]
//! accepts the forms people naturally write and [`as_template`] turns each
//! one into exactly one template:
//!
//! | Shorthand                  | Template                                  |
//! |----------------------------|-------------------------------------------|
//! | a template                 | itself                                    |
//! | `5`                        | `Integer`, default `5`                    |
//! | `2.5`                      | `Number`, default `2.5`                   |
//! | `"x"`                      | `String`, default `"x"`                   |
//! | `true`                     | `Type(Bool)`, default `true`              |
//! | a sequence literal         | `Type(Sequence)`, default the sequence    |
//! | a mapping                  | `Mapping`, values inferred recursively    |
//! | `None` / null              | `Any`, required                           |
//! | `ValueKind::Integer`       | `Integer`, required                       |
//! | `ValueKind::Float`/`Number`| `Number`, required                        |
//! | `ValueKind::String`        | `String`, required                        |
//! | any other kind             | `Type(kind)`, required                    |

use crate::template::Template;
use indexmap::IndexMap;
use strata_view::{Value, ValueKind};

/// A schema written in shorthand.
#[derive(Debug, Clone, PartialEq)]
pub enum Shorthand {
    /// An already-built template
    Template(Template),
    /// A concrete literal, used as the default
    Literal(Value),
    /// A bare kind with no default
    Kind(ValueKind),
    /// Declared keys with shorthand values
    Mapping(IndexMap<String, Shorthand>),
    /// Accept anything, required
    None,
}

/// Convert shorthand into a concrete template.
///
/// The conversion is total and idempotent on templates.
pub fn as_template(shorthand: impl Into<Shorthand>) -> Template {
    match shorthand.into() {
        Shorthand::Template(template) => template,
        Shorthand::Mapping(entries) => Template::mapping(
            entries
                .into_iter()
                .map(|(key, value)| (key, as_template(value))),
        ),
        Shorthand::Kind(kind) => template_for_kind(kind),
        Shorthand::Literal(value) => template_for_literal(value),
        Shorthand::None => Template::any(),
    }
}

fn template_for_kind(kind: ValueKind) -> Template {
    match kind {
        ValueKind::Integer => Template::integer(),
        ValueKind::Float | ValueKind::Number => Template::number(),
        ValueKind::String => Template::string(),
        other => Template::of_kind(other),
    }
}

fn template_for_literal(value: Value) -> Template {
    match value {
        Value::Null => Template::any(),
        Value::Integer(_) => Template::integer().with_default(value),
        Value::Float(_) => Template::number().with_default(value),
        Value::String(_) => Template::string().with_default(value),
        Value::Bool(_) => Template::of_kind(ValueKind::Bool).with_default(value),
        Value::Sequence(_) => Template::of_kind(ValueKind::Sequence).with_default(value),
        Value::Mapping(entries) => Template::mapping(
            entries
                .into_iter()
                .map(|(key, value)| (key, template_for_literal(value))),
        ),
    }
}

impl From<Template> for Shorthand {
    fn from(template: Template) -> Self {
        Shorthand::Template(template)
    }
}

impl From<ValueKind> for Shorthand {
    fn from(kind: ValueKind) -> Self {
        Shorthand::Kind(kind)
    }
}

impl From<Value> for Shorthand {
    fn from(value: Value) -> Self {
        Shorthand::Literal(value)
    }
}

impl From<i64> for Shorthand {
    fn from(n: i64) -> Self {
        Shorthand::Literal(Value::Integer(n))
    }
}

impl From<i32> for Shorthand {
    fn from(n: i32) -> Self {
        Shorthand::Literal(Value::from(n))
    }
}

impl From<f64> for Shorthand {
    fn from(x: f64) -> Self {
        Shorthand::Literal(Value::Float(x))
    }
}

impl From<bool> for Shorthand {
    fn from(b: bool) -> Self {
        Shorthand::Literal(Value::Bool(b))
    }
}

impl From<&str> for Shorthand {
    fn from(s: &str) -> Self {
        Shorthand::Literal(Value::from(s))
    }
}

impl From<String> for Shorthand {
    fn from(s: String) -> Self {
        Shorthand::Literal(Value::String(s))
    }
}

impl From<IndexMap<String, Shorthand>> for Shorthand {
    fn from(entries: IndexMap<String, Shorthand>) -> Self {
        Shorthand::Mapping(entries)
    }
}

impl<K, S, const N: usize> From<[(K, S); N]> for Shorthand
where
    K: Into<String>,
    S: Into<Shorthand>,
{
    fn from(entries: [(K, S); N]) -> Self {
        Shorthand::Mapping(
            entries
                .into_iter()
                .map(|(k, s)| (k.into(), s.into()))
                .collect(),
        )
    }
}

impl<T: Into<Shorthand>> From<Option<T>> for Shorthand {
    fn from(value: Option<T>) -> Self {
        value.map_or(Shorthand::None, Into::into)
    }
}
