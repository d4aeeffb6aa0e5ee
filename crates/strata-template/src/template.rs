//! Template definitions and the validation engine.
//!
//! A [`Template`] describes what a key path must hold: its [`TemplateKind`]
//! says which values are acceptable and how they are coerced, and its
//! [`DefaultValue`] says what happens when no source defines the path.

use crate::error::TemplateError;
use crate::validated::{Validated, ValidatedView};
use indexmap::IndexMap;
use regex::Regex;
use std::path::Path;
use strata_view::{ConfigError, ConfigErrorKind, Value, ValueKind, View};

/// What a template yields when its path is absent from every source.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DefaultValue {
    /// Absence is a `NotFound` error
    #[default]
    Required,
    /// Absence yields this value (which may be `Value::Null`)
    Value(Value),
}

/// A compiled string pattern.
///
/// The whole string must match; the pattern is anchored at both ends.
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    regex: Regex,
}

impl Pattern {
    pub fn new(pattern: &str) -> Result<Self, TemplateError> {
        let regex = Regex::new(&format!("^(?:{})$", pattern)).map_err(|e| {
            TemplateError::InvalidPattern {
                pattern: pattern.to_string(),
                message: e.to_string(),
            }
        })?;
        Ok(Self {
            source: pattern.to_string(),
            regex,
        })
    }

    /// The pattern as written.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn is_match(&self, s: &str) -> bool {
        self.regex.is_match(s)
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

/// The accepted values of a choice template.
///
/// Membership uses structural equality, except that integers and floats
/// with the same numeric value are equal.
#[derive(Debug, Clone, PartialEq)]
pub enum Choices {
    /// The value must equal one of these and is returned as-is
    List(Vec<Value>),
    /// The value must equal one of the keys and is replaced by its mapped value
    Map(Vec<(Value, Value)>),
}

impl Choices {
    fn select(&self, value: &Value) -> Option<Value> {
        match self {
            Choices::List(items) => items
                .iter()
                .any(|item| choice_eq(item, value))
                .then(|| value.clone()),
            Choices::Map(pairs) => pairs
                .iter()
                .find(|(key, _)| choice_eq(key, value))
                .map(|(_, mapped)| mapped.clone()),
        }
    }

    fn rendered(&self) -> Vec<String> {
        match self {
            Choices::List(items) => items.iter().map(Value::to_string).collect(),
            Choices::Map(pairs) => pairs.iter().map(|(key, _)| key.to_string()).collect(),
        }
    }
}

/// Numbers compare by value across representations, so `2` matches `2.0`.
fn choice_eq(choice: &Value, value: &Value) -> bool {
    match (choice, value) {
        (Value::Integer(i), Value::Float(x)) | (Value::Float(x), Value::Integer(i)) => {
            *i as f64 == *x
        }
        _ => choice == value,
    }
}

/// The closed set of template variants.
#[derive(Debug, Clone, PartialEq)]
pub enum TemplateKind {
    /// Any value, passed through unchanged
    Any,
    /// The value must be an instance of the given kind
    Type(ValueKind),
    /// Integral numbers; floats are truncated and must fit in an `i64`
    Integer,
    /// Integral or floating numbers, preserving the representation
    Number,
    /// Strings, optionally constrained by a pattern
    String { pattern: Option<Pattern> },
    /// Membership in a declared set
    Choice(Choices),
    /// A sequence of strings, or one whitespace-separated string
    StrSeq,
    /// A path, made absolute against the anchor directory
    Filename,
    /// Declared keys, each validated by its own template
    Mapping(IndexMap<String, Template>),
}

/// A schema node: a kind plus a default.
///
/// Templates are stateless and never own configuration data, so one
/// template can validate any number of views.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    pub kind: TemplateKind,
    pub default: DefaultValue,
}

impl Template {
    fn required(kind: TemplateKind) -> Self {
        Self {
            kind,
            default: DefaultValue::Required,
        }
    }

    /// Accept any value.
    pub fn any() -> Self {
        Self::required(TemplateKind::Any)
    }

    /// Require an instance of `kind`.
    pub fn of_kind(kind: ValueKind) -> Self {
        Self::required(TemplateKind::Type(kind))
    }

    pub fn integer() -> Self {
        Self::required(TemplateKind::Integer)
    }

    pub fn number() -> Self {
        Self::required(TemplateKind::Number)
    }

    pub fn string() -> Self {
        Self::required(TemplateKind::String { pattern: None })
    }

    /// A string that must fully match `pattern`.
    pub fn pattern(pattern: &str) -> Result<Self, TemplateError> {
        Ok(Self::required(TemplateKind::String {
            pattern: Some(Pattern::new(pattern)?),
        }))
    }

    /// One of a list of values.
    pub fn choice<V: Into<Value>>(choices: impl IntoIterator<Item = V>) -> Self {
        Self::required(TemplateKind::Choice(Choices::List(
            choices.into_iter().map(Into::into).collect(),
        )))
    }

    /// One of the keys of a mapping; validates to the mapped value.
    pub fn choice_map<K, V>(choices: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<Value>,
        V: Into<Value>,
    {
        Self::required(TemplateKind::Choice(Choices::Map(
            choices
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )))
    }

    pub fn str_seq() -> Self {
        Self::required(TemplateKind::StrSeq)
    }

    pub fn filename() -> Self {
        Self::required(TemplateKind::Filename)
    }

    /// A mapping of declared keys to subtemplates.
    pub fn mapping<K: Into<String>>(entries: impl IntoIterator<Item = (K, Template)>) -> Self {
        Self::required(TemplateKind::Mapping(
            entries.into_iter().map(|(k, t)| (k.into(), t)).collect(),
        ))
    }

    /// Use `value` when the path is absent.
    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = DefaultValue::Value(value.into());
        self
    }

    /// Use null when the path is absent.
    pub fn optional(self) -> Self {
        self.with_default(Value::Null)
    }

    pub fn is_required(&self) -> bool {
        self.default == DefaultValue::Required
    }

    /// Subtemplates of a mapping template.
    pub fn subtemplates(&self) -> Option<&IndexMap<String, Template>> {
        match &self.kind {
            TemplateKind::Mapping(subtemplates) => Some(subtemplates),
            _ => None,
        }
    }

    /// Validate the value at `view`.
    ///
    /// Validation is all-or-nothing: the first failing leaf aborts the whole
    /// call. Source data is never modified.
    pub fn validate(&self, view: &View<'_>) -> Result<Validated, ConfigError> {
        match view.first()? {
            Some(resolved) => self.convert(resolved.value, view),
            None => self.missing(view),
        }
    }

    fn missing(&self, view: &View<'_>) -> Result<Validated, ConfigError> {
        match (&self.kind, &self.default) {
            (_, DefaultValue::Value(default)) => {
                tracing::debug!(path = %view.path(), "using template default");
                Ok(Validated::Value(default.clone()))
            }
            // Absent mappings are checked leaf by leaf so nested defaults apply.
            (TemplateKind::Mapping(subtemplates), DefaultValue::Required) => {
                validate_mapping(subtemplates, view)
            }
            (_, DefaultValue::Required) => Err(ConfigError::not_found(view.path().clone())),
        }
    }

    /// Coerce a present value according to this template's kind.
    fn convert(&self, value: &Value, view: &View<'_>) -> Result<Validated, ConfigError> {
        let converted = match &self.kind {
            TemplateKind::Mapping(subtemplates) => {
                return match value {
                    Value::Mapping(_) => validate_mapping(subtemplates, view),
                    other => Err(type_error(view, ValueKind::Mapping.name(), other)),
                };
            }
            TemplateKind::Any => Ok(value.clone()),
            TemplateKind::Type(kind) => {
                if kind.matches(value) {
                    Ok(value.clone())
                } else {
                    Err(type_error(view, kind.name(), value))
                }
            }
            TemplateKind::Integer => validate_integer(value, view),
            TemplateKind::Number => match value {
                Value::Integer(_) | Value::Float(_) => Ok(value.clone()),
                other => Err(type_error(view, ValueKind::Number.name(), other)),
            },
            TemplateKind::String { pattern } => validate_string(value, pattern.as_ref(), view),
            TemplateKind::Choice(choices) => choices.select(value).ok_or_else(|| {
                ConfigError::new(
                    ConfigErrorKind::InvalidChoice {
                        value: value.to_string(),
                        choices: choices.rendered(),
                    },
                    view.path().clone(),
                )
            }),
            TemplateKind::StrSeq => validate_str_seq(value, view),
            TemplateKind::Filename => validate_filename(value, view),
        };
        converted.map(Validated::Value)
    }
}

fn type_error(view: &View<'_>, expected: &str, got: &Value) -> ConfigError {
    ConfigError::type_mismatch(view.path().clone(), expected, got.kind().name())
}

fn validate_mapping(
    subtemplates: &IndexMap<String, Template>,
    view: &View<'_>,
) -> Result<Validated, ConfigError> {
    let mut entries = IndexMap::with_capacity(subtemplates.len());
    for (key, template) in subtemplates {
        let value = template.validate(&view.at(key.as_str()))?;
        entries.insert(key.clone(), value);
    }
    Ok(Validated::Mapping(ValidatedView::new(
        view.path().clone(),
        entries,
    )))
}

// Bounds of `i64` as floats; the upper one is exclusive.
const I64_MIN_F: f64 = -9_223_372_036_854_775_808.0;
const I64_END_F: f64 = 9_223_372_036_854_775_808.0;

fn validate_integer(value: &Value, view: &View<'_>) -> Result<Value, ConfigError> {
    match value {
        Value::Integer(n) => Ok(Value::Integer(*n)),
        Value::Float(x) => {
            let truncated = x.trunc();
            if truncated.is_finite() && (I64_MIN_F..I64_END_F).contains(&truncated) {
                Ok(Value::Integer(truncated as i64))
            } else {
                Err(ConfigError::new(
                    ConfigErrorKind::IntegerOutOfRange {
                        value: value.to_string(),
                    },
                    view.path().clone(),
                ))
            }
        }
        other => Err(type_error(view, ValueKind::Integer.name(), other)),
    }
}

fn validate_string(
    value: &Value,
    pattern: Option<&Pattern>,
    view: &View<'_>,
) -> Result<Value, ConfigError> {
    let s = match value {
        Value::String(s) => s,
        other => return Err(type_error(view, ValueKind::String.name(), other)),
    };

    if let Some(pattern) = pattern
        && !pattern.is_match(s)
    {
        return Err(ConfigError::new(
            ConfigErrorKind::PatternMismatch {
                value: s.clone(),
                pattern: pattern.as_str().to_string(),
            },
            view.path().clone(),
        ));
    }

    Ok(value.clone())
}

fn validate_str_seq(value: &Value, view: &View<'_>) -> Result<Value, ConfigError> {
    match value {
        Value::String(s) => Ok(Value::Sequence(
            s.split_whitespace()
                .map(|token| Value::String(token.to_string()))
                .collect(),
        )),
        Value::Sequence(items) => {
            for (index, item) in items.iter().enumerate() {
                if !matches!(item, Value::String(_)) {
                    return Err(ConfigError::type_mismatch(
                        view.path().child(index),
                        ValueKind::String.name(),
                        item.kind().name(),
                    ));
                }
            }
            Ok(value.clone())
        }
        other => Err(type_error(view, "string or sequence of strings", other)),
    }
}

fn validate_filename(value: &Value, view: &View<'_>) -> Result<Value, ConfigError> {
    let s = match value {
        Value::String(s) => s,
        other => return Err(type_error(view, "filename", other)),
    };

    let path = Path::new(s);
    if path.is_absolute() {
        return Ok(value.clone());
    }

    let resolved = view.anchor_dir()?.join(path);
    Ok(Value::String(resolved.to_string_lossy().into_owned()))
}
