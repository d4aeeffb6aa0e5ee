//! Validation entry points on [`View`].

use crate::shorthand::{Shorthand, as_template};
use crate::template::{Choices, Template, TemplateKind};
use crate::validated::Validated;
use std::path::PathBuf;
use strata_view::{ConfigError, Value, View};

/// Validate a view against a template or shorthand schema.
///
/// The typed helpers are equivalent to validating against the matching
/// required template and unwrapping the native value.
pub trait ValidateView {
    /// Validate against `schema`, which may be a [`Template`] or any
    /// [`Shorthand`] form.
    fn validate(&self, schema: impl Into<Shorthand>) -> Result<Validated, ConfigError>;

    fn as_str(&self) -> Result<String, ConfigError>;

    /// An integer; floats are truncated.
    fn as_i64(&self) -> Result<i64, ConfigError>;

    /// An integer or float, as given.
    fn as_number(&self) -> Result<Value, ConfigError>;

    fn as_str_seq(&self) -> Result<Vec<String>, ConfigError>;

    /// An absolute path.
    fn as_filename(&self) -> Result<PathBuf, ConfigError>;

    fn as_choice(&self, choices: Choices) -> Result<Value, ConfigError>;
}

impl ValidateView for View<'_> {
    fn validate(&self, schema: impl Into<Shorthand>) -> Result<Validated, ConfigError> {
        as_template(schema).validate(self)
    }

    fn as_str(&self) -> Result<String, ConfigError> {
        match self.validate(Template::string())?.into_value() {
            Value::String(s) => Ok(s),
            other => Err(unexpected(self, "string", &other)),
        }
    }

    fn as_i64(&self) -> Result<i64, ConfigError> {
        match self.validate(Template::integer())?.into_value() {
            Value::Integer(n) => Ok(n),
            other => Err(unexpected(self, "integer", &other)),
        }
    }

    fn as_number(&self) -> Result<Value, ConfigError> {
        Ok(self.validate(Template::number())?.into_value())
    }

    fn as_str_seq(&self) -> Result<Vec<String>, ConfigError> {
        match self.validate(Template::str_seq())?.into_value() {
            Value::Sequence(items) => items
                .into_iter()
                .map(|item| match item {
                    Value::String(s) => Ok(s),
                    other => Err(unexpected(self, "string", &other)),
                })
                .collect(),
            other => Err(unexpected(self, "sequence of strings", &other)),
        }
    }

    fn as_filename(&self) -> Result<PathBuf, ConfigError> {
        match self.validate(Template::filename())?.into_value() {
            Value::String(s) => Ok(PathBuf::from(s)),
            other => Err(unexpected(self, "filename", &other)),
        }
    }

    fn as_choice(&self, choices: Choices) -> Result<Value, ConfigError> {
        let template = Template {
            kind: TemplateKind::Choice(choices),
            default: Default::default(),
        };
        Ok(self.validate(template)?.into_value())
    }
}

fn unexpected(view: &View<'_>, expected: &str, got: &Value) -> ConfigError {
    ConfigError::type_mismatch(view.path().clone(), expected, got.kind().name())
}
