//! Error taxonomy for resolution and validation.

use crate::path::KeyPath;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Structured error kinds.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum ConfigErrorKind {
    /// No source defines the path and there is no default
    NotFound,

    /// The value has the wrong structural kind
    TypeMismatch { expected: String, got: String },

    /// String does not match the configured pattern
    PatternMismatch { value: String, pattern: String },

    /// Value is not one of the declared choices
    InvalidChoice { value: String, choices: Vec<String> },

    /// A float cannot be represented as an integer
    IntegerOutOfRange { value: String },

    /// Key is not declared by the template that produced the result
    UndeclaredKey,

    /// Flattening exceeded the configured nesting limit
    NestingTooDeep { max_depth: usize },

    /// The working directory could not be read to anchor a relative filename
    WorkingDirectory { message: String },
}

impl ConfigErrorKind {
    /// Get the error code for this error kind
    pub fn error_code(&self) -> &'static str {
        match self {
            ConfigErrorKind::NotFound => "S-1-10",
            ConfigErrorKind::TypeMismatch { .. } => "S-1-11",
            ConfigErrorKind::InvalidChoice { .. } => "S-1-12",
            ConfigErrorKind::PatternMismatch { .. } => "S-1-14",
            ConfigErrorKind::IntegerOutOfRange { .. } => "S-1-15",
            ConfigErrorKind::UndeclaredKey => "S-1-18",
            ConfigErrorKind::NestingTooDeep { .. } => "S-1-20",
            ConfigErrorKind::WorkingDirectory { .. } => "S-1-99",
        }
    }

    /// Format a human-readable message from this error kind
    pub fn message(&self) -> String {
        match self {
            ConfigErrorKind::NotFound => "not found".to_string(),
            ConfigErrorKind::TypeMismatch { expected, got } => {
                format!("must be {}, not {}", expected, got)
            }
            ConfigErrorKind::PatternMismatch { value, pattern } => {
                format!("'{}' does not match pattern '{}'", value, pattern)
            }
            ConfigErrorKind::InvalidChoice { value, choices } => {
                format!("must be one of {}, not {}", choices.join(", "), value)
            }
            ConfigErrorKind::IntegerOutOfRange { value } => {
                format!("{} is out of range for an integer", value)
            }
            ConfigErrorKind::UndeclaredKey => "is not declared in the template".to_string(),
            ConfigErrorKind::NestingTooDeep { max_depth } => {
                format!("nesting too deep (max depth: {})", max_depth)
            }
            ConfigErrorKind::WorkingDirectory { message } => {
                format!("cannot read working directory: {}", message)
            }
        }
    }
}

/// A resolution or validation failure at a specific key path.
#[derive(Debug, Clone, PartialEq, Error)]
pub struct ConfigError {
    pub kind: ConfigErrorKind,
    pub path: KeyPath,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.kind.message())
    }
}

impl ConfigError {
    pub fn new(kind: ConfigErrorKind, path: KeyPath) -> Self {
        Self { kind, path }
    }

    pub fn not_found(path: KeyPath) -> Self {
        Self::new(ConfigErrorKind::NotFound, path)
    }

    pub fn type_mismatch(
        path: KeyPath,
        expected: impl Into<String>,
        got: impl Into<String>,
    ) -> Self {
        Self::new(
            ConfigErrorKind::TypeMismatch {
                expected: expected.into(),
                got: got.into(),
            },
            path,
        )
    }

    pub fn undeclared_key(path: KeyPath) -> Self {
        Self::new(ConfigErrorKind::UndeclaredKey, path)
    }

    pub fn message(&self) -> String {
        self.kind.message()
    }

    pub fn error_code(&self) -> &'static str {
        self.kind.error_code()
    }

    /// The path has no value and no default applies.
    pub fn is_not_found(&self) -> bool {
        matches!(self.kind, ConfigErrorKind::NotFound)
    }

    /// The value's structural kind is wrong.
    pub fn is_type_error(&self) -> bool {
        matches!(self.kind, ConfigErrorKind::TypeMismatch { .. })
    }

    /// The value has the right kind but fails a semantic constraint.
    pub fn is_value_error(&self) -> bool {
        matches!(
            self.kind,
            ConfigErrorKind::PatternMismatch { .. }
                | ConfigErrorKind::InvalidChoice { .. }
                | ConfigErrorKind::IntegerOutOfRange { .. }
        )
    }

    pub fn is_undeclared_key(&self) -> bool {
        matches!(self.kind, ConfigErrorKind::UndeclaredKey)
    }
}
