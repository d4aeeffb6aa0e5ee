//! Errors raised while building templates.

use thiserror::Error;

/// A template could not be constructed.
///
/// These are schema mistakes, reported when the template is built rather
/// than when configuration is validated against it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TemplateError {
    /// The string pattern is not a valid regular expression.
    #[error("Invalid pattern '{pattern}': {message}")]
    InvalidPattern {
        /// The pattern as written
        pattern: String,
        /// Regex compiler message
        message: String,
    },
}
