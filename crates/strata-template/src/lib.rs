//! Declarative validation of layered configuration.
//!
//! A [`Template`] tree describes the expected shape of configuration: the
//! kind of each value, constraints on it, and a default for when no source
//! defines it. Validating a [`View`](strata_view::View) pulls values from the
//! source stack leaf by leaf, coerces them, and returns a read-only
//! [`Validated`] result.
//!
//! # Example
//!
//! ```rust
//! use strata_template::{Template, ValidateView};
//! use strata_view::{SourceStack, Value, ValueKind};
//!
//! let stack = SourceStack::from_values(vec![
//!     Value::from(serde_json::json!({"server": {"port": 9000}})),
//!     Value::from(serde_json::json!({"server": {"port": 80, "host": "0.0.0.0"}})),
//! ])
//! .unwrap();
//!
//! let valid = stack
//!     .root()
//!     .validate([(
//!         "server",
//!         [
//!             ("port", Template::integer()),
//!             ("host", Template::string()),
//!             ("workers", Template::integer().with_default(4)),
//!         ],
//!     )])
//!     .unwrap();
//!
//! assert_eq!(valid["server"]["port"].as_i64(), Some(9000));
//! assert_eq!(valid["server"]["host"].as_str(), Some("0.0.0.0"));
//! assert_eq!(valid["server"]["workers"].as_i64(), Some(4));
//!
//! // Shorthand: a bare kind is required, a literal is a default.
//! let port = stack.root().at("server").at("port").validate(ValueKind::Integer).unwrap();
//! assert_eq!(port, Value::from(9000));
//! ```

mod error;
mod ext;
mod shorthand;
mod template;
mod validated;

pub use error::TemplateError;

pub use ext::ValidateView;

pub use shorthand::{Shorthand, as_template};

pub use template::{Choices, DefaultValue, Pattern, Template, TemplateKind};

pub use validated::{Validated, ValidatedView};

// Re-export for convenience
pub use strata_view::{ConfigError, ConfigErrorKind, Value, ValueKind};
