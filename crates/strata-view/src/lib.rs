//! Layered configuration sources with lazy, per-leaf resolution.
//!
//! This crate holds the data side of layered configuration: parsed trees
//! wrapped as [`Source`]s, stacked by priority in a [`SourceStack`], and read
//! through [`View`]s that resolve one key path at a time.
//!
//! # Key Features
//!
//! - **No eager merge**: a view scans the stack only when asked
//! - **Per-leaf precedence**: an override layer may patch a single nested key
//! - **Provenance**: every resolved value knows which source supplied it, which
//!   anchors relative filenames
//! - **Precise errors**: every [`ConfigError`] names the full key path
//!
//! # Example
//!
//! ```rust
//! use strata_view::{SourceStack, Value};
//!
//! let stack = SourceStack::from_values(vec![
//!     Value::from(serde_json::json!({"server": {"port": 8080}})),
//!     Value::from(serde_json::json!({"server": {"port": 80, "host": "localhost"}})),
//! ])
//! .unwrap();
//!
//! let server = stack.root().at("server");
//! assert_eq!(server.at("port").get().unwrap(), &Value::from(8080));
//! assert_eq!(server.at("host").get().unwrap(), &Value::from("localhost"));
//! ```

mod convert;
mod error;
mod flatten;
mod path;
mod source;
mod value;
mod view;

pub use error::{ConfigError, ConfigErrorKind};

pub use flatten::FlattenOptions;

pub use path::{KeyPath, PathSegment};

pub use source::{Lookup, Source, SourceStack};

pub use value::{Value, ValueKind};

pub use view::{Resolved, View};
