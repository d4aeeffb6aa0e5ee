//! Materialization of a lazily resolved view into an owned value.
//!
//! Flattening applies the same per-leaf precedence as [`View::get`]:
//! mappings are merged key by key across sources, while sequences and
//! scalars come whole from the first source that defines them.
//!
//! # Depth Limiting
//!
//! Flattening enforces a maximum depth so that pathological inputs fail
//! with an error instead of exhausting the stack. The default limit is 256.

use crate::error::{ConfigError, ConfigErrorKind};
use crate::value::Value;
use crate::view::View;
use indexmap::IndexMap;

/// Options for flattening.
#[derive(Debug, Clone)]
pub struct FlattenOptions {
    /// Maximum nesting depth (default: 256).
    pub max_depth: usize,
}

impl Default for FlattenOptions {
    fn default() -> Self {
        Self { max_depth: 256 }
    }
}

impl View<'_> {
    /// Flatten with default options.
    pub fn flatten(&self) -> Result<Value, ConfigError> {
        self.flatten_with_options(&FlattenOptions::default())
    }

    /// Flatten with custom options.
    ///
    /// Fails with `NotFound` if nothing defines this view's path.
    pub fn flatten_with_options(&self, options: &FlattenOptions) -> Result<Value, ConfigError> {
        flatten_view(self, 0, options)
    }
}

fn flatten_view(view: &View<'_>, depth: usize, options: &FlattenOptions) -> Result<Value, ConfigError> {
    if depth > options.max_depth {
        return Err(ConfigError::new(
            ConfigErrorKind::NestingTooDeep {
                max_depth: options.max_depth,
            },
            view.path().clone(),
        ));
    }

    match view.get()? {
        Value::Mapping(_) => {
            let mut entries = IndexMap::new();
            for key in view.keys() {
                let child = view.at(key.as_str());
                entries.insert(key, flatten_view(&child, depth + 1, options)?);
            }
            Ok(Value::Mapping(entries))
        }
        other => Ok(other.clone()),
    }
}
