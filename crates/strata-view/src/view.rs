//! Cursor-based lazy resolution over a [`SourceStack`].
//!
//! A `View` stores only a borrowed stack and a key path. Nothing is merged
//! up front: each query scans the sources in priority order and walks the
//! path through each one. Precedence is per leaf, so a small override file
//! can replace one nested key while lower sources still answer its siblings.
//!
//! # Example
//!
//! ```rust
//! use strata_view::{Source, SourceStack, Value};
//!
//! let user = Source::from_value(Value::mapping([("ui", Value::mapping([("theme", "dark")]))])).unwrap();
//! let defaults = Source::from_value(Value::mapping([(
//!     "ui",
//!     Value::mapping([("theme", Value::from("light")), ("size", Value::from(12))]),
//! )]))
//! .unwrap()
//! .as_default();
//!
//! let stack = SourceStack::new(vec![user, defaults]);
//! let ui = stack.root().at("ui");
//! assert_eq!(ui.at("theme").get().unwrap(), &Value::from("dark"));
//! assert_eq!(ui.at("size").get().unwrap(), &Value::from(12));
//! ```

use crate::error::{ConfigError, ConfigErrorKind};
use crate::path::{KeyPath, PathSegment};
use crate::source::{Lookup, Source, SourceStack};
use crate::value::{Value, ValueKind};
use indexmap::IndexSet;
use std::path::PathBuf;

/// An addressable handle into a [`SourceStack`] at a key path.
///
/// Views are cheap to create and never copy source data.
#[derive(Debug, Clone)]
pub struct View<'a> {
    stack: &'a SourceStack,
    path: KeyPath,
}

/// A value together with the source that supplied it.
#[derive(Debug, Clone, Copy)]
pub struct Resolved<'a> {
    pub value: &'a Value,
    pub source: &'a Source,
    /// Position of the source in the stack (0 = highest priority)
    pub source_index: usize,
}

impl<'a> View<'a> {
    /// A view at the root of `stack`.
    pub fn new(stack: &'a SourceStack) -> Self {
        Self {
            stack,
            path: KeyPath::root(),
        }
    }

    /// Navigate to a child key or index.
    ///
    /// The view is valid even if nothing defines the path.
    pub fn at(&self, segment: impl Into<PathSegment>) -> View<'a> {
        View {
            stack: self.stack,
            path: self.path.child(segment),
        }
    }

    /// Navigate several segments at once.
    pub fn at_path<S: Into<PathSegment>>(&self, segments: impl IntoIterator<Item = S>) -> View<'a> {
        let mut view = self.clone();
        for segment in segments {
            view = view.at(segment);
        }
        view
    }

    pub fn path(&self) -> &KeyPath {
        &self.path
    }

    /// Rendered path for diagnostics, e.g. `server.hosts[0]`.
    pub fn name(&self) -> String {
        self.path.to_string()
    }

    pub fn stack(&self) -> &'a SourceStack {
        self.stack
    }

    /// Find the highest-priority source defining this path.
    ///
    /// Sources are consulted in order. A source holding a non-collection
    /// value on the path before any higher source answers is a type error
    /// reported at the blocking node.
    pub fn first(&self) -> Result<Option<Resolved<'a>>, ConfigError> {
        for (source_index, source) in self.stack.iter().enumerate() {
            match source.lookup(self.path.segments()) {
                Lookup::Found(value) => {
                    tracing::trace!(path = %self.path, source_index, "resolved");
                    return Ok(Some(Resolved {
                        value,
                        source,
                        source_index,
                    }));
                }
                Lookup::Missing => {}
                Lookup::Blocked { depth, kind } => {
                    return Err(self.blocked_error(depth, kind));
                }
            }
        }
        Ok(None)
    }

    /// Check if any source defines a value at exactly this path.
    pub fn exists(&self) -> bool {
        self.stack
            .iter()
            .any(|source| matches!(source.lookup(self.path.segments()), Lookup::Found(_)))
    }

    /// Resolve the value at this path (first source wins).
    pub fn get(&self) -> Result<&'a Value, ConfigError> {
        match self.first()? {
            Some(resolved) => Ok(resolved.value),
            None => Err(ConfigError::not_found(self.path.clone())),
        }
    }

    /// Mapping keys at this path, unioned across sources.
    ///
    /// Keys appear in stack order with first-seen precedence. Sources that
    /// hold anything other than a mapping here are skipped.
    pub fn keys(&self) -> Vec<String> {
        let mut seen = IndexSet::new();
        for source in self.stack.iter() {
            if let Lookup::Found(Value::Mapping(map)) = source.lookup(self.path.segments()) {
                seen.extend(map.keys().cloned());
            }
        }
        seen.into_iter().collect()
    }

    /// Child views: mapping keys, or sequence indices.
    ///
    /// A sequence's length comes from the source that answers this path;
    /// sequences are never concatenated across sources.
    pub fn children(&self) -> Result<Vec<(PathSegment, View<'a>)>, ConfigError> {
        let segments: Vec<PathSegment> = match self.first()? {
            None => Vec::new(),
            Some(Resolved {
                value: Value::Mapping(_),
                ..
            }) => self.keys().into_iter().map(PathSegment::Key).collect(),
            Some(Resolved {
                value: Value::Sequence(items),
                ..
            }) => (0..items.len()).map(PathSegment::Index).collect(),
            Some(Resolved { value, .. }) => {
                return Err(ConfigError::type_mismatch(
                    self.path.clone(),
                    "mapping or sequence",
                    value.kind().name(),
                ));
            }
        };
        Ok(segments
            .into_iter()
            .map(|segment| (segment.clone(), self.at(segment)))
            .collect())
    }

    /// Directory that relative filenames at this path are resolved against.
    ///
    /// The source answering this path anchors it if it has an origin file;
    /// otherwise the first default layer with an origin does; otherwise
    /// the process working directory. The result is always absolute.
    pub fn anchor_dir(&self) -> Result<PathBuf, ConfigError> {
        let answering = self.first()?;
        let anchor = answering
            .and_then(|resolved| resolved.source.origin_dir())
            .or_else(|| self.stack.default_origin_dir());

        match anchor {
            Some(dir) if dir.is_absolute() => Ok(dir.to_path_buf()),
            Some(dir) => Ok(self.working_dir()?.join(dir)),
            None => self.working_dir(),
        }
    }

    fn working_dir(&self) -> Result<PathBuf, ConfigError> {
        std::env::current_dir().map_err(|e| {
            ConfigError::new(
                ConfigErrorKind::WorkingDirectory {
                    message: e.to_string(),
                },
                self.path.clone(),
            )
        })
    }

    fn blocked_error(&self, depth: usize, kind: ValueKind) -> ConfigError {
        let expected = match self.path.segments().get(depth) {
            Some(PathSegment::Index(_)) => ValueKind::Sequence.name(),
            _ => ValueKind::Mapping.name(),
        };
        ConfigError::type_mismatch(self.path.prefix(depth), expected, kind.name())
    }
}
