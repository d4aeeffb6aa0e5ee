//! Configuration sources and the priority-ordered stack that holds them.

use crate::error::ConfigError;
use crate::path::{KeyPath, PathSegment};
use crate::value::{Value, ValueKind};
use crate::view::View;
use indexmap::IndexMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// One parsed data tree plus provenance metadata.
///
/// Sources are immutable once built. Changing configuration means
/// composing a new [`SourceStack`] with an extra source on top.
#[derive(Debug, Clone, PartialEq)]
pub struct Source {
    data: Value,
    origin: Option<PathBuf>,
    default: bool,
    read_only: bool,
}

/// Outcome of walking a path through a single source.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<'a> {
    /// The source defines a value at the path
    Found(&'a Value),
    /// The source does not define the path
    Missing,
    /// A non-collection value sits on the path.
    ///
    /// `depth` is the number of segments walked before reaching it.
    Blocked { depth: usize, kind: ValueKind },
}

impl Source {
    /// Create a source from a top-level mapping.
    pub fn new(entries: IndexMap<String, Value>) -> Self {
        Self {
            data: Value::Mapping(entries),
            origin: None,
            default: false,
            read_only: true,
        }
    }

    /// Create a source from an arbitrary value, which must be a mapping.
    pub fn from_value(value: Value) -> Result<Self, ConfigError> {
        match value {
            Value::Mapping(entries) => Ok(Self::new(entries)),
            other => Err(ConfigError::type_mismatch(
                KeyPath::root(),
                ValueKind::Mapping.name(),
                other.kind().name(),
            )),
        }
    }

    /// Record the file this source was parsed from.
    ///
    /// The file is never read; its directory anchors relative filenames.
    pub fn with_origin(mut self, origin: impl Into<PathBuf>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    /// Flag this source as the application's default layer.
    pub fn as_default(mut self) -> Self {
        self.default = true;
        self
    }

    /// Mark this source as a writable overlay.
    pub fn writable(mut self) -> Self {
        self.read_only = false;
        self
    }

    pub fn data(&self) -> &Value {
        &self.data
    }

    pub fn origin(&self) -> Option<&Path> {
        self.origin.as_deref()
    }

    pub fn is_default(&self) -> bool {
        self.default
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Directory containing the origin file, if there is one.
    pub fn origin_dir(&self) -> Option<&Path> {
        self.origin
            .as_deref()
            .and_then(Path::parent)
            .filter(|dir| !dir.as_os_str().is_empty())
    }

    /// Walk `path` through this source's data.
    pub fn lookup(&self, path: &[PathSegment]) -> Lookup<'_> {
        let mut current = &self.data;
        for (depth, segment) in path.iter().enumerate() {
            current = match (current, segment) {
                (Value::Mapping(map), PathSegment::Key(key)) => match map.get(key) {
                    Some(value) => value,
                    None => return Lookup::Missing,
                },
                (Value::Mapping(_), PathSegment::Index(_)) => return Lookup::Missing,
                (Value::Sequence(items), PathSegment::Index(index)) => match items.get(*index) {
                    Some(value) => value,
                    None => return Lookup::Missing,
                },
                (other, _) => {
                    return Lookup::Blocked {
                        depth,
                        kind: other.kind(),
                    };
                }
            };
        }
        Lookup::Found(current)
    }
}

impl TryFrom<Value> for Source {
    type Error = ConfigError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Source::from_value(value)
    }
}

/// Priority-ordered sources; index 0 has the highest priority.
///
/// The stack owns ordering and provenance only. Resolution happens
/// through [`View`]s borrowed from it.
#[derive(Debug, Clone, Default)]
pub struct SourceStack {
    sources: Vec<Arc<Source>>,
}

impl SourceStack {
    /// Create a stack; the first source has the highest priority.
    pub fn new(sources: Vec<Source>) -> Self {
        Self {
            sources: sources.into_iter().map(Arc::new).collect(),
        }
    }

    /// Create an empty stack.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a stack from plain values, each of which must be a mapping.
    pub fn from_values(values: Vec<Value>) -> Result<Self, ConfigError> {
        let sources = values
            .into_iter()
            .map(Source::from_value)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(sources))
    }

    /// A new stack with `source` above every existing source.
    pub fn with_source(&self, source: Source) -> SourceStack {
        let mut sources = Vec::with_capacity(self.sources.len() + 1);
        sources.push(Arc::new(source));
        sources.extend(self.sources.iter().cloned());
        SourceStack { sources }
    }

    /// A new stack with `source` below every existing source.
    pub fn with_fallback(&self, source: Source) -> SourceStack {
        let mut sources = self.sources.clone();
        sources.push(Arc::new(source));
        SourceStack { sources }
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Source> {
        self.sources.get(index).map(|source| &**source)
    }

    /// Iterate sources from highest to lowest priority.
    pub fn iter(&self) -> impl Iterator<Item = &Source> {
        self.sources.iter().map(|source| &**source)
    }

    /// The first source flagged as the default layer.
    pub fn default_source(&self) -> Option<&Source> {
        self.iter().find(|source| source.is_default())
    }

    /// Directory of the first default layer that records an origin.
    pub fn default_origin_dir(&self) -> Option<&Path> {
        self.iter()
            .filter(|source| source.is_default())
            .find_map(Source::origin_dir)
    }

    /// A view at the root of this stack.
    pub fn root(&self) -> View<'_> {
        View::new(self)
    }
}

impl From<Source> for SourceStack {
    fn from(source: Source) -> Self {
        SourceStack::new(vec![source])
    }
}

impl FromIterator<Source> for SourceStack {
    fn from_iter<I: IntoIterator<Item = Source>>(iter: I) -> Self {
        SourceStack::new(iter.into_iter().collect())
    }
}
