//! Type-erased component registry.
//!
//! Entries are addressed by `(Dimension, name)` and hold their value as
//! `Arc<dyn Any + Send + Sync>`, so a single registry can carry components,
//! configuration sources, and command handlers side by side. The registry is
//! cheaply clonable; clones share the same underlying map.

use fxhash::FxHashMap;
use parking_lot::RwLock;
use plinth_domain::registry::{Dimension, Metadata};
use std::any::Any;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// A type-erased, shared value held by the registry.
pub type SharedComponent = Arc<dyn Any + Send + Sync>;

/// A registered value together with its address and metadata.
#[derive(Clone)]
pub struct RegistryEntry {
    /// Name the entry was registered under.
    pub name: String,
    /// Namespace the entry lives in.
    pub dimension: Dimension,
    /// The value itself, type-erased.
    pub value: SharedComponent,
    /// Priority, dependencies, and discovery provenance.
    pub metadata: Metadata,
}

impl fmt::Debug for RegistryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryEntry")
            .field("name", &self.name)
            .field("dimension", &self.dimension)
            .field("metadata", &self.metadata)
            .finish_non_exhaustive()
    }
}

/// Thread-safe registry of named components, grouped by [`Dimension`].
///
/// Registration replaces any existing entry under the same address; entries
/// are never removed. This keeps lookups lock-light and makes start-up
/// wiring idempotent.
///
/// # Examples
///
/// ```rust
/// use plinth_hub::Registry;
/// use plinth_domain::registry::{Dimension, Metadata};
///
/// let registry = Registry::new();
/// registry.register("cache", Dimension::COMPONENT, 42_u32, Metadata::default());
///
/// let cache = registry.get_as::<u32>("cache", &Dimension::COMPONENT).unwrap();
/// assert_eq!(*cache, 42);
/// ```
#[derive(Clone, Default)]
pub struct Registry {
    entries: Arc<RwLock<FxHashMap<Dimension, FxHashMap<String, RegistryEntry>>>>,
}

impl Registry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `value` under `(dimension, name)`, replacing any previous
    /// entry at the same address.
    ///
    /// The value is wrapped in an [`Arc`]; use [`Registry::register_arc`]
    /// when you already hold one.
    pub fn register<T>(
        &self,
        name: impl Into<String>,
        dimension: Dimension,
        value: T,
        metadata: Metadata,
    ) where
        T: Any + Send + Sync,
    {
        self.register_arc(name, dimension, Arc::new(value), metadata);
    }

    /// Registers an already-shared value under `(dimension, name)`.
    pub fn register_arc(
        &self,
        name: impl Into<String>,
        dimension: Dimension,
        value: SharedComponent,
        metadata: Metadata,
    ) {
        let name = name.into();
        let entry = RegistryEntry {
            name: name.clone(),
            dimension: dimension.clone(),
            value,
            metadata,
        };

        let mut entries = self.entries.write();
        let replaced = entries
            .entry(dimension.clone())
            .or_default()
            .insert(name.clone(), entry);

        if replaced.is_some() {
            debug!(%dimension, name, "Replaced registry entry");
        } else {
            trace!(%dimension, name, "Registered entry");
        }
    }

    /// Returns the value registered under `(dimension, name)`, if any.
    #[must_use]
    pub fn get(&self, name: &str, dimension: &Dimension) -> Option<SharedComponent> {
        self.entries
            .read()
            .get(dimension)
            .and_then(|inner| inner.get(name))
            .map(|entry| Arc::clone(&entry.value))
    }

    /// Returns the value under `(dimension, name)` downcast to `T`.
    ///
    /// `None` when the entry is absent or holds a different type.
    #[must_use]
    pub fn get_as<T>(&self, name: &str, dimension: &Dimension) -> Option<Arc<T>>
    where
        T: Any + Send + Sync,
    {
        self.get(name, dimension)
            .and_then(|value| value.downcast::<T>().ok())
    }

    /// Returns a value registered under `name` in any dimension.
    ///
    /// When the name exists in several dimensions, the entry from the
    /// lexicographically smallest dimension wins, so repeated calls are
    /// deterministic. Prefer [`Registry::get`] when the dimension is known.
    #[must_use]
    pub fn get_any(&self, name: &str) -> Option<SharedComponent> {
        let entries = self.entries.read();
        entries
            .iter()
            .filter_map(|(dimension, inner)| inner.get(name).map(|entry| (dimension, entry)))
            .min_by(|(a, _), (b, _)| a.cmp(b))
            .map(|(_, entry)| Arc::clone(&entry.value))
    }

    /// Returns the full entry under `(dimension, name)`, including metadata.
    #[must_use]
    pub fn get_entry(&self, name: &str, dimension: &Dimension) -> Option<RegistryEntry> {
        self.entries
            .read()
            .get(dimension)
            .and_then(|inner| inner.get(name))
            .cloned()
    }

    /// Returns `true` when `(dimension, name)` is registered.
    #[must_use]
    pub fn contains(&self, name: &str, dimension: &Dimension) -> bool {
        self.entries
            .read()
            .get(dimension)
            .is_some_and(|inner| inner.contains_key(name))
    }

    /// Returns every entry in `dimension`, ordered by descending priority.
    ///
    /// Entries with equal priority are ordered by name, so the result is
    /// stable across calls.
    #[must_use]
    pub fn entries_in(&self, dimension: &Dimension) -> Vec<RegistryEntry> {
        let mut items: Vec<RegistryEntry> = self
            .entries
            .read()
            .get(dimension)
            .map(|inner| inner.values().cloned().collect())
            .unwrap_or_default();

        items.sort_by(|a, b| {
            b.metadata
                .priority
                .cmp(&a.metadata.priority)
                .then_with(|| a.name.cmp(&b.name))
        });
        items
    }

    /// Total number of entries across all dimensions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().values().map(FxHashMap::len).sum()
    }

    /// Returns `true` when nothing has been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry").field("len", &self.len()).finish()
    }
}
