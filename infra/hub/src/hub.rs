//! The hub: a registry plus the configuration-resolution walks built on it.

use crate::error::HubError;
use crate::registry::{Registry, SharedComponent};
use crate::source::{AsyncConfigSource, ConfigSource, FromConfig, SourceHandle};
use plinth_domain::registry::{Dimension, Metadata};
use plinth_domain::value::{ConfigMap, Value, merge};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::OnceLock;
use tracing::{debug, trace, warn};

static GLOBAL: OnceLock<Hub> = OnceLock::new();

/// A configuration source as it sits in the priority chain.
#[derive(Debug, Clone)]
pub struct ChainedSource {
    /// Registered name of the source.
    pub name: String,
    /// Priority it was registered with; higher is consulted first.
    pub priority: i64,
    /// The source itself.
    pub handle: SourceHandle,
}

/// Registry plus configuration chain, the crate's main entry point.
///
/// A `Hub` is cheap to clone and safe to share; clones see the same
/// registry. Most applications build one [`Hub`] during start-up and pass it
/// down explicitly. [`Hub::global`] exists for call sites that cannot thread
/// a handle through, such as logger construction.
///
/// # Examples
///
/// ```rust
/// use plinth_domain::value::{ConfigMap, Value};
/// use plinth_hub::{ConfigSource, Hub, HubError};
///
/// struct Fixed;
///
/// impl ConfigSource for Fixed {
///     fn name(&self) -> &str {
///         "fixed"
///     }
///
///     fn get_value(&self, key: &str) -> Result<Option<Value>, HubError> {
///         Ok((key == "log_level").then(|| Value::from("debug")))
///     }
///
///     fn load(&self) -> Result<ConfigMap, HubError> {
///         Ok(ConfigMap::from([("log_level".into(), Value::from("debug"))]))
///     }
/// }
///
/// let hub = Hub::new();
/// hub.add_config_source(Fixed, 10);
///
/// assert_eq!(hub.resolve_config_value("log_level"), Some(Value::from("debug")));
/// assert_eq!(hub.resolve_config_value("missing"), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Hub {
    registry: Registry,
}

impl Hub {
    /// Creates a hub with a fresh, empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a hub over an existing registry.
    #[must_use]
    pub fn with_registry(registry: Registry) -> Self {
        Self { registry }
    }

    /// The lazily created process-wide hub.
    ///
    /// Intended for bootstrap paths that cannot receive a hub by argument;
    /// everything else should hold its own handle.
    #[must_use]
    pub fn global() -> &'static Self {
        GLOBAL.get_or_init(Self::new)
    }

    /// The registry backing this hub.
    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Registers a synchronous configuration source at `priority`.
    ///
    /// The source lands in [`Dimension::CONFIG_SOURCE`] under its own name;
    /// registering a second source with the same name replaces the first.
    pub fn add_config_source(&self, source: impl ConfigSource, priority: i64) {
        self.add_source_handle(SourceHandle::Sync(Arc::new(source)), priority);
    }

    /// Registers an asynchronous configuration source at `priority`.
    pub fn add_async_config_source(&self, source: impl AsyncConfigSource, priority: i64) {
        self.add_source_handle(SourceHandle::Async(Arc::new(source)), priority);
    }

    fn add_source_handle(&self, handle: SourceHandle, priority: i64) {
        let name = handle.name().to_owned();
        self.registry.register(
            name,
            Dimension::CONFIG_SOURCE,
            handle,
            Metadata::with_priority(priority),
        );
    }

    /// Returns the configuration chain in consultation order.
    ///
    /// Sources are ordered by descending priority; ties are broken by name
    /// so the order is stable. Registry entries in the config-source
    /// dimension that do not hold a [`SourceHandle`] are skipped with a
    /// warning.
    #[must_use]
    pub fn config_chain(&self) -> Vec<ChainedSource> {
        self.registry
            .entries_in(&Dimension::CONFIG_SOURCE)
            .into_iter()
            .filter_map(|entry| {
                let Some(handle) = entry.value.downcast_ref::<SourceHandle>() else {
                    warn!(name = entry.name, "Config source entry is not a SourceHandle; skipping");
                    return None;
                };
                Some(ChainedSource {
                    handle: handle.clone(),
                    name: entry.name,
                    priority: entry.metadata.priority,
                })
            })
            .collect()
    }

    /// Resolves a single key through the chain, highest priority first.
    ///
    /// The first source that returns a value wins. A failing source is
    /// logged at debug level and skipped, so one broken backend cannot take
    /// down resolution. Async sources do not participate here; use
    /// [`Hub::load_all_configs`] to include them.
    ///
    /// `None` means no source knows the key. That is a normal outcome, not
    /// an error.
    #[must_use]
    pub fn resolve_config_value(&self, key: &str) -> Option<Value> {
        for source in self.config_chain() {
            let SourceHandle::Sync(sync) = &source.handle else {
                trace!(source = source.name, key, "Skipping async source in sync resolution");
                continue;
            };
            match sync.get_value(key) {
                Ok(Some(value)) => {
                    trace!(source = source.name, key, "Resolved config value");
                    return Some(value);
                }
                Ok(None) => {}
                Err(error) => {
                    debug!(source = source.name, key, %error, "Config source failed; trying next");
                }
            }
        }
        None
    }

    /// Loads and merges every source in the chain, including async ones.
    ///
    /// Sources load sequentially in priority order (highest first) and merge
    /// last-write-wins, so when two sources define the same key the
    /// **lowest**-priority value ends up in the result. Callers that need
    /// priority semantics for a single key should use
    /// [`Hub::resolve_config_value`] instead. A source that fails to load is
    /// logged at warn level and skipped.
    pub async fn load_all_configs(&self) -> ConfigMap {
        let mut merged = ConfigMap::new();
        for source in self.config_chain() {
            let loaded = match &source.handle {
                SourceHandle::Sync(sync) => sync.load(),
                SourceHandle::Async(async_source) => async_source.load().await,
            };
            match loaded {
                Ok(map) => {
                    trace!(source = source.name, keys = map.len(), "Loaded config source");
                    merge(&mut merged, map);
                }
                Err(error) => {
                    warn!(source = source.name, %error, "Config source failed to load; skipping");
                }
            }
        }
        merged
    }

    /// Loads the synchronous sources, merges them, and builds `C`.
    ///
    /// Async sources are skipped; this is the start-up path for settings
    /// structs that must exist before a runtime does.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::InvalidConfig`] when `C` rejects the merged map.
    pub fn load_config_into<C: FromConfig>(&self) -> Result<C, HubError> {
        let mut merged = ConfigMap::new();
        for source in self.config_chain() {
            let SourceHandle::Sync(sync) = &source.handle else {
                trace!(source = source.name, "Skipping async source in sync load");
                continue;
            };
            match sync.load() {
                Ok(map) => merge(&mut merged, map),
                Err(error) => {
                    warn!(source = source.name, %error, "Config source failed to load; skipping");
                }
            }
        }
        C::from_config_map(&merged)
    }

    /// Resolves the declared dependencies of a registered entry.
    ///
    /// For each name in the entry's `metadata.dependencies`, the same
    /// dimension is tried first, then all dimensions. Names that resolve
    /// nowhere are omitted from the result; callers decide whether a partial
    /// set is acceptable.
    #[must_use]
    pub fn resolve_component_dependencies(
        &self,
        name: &str,
        dimension: &Dimension,
    ) -> BTreeMap<String, SharedComponent> {
        let Some(entry) = self.registry.get_entry(name, dimension) else {
            return BTreeMap::new();
        };

        let mut resolved = BTreeMap::new();
        for dependency in &entry.metadata.dependencies {
            let value = self
                .registry
                .get(dependency, dimension)
                .or_else(|| self.registry.get_any(dependency));
            match value {
                Some(value) => {
                    resolved.insert(dependency.clone(), value);
                }
                None => trace!(component = name, dependency, "Dependency not registered; omitted"),
            }
        }
        resolved
    }
}
