//! Configuration source traits and the type-erased handle the hub stores.

use crate::error::HubError;
use async_trait::async_trait;
use plinth_domain::value::{ConfigMap, Value};
use std::fmt;
use std::sync::Arc;

/// A synchronous provider of configuration values.
///
/// Implementations are registered under [`Dimension::CONFIG_SOURCE`] and
/// consulted in priority order by the hub.
///
/// [`Dimension::CONFIG_SOURCE`]: plinth_domain::registry::Dimension::CONFIG_SOURCE
pub trait ConfigSource: Send + Sync + 'static {
    /// Short, stable name used in logs and for tie-breaking in the chain.
    fn name(&self) -> &str;

    /// Resolves a single key.
    ///
    /// `Ok(None)` means this source does not know the key. That is the
    /// normal miss case; the hub moves on to the next source.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::SourceFailed`] when the backing store cannot be
    /// read at all.
    fn get_value(&self, key: &str) -> Result<Option<Value>, HubError>;

    /// Loads every key/value pair this source provides.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::SourceFailed`] when the backing store cannot be
    /// read at all.
    fn load(&self) -> Result<ConfigMap, HubError>;
}

/// An asynchronous provider of configuration values.
///
/// Same surface as [`ConfigSource`], awaited. Async sources participate in
/// [`Hub::load_all_configs`] only; synchronous walks such as
/// [`Hub::resolve_config_value`] skip them.
///
/// [`Hub::load_all_configs`]: crate::Hub::load_all_configs
/// [`Hub::resolve_config_value`]: crate::Hub::resolve_config_value
#[async_trait]
pub trait AsyncConfigSource: Send + Sync + 'static {
    /// Short, stable name used in logs and for tie-breaking in the chain.
    fn name(&self) -> &str;

    /// Resolves a single key.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::SourceFailed`] when the backing store cannot be
    /// read at all.
    async fn get_value(&self, key: &str) -> Result<Option<Value>, HubError>;

    /// Loads every key/value pair this source provides.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::SourceFailed`] when the backing store cannot be
    /// read at all.
    async fn load(&self) -> Result<ConfigMap, HubError>;
}

/// The value stored in the registry for a configuration source.
#[derive(Clone)]
pub enum SourceHandle {
    /// Consulted by both synchronous and asynchronous walks.
    Sync(Arc<dyn ConfigSource>),
    /// Consulted only by asynchronous bulk loads.
    Async(Arc<dyn AsyncConfigSource>),
}

impl SourceHandle {
    /// The wrapped source's name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Sync(source) => source.name(),
            Self::Async(source) => source.name(),
        }
    }

    /// Returns `true` for handles that require an async context to load.
    #[must_use]
    pub const fn is_async(&self) -> bool {
        matches!(self, Self::Async(_))
    }
}

impl fmt::Debug for SourceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sync(source) => f.debug_tuple("Sync").field(&source.name()).finish(),
            Self::Async(source) => f.debug_tuple("Async").field(&source.name()).finish(),
        }
    }
}

/// Builds a typed configuration struct from a loaded [`ConfigMap`].
///
/// This is the seam between the untyped source chain and strongly typed
/// settings structs; see [`Hub::load_config_into`].
///
/// [`Hub::load_config_into`]: crate::Hub::load_config_into
pub trait FromConfig: Sized {
    /// # Errors
    ///
    /// Returns [`HubError::InvalidConfig`] when a required key is missing or
    /// a value has the wrong shape.
    fn from_config_map(map: &ConfigMap) -> Result<Self, HubError>;
}
