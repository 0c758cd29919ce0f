//! Naming and metadata types for the component registry.
//!
//! The registry itself is type-erased and lives in the hub crate; this module
//! only defines how entries are addressed and described.

use crate::value::ConfigMap;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// A registry namespace, e.g. all components or all configuration sources.
///
/// Entries are addressed by `(Dimension, name)`, so equal names in different
/// dimensions never collide.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dimension(Cow<'static, str>);

impl Dimension {
    /// Pluggable processing components.
    pub const COMPONENT: Self = Self(Cow::Borrowed("component"));
    /// Configuration providers consulted by the hub.
    pub const CONFIG_SOURCE: Self = Self(Cow::Borrowed("config_source"));
    /// CLI command handlers.
    pub const COMMAND: Self = Self(Cow::Borrowed("command"));

    /// A dimension with a caller-chosen name, for extensions.
    pub fn custom(name: impl Into<String>) -> Self {
        Self(Cow::Owned(name.into()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Descriptive metadata attached to a registry entry.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Metadata {
    /// Ordering weight; higher priority entries are consulted first.
    pub priority: i64,
    /// Names of entries (same dimension) this entry depends on.
    pub dependencies: Vec<String>,
    /// Entry-point name the entry was discovered from, if any.
    pub entry_point: Option<String>,
    /// Module path of the discovered constructor, if any.
    pub module: Option<String>,
    /// Whether the entry arrived via discovery rather than direct registration.
    pub discovered: bool,
    /// Free-form extras carried alongside the entry.
    pub extra: ConfigMap,
}

impl Metadata {
    #[must_use]
    pub fn with_priority(priority: i64) -> Self {
        Self { priority, ..Self::default() }
    }

    /// Extends [`Metadata::with_priority`] with a dependency list.
    #[must_use]
    pub fn with_dependencies<I, S>(priority: i64, dependencies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            priority,
            dependencies: dependencies.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }
}
