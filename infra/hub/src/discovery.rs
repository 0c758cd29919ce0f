//! Entry-point table for component discovery.
//!
//! Plugin crates call [`install_entry_point`] (typically from their `init`
//! path) to make constructors visible; applications later call
//! [`discover_components`] to materialize a whole group into a registry.

use crate::registry::{Registry, SharedComponent};
use parking_lot::RwLock;
use plinth_domain::registry::{Dimension, Metadata};
use std::borrow::Cow;
use tracing::trace;

static ENTRY_POINTS: RwLock<Vec<ComponentDescriptor>> = RwLock::new(Vec::new());

/// Constructor signature carried by a [`ComponentDescriptor`].
pub type ComponentConstructor = fn() -> Result<SharedComponent, String>;

/// A component advertised for discovery.
#[derive(Debug, Clone)]
pub struct ComponentDescriptor {
    /// Discovery group, e.g. `"plinth.components"`.
    pub group: Cow<'static, str>,
    /// Name the component registers under.
    pub name: Cow<'static, str>,
    /// Module that installed the descriptor; capture with [`module_path!`].
    pub module: Cow<'static, str>,
    /// Builds one instance of the component.
    pub constructor: ComponentConstructor,
}

/// Adds a descriptor to the process-wide entry-point table.
///
/// Installation never fails and never replaces; installing the same name
/// twice leaves both descriptors in the table, and the later one wins at
/// discovery time through registry replacement.
pub fn install_entry_point(descriptor: ComponentDescriptor) {
    trace!(group = %descriptor.group, name = %descriptor.name, "Installed entry point");
    ENTRY_POINTS.write().push(descriptor);
}

/// Constructs every installed component in `group` and registers it.
///
/// Successful constructions land in `dimension` with discovery provenance
/// recorded in their metadata. A constructor that fails is reported on
/// stderr and skipped; discovery is best-effort and returns the number of
/// components actually registered. Discovery can run before any tracing
/// subscriber exists, which is why failures bypass the logger.
#[allow(clippy::print_stderr)]
pub fn discover_components(group: &str, dimension: &Dimension, registry: &Registry) -> usize {
    let descriptors: Vec<ComponentDescriptor> = ENTRY_POINTS
        .read()
        .iter()
        .filter(|descriptor| descriptor.group == group)
        .cloned()
        .collect();

    let mut registered = 0;
    for descriptor in descriptors {
        match (descriptor.constructor)() {
            Ok(value) => {
                let metadata = Metadata {
                    entry_point: Some(descriptor.name.clone().into_owned()),
                    module: Some(descriptor.module.into_owned()),
                    discovered: true,
                    ..Metadata::default()
                };
                registry.register_arc(descriptor.name.into_owned(), dimension.clone(), value, metadata);
                registered += 1;
            }
            Err(reason) => {
                eprintln!(
                    "plinth: failed to construct component '{}' from {}: {reason}",
                    descriptor.name, descriptor.module
                );
            }
        }
    }
    registered
}
