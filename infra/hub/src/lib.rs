//! # Component Hub
//!
//! A type-erased component registry with a prioritized configuration-source
//! chain and entry-point discovery on top.
//!
//! ## Overview
//!
//! Components, configuration sources, and command handlers register under a
//! `(Dimension, name)` address and are looked up through a shared [`Hub`].
//! Configuration resolution walks registered sources highest-priority first
//! and treats individual source failures as recoverable.
//!
//! ## Features
//!
//! * **Type-Safe Lookup**: values are stored as `Arc<dyn Any + Send + Sync>`
//!   and recovered with [`Registry::get_as`].
//! * **Explicit Wiring**: registries are plain values; the process-wide
//!   [`Hub::global`] exists only for bootstrap paths.
//! * **Resilient Config**: one failing source never breaks resolution.
//! * **Discovery**: plugin crates advertise constructors through a
//!   process-wide entry-point table.
//!
//! # Example
//!
//! ```rust
//! use plinth_domain::registry::{Dimension, Metadata};
//! use plinth_hub::Hub;
//!
//! let hub = Hub::new();
//! hub.registry()
//!     .register("greeting", Dimension::COMPONENT, String::from("hello"), Metadata::default());
//!
//! let greeting = hub
//!     .registry()
//!     .get_as::<String>("greeting", &Dimension::COMPONENT)
//!     .unwrap();
//! assert_eq!(greeting.as_str(), "hello");
//! ```

mod discovery;
mod error;
mod hub;
mod registry;
mod source;

pub use discovery::{
    ComponentConstructor, ComponentDescriptor, discover_components, install_entry_point,
};
pub use error::{HubError, HubErrorExt};
pub use hub::{ChainedSource, Hub};
pub use registry::{Registry, RegistryEntry, SharedComponent};
pub use source::{AsyncConfigSource, ConfigSource, FromConfig, SourceHandle};
