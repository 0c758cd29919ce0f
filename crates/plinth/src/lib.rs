//! Facade crate for the Plinth foundation library.
//! Re-exports domain/kernel primitives under stable module paths and reports
//! which optional subsystems were compiled in.
//! Keep this crate thin: it should compose other crates, not implement logic.
//!
//! ## Usage
//! - Add `plinth` with the desired feature flags (`hash`/`serialization`/`text`,
//!   all on by default).
//! - Query [`capabilities()`] to see which optional subsystems this build carries.

pub use plinth_domain as domain;
pub use plinth_errors as errors;
pub use plinth_hub as hub;
pub use plinth_kernel as kernel;
pub use plinth_logger as logger;

// Kernel submodules surfaced at the facade root.
pub use plinth_kernel::{config, env, validators};

#[cfg(feature = "hash")]
pub use plinth_hash as hash;
#[cfg(feature = "serialization")]
pub use plinth_serialization as serialization;
#[cfg(feature = "text")]
pub use plinth_text as text;

pub use capabilities::{Capability, capabilities};

/// Capability registry for runtime introspection.
pub mod capabilities {
    /// Compiled-in availability of one optional subsystem.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Capability {
        pub name: &'static str,
        pub enabled: bool,
        pub detail: &'static str,
    }

    /// Build-time enabled optional subsystems (by Cargo feature).
    pub const ENABLED: &[&str] = &[
        #[cfg(feature = "hash")]
        "hash",
        #[cfg(feature = "serialization")]
        "serialization",
        #[cfg(feature = "text")]
        "text",
    ];

    #[must_use]
    pub fn is_enabled(name: &str) -> bool {
        ENABLED.contains(&name)
    }

    /// Every known optional subsystem with its availability in this build.
    ///
    /// Disabled subsystems are still listed, so callers can report what is
    /// missing rather than silently not knowing about it.
    #[must_use]
    pub fn capabilities() -> Vec<Capability> {
        vec![
            Capability {
                name: "hash",
                enabled: cfg!(feature = "hash"),
                detail: "Deterministic and process-seeded hashing helpers",
            },
            Capability {
                name: "serialization",
                enabled: cfg!(feature = "serialization"),
                detail: "JSON encoding and cached decoding",
            },
            Capability {
                name: "text",
                enabled: cfg!(feature = "text"),
                detail: "Text truncation, wrapping, and ANSI stripping",
            },
        ]
    }
}
