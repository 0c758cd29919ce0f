//! Kernel utilities shared across the workspace.
//! Keep this crate lightweight; it carries config validators, typed
//! environment readers, and layered config loading.
//!
//! ## Environment reading
//! ```rust
//! use plinth_kernel::env::EnvPrefix;
//!
//! let env = EnvPrefix::new("myapp");
//! assert_eq!(env.var_name("debug-mode"), "MYAPP_DEBUG_MODE");
//! ```
//!
//! ## Config loading
//! ```rust,ignore
//! use plinth_kernel::config::load_config;
//! let cfg: serde_json::Value = load_config::<serde_json::Value>(Some("plinth")).unwrap();
//! ```
pub mod config;
pub mod env;
pub mod validators;

pub use plinth_domain as domain;
