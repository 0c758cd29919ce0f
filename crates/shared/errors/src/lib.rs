//! # Error Taxonomy
//!
//! Structured, inspectable errors for application code built on the platform.
//! Every error carries a stable machine-readable code and a namespaced
//! [`ErrorContext`] map, so callers can branch on *what* failed without
//! parsing messages.
//!
//! These types are pure data carriers: no retry or recovery logic lives here.

pub mod context;
pub mod integration;
pub mod resource;
pub mod validation;

pub use context::ErrorContext;
pub use integration::IntegrationError;
pub use resource::ResourceError;
pub use validation::ValidationError;

/// Common surface of every taxonomy error.
pub trait FoundationError: std::error::Error {
    /// Stable machine-readable code, e.g. `NETWORK_ERROR`.
    fn code(&self) -> &'static str;

    /// Structured context attached at construction time.
    fn context(&self) -> &ErrorContext;
}
