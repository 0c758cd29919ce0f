//! # Hub Errors
//!
//! This module defines the [`HubError`] enum used throughout the hub crate for
//! reporting registry, configuration-source, and discovery failures.

use std::borrow::Cow;

/// A specialized [`HubError`] enum for registry and configuration failures.
#[plinth_derive::plinth_error]
pub enum HubError {
    /// A configuration source failed while loading or resolving a value.
    #[code("CONFIG_SOURCE_ERROR")]
    #[error("Config source error{}: {message}", format_context(.context))]
    SourceFailed { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Loaded configuration was present but could not be interpreted.
    #[code("CONFIG_INVALID")]
    #[error("Invalid configuration{}: {message}", format_context(.context))]
    InvalidConfig { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// A requested component or entry is not registered.
    #[code("HUB_NOT_FOUND")]
    #[error("Not found{}: {message}", format_context(.context))]
    NotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Internal fallback for unexpected issues or logic errors.
    #[code("HUB_INTERNAL")]
    #[error("Internal hub error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
