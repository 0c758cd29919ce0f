#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros for the infrastructure.
//! This crate provides the [`macro@plinth_error`] attribute macro used by every
//! workspace error enum.
//!
//! ## Usage
//! Add the crate to consumers inside the workspace:
//! ```toml
//! [dependencies]
//! plinth-derive = { path = "../infra/derive" }
//! ```
//!
//! The macro docstring examples are `ignore`d to avoid compiling in this crate,
//! but should be copied into consuming crates’ tests/examples as needed.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// A high-level attribute macro for defining domain-specific error enums.
///
/// This macro reduces boilerplate by transforming a standard enum into a fully-featured
/// error type integrated with the platform infrastructure.
///
/// # Features
///
/// * **Automatic Derives**: Injects `#[derive(Debug, thiserror::Error)]`.
/// * **Context Support**: Generates a companion `...Ext` trait that adds `.context()`
///   to any `Result` that can be converted into this error type.
/// * **Standard Conversions**: Implements `From<T>` for variants containing a `#[source]` field,
///   enabling the use of the `?` operator for upstream errors.
/// * **Internal Fallback**: Provides specialized `From<&str>` and `From<String>` implementations
///   if an `Internal` variant is present.
/// * **Stable Codes**: An optional `#[code("SOME_CODE")]` attribute per variant feeds the
///   generated `pub const fn code(&self) -> &'static str`; variants without one fall back to
///   their SCREAMING_SNAKE_CASE name.
///
/// # Requirements
///
/// 1. The macro must be applied to an **enum**.
/// 2. Variants that support context must include a `context: Option<Cow<'static, str>>` field.
/// 3. Variants wrapping external errors must include a `source: T` field or a field marked
///    with `#[source]`/`#[from]` (compatible with `thiserror`).
/// 4. Tuple or unit variants are rejected to keep error wiring explicit and reliable.
/// 5. `#[code(...)]` takes a single non-empty SCREAMING_SNAKE_CASE string literal.
///
/// # Generated Items
///
/// * `<ErrorName>Ext` trait with `.context(...)` for both `Result<T, ErrorName>` and
///   `Result<T, SourceError>` when a source field exists.
/// * `From<SourceError>` impls for variants with a source field and a context field.
/// * `From<&'static str>` and `From<String>` when an `Internal` variant is present.
/// * `pub const fn code(&self) -> &'static str`.
///
/// # Example
///
/// ```rust,ignore
/// use plinth_derive::plinth_error;
/// use std::borrow::Cow;
///
/// #[plinth_error]
/// pub enum SourceError {
///     #[code("CONFIG_SOURCE_ERROR")]
///     #[error("source read failed{}: {source}", format_context(.context))]
///     Read {
///         #[source]
///         source: std::io::Error,
///         context: Option<Cow<'static, str>>,
///     },
///
///     #[error("internal fault{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// // Usage:
/// fn read_layer() -> Result<String, SourceError> {
///     std::fs::read_to_string("plinth.json")
///         .context("reading file source") // wraps the io::Error with context
/// }
/// ```
#[proc_macro_attribute]
pub fn plinth_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand_derive(input).into()
}
