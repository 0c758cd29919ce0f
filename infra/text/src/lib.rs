//! # Text Helpers
//!
//! Small formatting utilities for human-facing output: truncation,
//! pluralization, indentation, word wrapping and ANSI stripping. All
//! functions operate on characters, never raw bytes, so multi-byte input
//! is safe everywhere.

pub mod ansi;
pub mod format;

pub use ansi::strip_ansi;
pub use format::{
    indent, indent_with, pluralize, pluralize_with, truncate, truncate_with, wrap_text,
};
