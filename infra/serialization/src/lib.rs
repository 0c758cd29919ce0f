//! # Serialization Glue
//!
//! JSON encode/decode helpers that fail with the platform's
//! [`ValidationError`](plinth_errors::ValidationError) instead of raw serde
//! errors, plus a process-wide parse cache keyed by the seeded quick hash.
//!
//! The cache stores parsed documents, so repeatedly loading the same payload
//! (config files re-read at startup, identical webhook bodies) skips the
//! parser. Keys come from [`plinth_hash::cache_key`], which is seeded per
//! process, so cache contents are never meaningful across runs.

pub mod cache;
pub mod json;

pub use cache::serialization_cache;
pub use json::{DumpOptions, json_dumps, json_dumps_with, json_loads, json_loads_uncached};
