//! # Hashing Helpers
//!
//! Two distinct hashing contracts live here, and confusing them is a bug:
//!
//! * [`quick_hash`] is seeded per process. It is stable within a run and
//!   intentionally unstable across runs; use it for in-memory cache keys,
//!   never for anything persisted.
//! * [`hash_name`] is a SHA-256 prefix. It is stable across runs and
//!   machines; use it for durable identifiers.
//!
//! Neither function is a security primitive.

pub mod algo;
pub mod format;
pub mod name;
pub mod quick;

pub use algo::HashAlgorithm;
pub use format::{
    compare_hash, format_hash, format_hash_with, hash_to_int, int_to_hash, is_valid_hash,
    truncate_hash, truncate_hash_with,
};
pub use name::{hash_name, hash_name_hex};
pub use quick::{cache_key, quick_hash};
