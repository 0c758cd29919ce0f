//! Process-seeded non-cryptographic hashing.

use std::hash::{BuildHasher, Hash, RandomState};
use std::sync::OnceLock;

/// Seeded once per process; every call hashes through the same state so
/// results are comparable within a run.
static SEED: OnceLock<RandomState> = OnceLock::new();

/// Hash `value` with the process-seeded state, masked to 32 bits.
///
/// Stable within a process, different across restarts. Suitable for
/// in-memory cache/lookup keys only; never persist the output.
pub fn quick_hash<T: Hash + ?Sized>(value: &T) -> u64 {
    let state = SEED.get_or_init(RandomState::new);
    state.hash_one(value) & u64::from(u32::MAX)
}

/// Derive a cache key for `payload` scoped by `namespace`.
///
/// Namespacing keeps identical payloads in different caches from sharing
/// a slot, e.g. `cache_key(text, "json")` for the JSON document cache.
pub fn cache_key(payload: &str, namespace: &str) -> u64 {
    quick_hash(&(namespace, payload))
}
