//! The process-wide parsed-document cache.

use moka::sync::Cache;
use std::sync::OnceLock;

/// Bounded size; eviction beyond this is moka's concern, not ours.
const CACHE_CAPACITY: u64 = 1024;

static CACHE: OnceLock<Cache<u64, serde_json::Value>> = OnceLock::new();

/// The lazily-initialized document cache shared by every caller in the
/// process.
pub fn serialization_cache() -> &'static Cache<u64, serde_json::Value> {
    CACHE.get_or_init(|| Cache::builder().max_capacity(CACHE_CAPACITY).build())
}
