//! Stable name digests.

use sha2::{Digest, Sha256};

/// Hash a name to a stable 64-bit identifier.
///
/// First 8 bytes of the SHA-256 digest, little-endian. Deterministic across
/// processes and machines, so the output is safe to persist and to compare
/// between runs.
#[must_use]
pub fn hash_name(name: &str) -> u64 {
    let mut hasher = Sha256::new();
    hasher.update(name.as_bytes());
    let digest = hasher.finalize();

    let mut prefix = [0_u8; 8];
    prefix.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(prefix)
}

/// Full SHA-256 digest of a name as lowercase hex.
#[must_use]
pub fn hash_name_hex(name: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(name.as_bytes());
    hex::encode(hasher.finalize())
}
