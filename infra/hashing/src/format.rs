//! Presentation and conversion helpers for hex digests.

use crate::algo::HashAlgorithm;
use plinth_errors::ValidationError;

/// Number of hex characters covered by the 64-bit prefix convention.
const INT_PREFIX_LEN: usize = 16;

/// Case-insensitive hex digest comparison.
///
/// Not constant-time; do not use it to compare secrets.
#[must_use]
pub fn compare_hash(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}

/// [`format_hash_with`] using groups of 8 separated by `:`.
#[must_use]
pub fn format_hash(hash: &str) -> String {
    format_hash_with(hash, 8, ":")
}

/// Insert `separator` every `group` characters for readability.
///
/// A `group` of zero returns the input unchanged.
#[must_use]
pub fn format_hash_with(hash: &str, group: usize, separator: &str) -> String {
    if group == 0 || hash.len() <= group {
        return hash.to_owned();
    }

    let chars: Vec<char> = hash.chars().collect();
    let mut out = String::with_capacity(hash.len() + (chars.len() / group) * separator.len());
    for (index, ch) in chars.iter().enumerate() {
        if index > 0 && index % group == 0 {
            out.push_str(separator);
        }
        out.push(*ch);
    }
    out
}

/// [`truncate_hash_with`] keeping the conventional 12 characters.
#[must_use]
pub fn truncate_hash(hash: &str) -> String {
    truncate_hash_with(hash, 12)
}

/// Keep the first `len` characters of a digest.
#[must_use]
pub fn truncate_hash_with(hash: &str, len: usize) -> String {
    hash.chars().take(len).collect()
}

/// Parse the leading 64-bit prefix of a hex digest.
///
/// Reads up to the first 16 hex characters, the same prefix width
/// [`int_to_hash`] emits.
///
/// # Errors
///
/// [`ValidationError`] (rule `hex`) when the prefix is empty or not
/// hexadecimal.
pub fn hash_to_int(hash: &str) -> Result<u64, ValidationError> {
    let prefix: String = hash.chars().take(INT_PREFIX_LEN).collect();
    u64::from_str_radix(&prefix, 16).map_err(|_| {
        ValidationError::new(format!("invalid hash {hash:?}: leading characters are not hexadecimal"))
            .with_value(hash)
            .with_rule("hex")
    })
}

/// Render a 64-bit value as the 16-character hex prefix convention.
#[must_use]
pub fn int_to_hash(value: u64) -> String {
    format!("{value:016x}")
}

/// Whether `hash` looks like a hex digest.
///
/// With an algorithm given, the length must match its digest exactly.
#[must_use]
pub fn is_valid_hash(hash: &str, algorithm: Option<HashAlgorithm>) -> bool {
    if hash.is_empty() || !hash.chars().all(|c| c.is_ascii_hexdigit()) {
        return false;
    }
    algorithm.is_none_or(|algo| hash.len() == algo.digest_len() * 2)
}
