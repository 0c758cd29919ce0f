//! Digest algorithms the helpers know how to reason about.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString, VariantNames};

/// A supported digest algorithm.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    VariantNames,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum HashAlgorithm {
    Sha256,
    Sha512,
}

impl HashAlgorithm {
    /// Digest length in bytes (hex encoding doubles this).
    #[must_use]
    pub const fn digest_len(self) -> usize {
        match self {
            Self::Sha256 => 32,
            Self::Sha512 => 64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_lengths_match_the_algorithms() {
        assert_eq!(HashAlgorithm::Sha256.digest_len(), 32);
        assert_eq!(HashAlgorithm::Sha512.digest_len(), 64);
    }

    #[test]
    fn names_parse_case_insensitively() {
        assert_eq!("SHA256".parse::<HashAlgorithm>().expect("parse"), HashAlgorithm::Sha256);
        assert_eq!(HashAlgorithm::Sha512.to_string(), "sha512");
    }
}
