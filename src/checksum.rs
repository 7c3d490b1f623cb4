//! Content fingerprinting.
//!
//! Two digests of the downloaded bytes: SHA-1 as the short identity
//! fingerprint (it doubles as the resource id) and SHA-256 as the stronger
//! verification fingerprint surfaced alongside it.

use serde::{Deserialize, Serialize};
use sha1::Sha1;
use sha2::{Digest, Sha256};

/// Hex-encoded content fingerprints of one byte sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checksums {
    /// Hex SHA-1 digest, 40 characters.
    pub sha1: String,
    /// Hex SHA-256 digest, 64 characters.
    pub sha256: String,
}

/// Compute both fingerprints of the given bytes.
///
/// Pure function: identical input always yields identical output.
#[must_use]
pub fn checksum(bytes: &[u8]) -> Checksums {
    Checksums {
        sha1: hex::encode(Sha1::digest(bytes)),
        sha256: hex::encode(Sha256::digest(bytes)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_vectors_empty_input() {
        let sums = checksum(b"");
        assert_eq!(sums.sha1, "da39a3ee5e6b4b0d3255bfef95601890afd80709");
        assert_eq!(
            sums.sha256,
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_known_vectors_hello_world() {
        let sums = checksum(b"hello world");
        assert_eq!(sums.sha1, "2aae6c35c94fcfb415dbe95f408b9ce91ee846ed");
        assert_eq!(
            sums.sha256,
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
    }

    #[test]
    fn test_deterministic() {
        let bytes = b"some payload";
        assert_eq!(checksum(bytes), checksum(bytes));
    }

    #[test]
    fn test_fixed_hex_lengths() {
        for input in [&b""[..], b"a", b"hello world", &[0u8; 4096][..]] {
            let sums = checksum(input);
            assert_eq!(sums.sha1.len(), 40);
            assert_eq!(sums.sha256.len(), 64);
        }
    }

    #[test]
    fn test_different_input_different_identity() {
        assert_ne!(checksum(b"one").sha1, checksum(b"two").sha1);
    }
}
