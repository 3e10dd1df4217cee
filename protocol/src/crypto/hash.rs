//! # Hashing Utilities
//!
//! Two hash functions, each with exactly one job:
//!
//! - **SHA-256** digests transaction payload bytes before they are bound to a
//!   chain id and signed, and identifies signed envelopes.
//! - **BLAKE3** derives 20-byte account addresses from Ed25519 public keys.
//!
//! Census tree hashing (Poseidon) is done by the census service, never here.

use sha2::{Digest, Sha256};

use crate::config::HASH_OUTPUT_LENGTH;

/// Compute the SHA-256 hash of the input data.
///
/// # Example
///
/// ```
/// use vochain_tx::crypto::sha256;
///
/// let hash = sha256(b"vochain");
/// assert_eq!(hash.len(), 32);
/// ```
pub fn sha256(data: &[u8]) -> [u8; HASH_OUTPUT_LENGTH] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Compute the BLAKE3 hash of the input data.
pub fn blake3_hash(data: &[u8]) -> [u8; HASH_OUTPUT_LENGTH] {
    *blake3::hash(data).as_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_known_vector() {
        // SHA-256 of the empty string.
        let hash = sha256(b"");
        let expected =
            hex::decode("e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855")
                .unwrap();
        assert_eq!(hash.as_slice(), expected.as_slice());
    }

    #[test]
    fn blake3_deterministic() {
        let a = blake3_hash(b"vochain");
        let b = blake3_hash(b"vochain");
        assert_eq!(a, b);
        assert_ne!(a, blake3_hash(b"Vochain"));
    }

    #[test]
    fn blake3_differs_from_sha256() {
        assert_ne!(blake3_hash(b"same input"), sha256(b"same input"));
    }
}
