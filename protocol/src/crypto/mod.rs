//! # Cryptographic Primitives
//!
//! Everything that touches key material or hashes flows through here:
//!
//! - **Ed25519** for transaction signatures (deterministic, 64 bytes).
//! - **SHA-256** for payload digests inside the chain-bound signing message.
//! - **BLAKE3** for deriving account addresses from public keys.
//!
//! These are thin, type-safe wrappers around audited crates. Chain binding
//! and envelope framing live in [`crate::transaction`].

pub mod hash;
pub mod keys;
pub mod signatures;

pub use hash::{blake3_hash, sha256};
pub use keys::{KeyError, TxKeypair, TxPublicKey, TxSignature};
pub use signatures::verify_raw;
