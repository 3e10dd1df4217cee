//! # Key Management
//!
//! Ed25519 keypairs for signing Vochain transactions.
//!
//! An account is identified on-chain by a 20-byte [`Address`] derived from
//! its public key, so the keypair is the only secret a client holds. This
//! module handles creation, hex import/export, and signing of raw messages;
//! chain binding happens one layer up in `transaction::signing`.
//!
//! ## Security considerations
//!
//! - Private keys are zeroized on drop (ed25519-dalek does this).
//! - Key generation uses `OsRng`.
//! - Key bytes are never logged, and `Debug` prints only the public half.

use ed25519_dalek::{
    Signature as DalekSignature, Signer, SigningKey, Verifier, VerifyingKey,
};
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::codec::strip_0x;
use crate::config::{SIGNATURE_LENGTH, SIGNING_KEY_LENGTH, VERIFYING_KEY_LENGTH};
use crate::error::TxError;
use crate::identity::Address;

/// Errors that can occur during key operations.
///
/// These never say *why* a secret was rejected; leaking details about key
/// material through error messages is a classic footgun.
#[derive(Debug, Error)]
pub enum KeyError {
    #[error("invalid secret key bytes: wrong length or not valid hex")]
    InvalidSecretKey,

    #[error("invalid public key bytes: not a valid Ed25519 point")]
    InvalidPublicKey,

    #[error("invalid signature bytes: expected {SIGNATURE_LENGTH} bytes")]
    InvalidSignature,
}

impl From<KeyError> for TxError {
    fn from(err: KeyError) -> Self {
        match err {
            KeyError::InvalidSecretKey => TxError::Signing(err.to_string()),
            KeyError::InvalidPublicKey => TxError::encoding("publicKey", err.to_string()),
            KeyError::InvalidSignature => TxError::encoding("signature", err.to_string()),
        }
    }
}

/// An Ed25519 keypair able to sign transactions for one account.
///
/// `TxKeypair` does not implement `Serialize`. Exporting a secret must be a
/// deliberate call to [`TxKeypair::secret_key_hex`].
///
/// # Examples
///
/// ```
/// use vochain_tx::crypto::keys::TxKeypair;
///
/// let kp = TxKeypair::generate();
/// let sig = kp.sign(b"payload");
/// assert!(kp.public_key().verify(b"payload", &sig));
/// ```
pub struct TxKeypair {
    signing_key: SigningKey,
}

/// The public half of a [`TxKeypair`].
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TxPublicKey {
    bytes: [u8; VERIFYING_KEY_LENGTH],
}

/// A 64-byte Ed25519 signature.
///
/// Construction always checks the length, so a `TxSignature` in hand is
/// exactly [`SIGNATURE_LENGTH`] bytes.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxSignature {
    bytes: Vec<u8>,
}

impl TxKeypair {
    /// Generate a fresh keypair using the OS cryptographic RNG.
    pub fn generate() -> Self {
        Self {
            signing_key: SigningKey::generate(&mut OsRng),
        }
    }

    /// Constructs a keypair deterministically from a 32-byte seed.
    pub fn from_seed(seed: &[u8; SIGNING_KEY_LENGTH]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(seed),
        }
    }

    /// Reconstruct a keypair from a hex-encoded secret key (optional `0x`).
    pub fn from_hex(hex_str: &str) -> Result<Self, KeyError> {
        let bytes = hex::decode(strip_0x(hex_str.trim())).map_err(|_| KeyError::InvalidSecretKey)?;
        let seed: [u8; SIGNING_KEY_LENGTH] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| KeyError::InvalidSecretKey)?;
        Ok(Self::from_seed(&seed))
    }

    /// Returns the public key associated with this keypair.
    pub fn public_key(&self) -> TxPublicKey {
        TxPublicKey {
            bytes: self.signing_key.verifying_key().to_bytes(),
        }
    }

    /// The account address controlled by this keypair.
    pub fn address(&self) -> Address {
        Address::from_public_key(&self.public_key())
    }

    /// Sign a raw message. Deterministic for a given (key, message) pair.
    pub fn sign(&self, message: &[u8]) -> TxSignature {
        TxSignature {
            bytes: self.signing_key.sign(message).to_bytes().to_vec(),
        }
    }

    /// Exports the secret key as lowercase hex.
    ///
    /// **Handle with care.** Never log the result.
    pub fn secret_key_hex(&self) -> String {
        hex::encode(self.signing_key.to_bytes())
    }
}

impl Clone for TxKeypair {
    fn clone(&self) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(&self.signing_key.to_bytes()),
        }
    }
}

impl fmt::Debug for TxKeypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TxKeypair(pub={})", self.public_key().to_hex())
    }
}

// ---------------------------------------------------------------------------
// TxPublicKey
// ---------------------------------------------------------------------------

impl TxPublicKey {
    /// Try to create a public key from a byte slice.
    ///
    /// Validates the length and that the bytes decode to an Ed25519 point.
    pub fn try_from_slice(slice: &[u8]) -> Result<Self, KeyError> {
        let bytes: [u8; VERIFYING_KEY_LENGTH] =
            slice.try_into().map_err(|_| KeyError::InvalidPublicKey)?;
        VerifyingKey::from_bytes(&bytes).map_err(|_| KeyError::InvalidPublicKey)?;
        Ok(Self { bytes })
    }

    /// Parse a hex-encoded public key (optional `0x`).
    pub fn from_hex(s: &str) -> Result<Self, KeyError> {
        let bytes = hex::decode(strip_0x(s.trim())).map_err(|_| KeyError::InvalidPublicKey)?;
        Self::try_from_slice(&bytes)
    }

    /// Get the raw bytes.
    pub fn as_bytes(&self) -> &[u8; VERIFYING_KEY_LENGTH] {
        &self.bytes
    }

    /// Verify a signature over `message`. Any malformed input is just `false`.
    pub fn verify(&self, message: &[u8], signature: &TxSignature) -> bool {
        let Ok(verifying_key) = VerifyingKey::from_bytes(&self.bytes) else {
            return false;
        };
        let Ok(sig_bytes) = <[u8; SIGNATURE_LENGTH]>::try_from(signature.as_bytes()) else {
            return false;
        };
        verifying_key
            .verify(message, &DalekSignature::from_bytes(&sig_bytes))
            .is_ok()
    }

    /// Hex-encoded representation. 64 characters for 32 bytes.
    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes)
    }
}

impl fmt::Display for TxPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for TxPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TxPublicKey({})", &self.to_hex()[..16])
    }
}

// ---------------------------------------------------------------------------
// TxSignature
// ---------------------------------------------------------------------------

impl TxSignature {
    /// Create a signature from its raw 64-byte representation.
    pub fn from_bytes(bytes: [u8; SIGNATURE_LENGTH]) -> Self {
        Self {
            bytes: bytes.to_vec(),
        }
    }

    /// Create a signature from a slice, checking the length.
    pub fn try_from_slice(slice: &[u8]) -> Result<Self, KeyError> {
        if slice.len() != SIGNATURE_LENGTH {
            return Err(KeyError::InvalidSignature);
        }
        Ok(Self {
            bytes: slice.to_vec(),
        })
    }

    /// Returns the raw signature bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Lowercase hex, no prefix. 128 characters.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.bytes)
    }

    /// Parse a hex-encoded signature (optional `0x`).
    pub fn from_hex(s: &str) -> Result<Self, KeyError> {
        let bytes = hex::decode(strip_0x(s.trim())).map_err(|_| KeyError::InvalidSignature)?;
        Self::try_from_slice(&bytes)
    }
}

impl fmt::Display for TxSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for TxSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hex_str = self.to_hex();
        write!(f, "TxSignature({}...{})", &hex_str[..8], &hex_str[120..])
    }
}
