//! # Digital Signatures
//!
//! Verification of signatures that arrive as raw bytes off the wire. Typed
//! signing and verification live on [`TxKeypair`](super::keys::TxKeypair)
//! and [`TxPublicKey`](super::keys::TxPublicKey); the chain-bound message
//! is built in `transaction::signing`.

use ed25519_dalek::{Signature as DalekSignature, Verifier, VerifyingKey};

use crate::config::{SIGNATURE_LENGTH, VERIFYING_KEY_LENGTH};
use crate::error::{TxError, TxResult};

/// Verify a signature using raw byte components off the wire.
///
/// Malformed inputs are `Encoding` errors and a well-formed signature that
/// does not match is a `Signing` error, so callers can tell a corrupt
/// envelope from a signature made by someone else.
pub fn verify_raw(public_key_bytes: &[u8], message: &[u8], signature_bytes: &[u8]) -> TxResult<()> {
    let pk: [u8; VERIFYING_KEY_LENGTH] = public_key_bytes.try_into().map_err(|_| {
        TxError::encoding(
            "publicKey",
            format!("expected {VERIFYING_KEY_LENGTH} bytes, got {}", public_key_bytes.len()),
        )
    })?;
    let sig: [u8; SIGNATURE_LENGTH] = signature_bytes.try_into().map_err(|_| {
        TxError::encoding(
            "signature",
            format!("expected {SIGNATURE_LENGTH} bytes, got {}", signature_bytes.len()),
        )
    })?;

    let verifying_key = VerifyingKey::from_bytes(&pk)
        .map_err(|_| TxError::encoding("publicKey", "not a valid Ed25519 point"))?;

    verifying_key
        .verify(message, &DalekSignature::from_bytes(&sig))
        .map_err(|_| TxError::Signing("signature verification failed".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::keys::TxKeypair;

    #[test]
    fn verify_raw_accepts_valid_signature() {
        let kp = TxKeypair::generate();
        let sig = kp.sign(b"bytes off the wire");
        assert!(verify_raw(kp.public_key().as_bytes(), b"bytes off the wire", sig.as_bytes()).is_ok());
    }

    #[test]
    fn verify_raw_reports_bad_lengths_as_encoding() {
        let kp = TxKeypair::generate();
        let sig = kp.sign(b"msg");
        let err = verify_raw(&[1, 2, 3], b"msg", sig.as_bytes()).unwrap_err();
        assert!(matches!(err, TxError::Encoding { field: "publicKey", .. }));

        let err = verify_raw(kp.public_key().as_bytes(), b"msg", &[0u8; 10]).unwrap_err();
        assert!(matches!(err, TxError::Encoding { field: "signature", .. }));
    }

    #[test]
    fn verify_raw_wrong_message_is_signing_error() {
        let kp = TxKeypair::generate();
        let sig = kp.sign(b"original");
        let err = verify_raw(kp.public_key().as_bytes(), b"tampered", sig.as_bytes()).unwrap_err();
        assert!(matches!(err, TxError::Signing(_)));
    }
}
