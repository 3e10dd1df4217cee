//! Signed transaction envelopes.
//!
//! The envelope is the unit submitted to the network: the encoded payload
//! bytes plus the chain-bound signature over them, framed as
//! `SignedTx { tx = 1, signature = 2 }` and carried as base64 text.

use prost::Message;
use tracing::debug;

use super::payload::TransactionPayload;
use super::signing::{sign_transaction, verify_transaction_signature, TxSigner};
use super::wire;
use crate::codec::{decode_base64, encode_base64};
use crate::config::HASH_OUTPUT_LENGTH;
use crate::crypto::hash::sha256;
use crate::crypto::keys::{TxPublicKey, TxSignature};
use crate::error::{TxError, TxResult};

/// Frames payload bytes and a signature into envelope bytes.
///
/// Pure and deterministic: the same inputs always give the same bytes.
pub fn build_envelope(tx: &[u8], signature: &TxSignature) -> Vec<u8> {
    wire::SignedTx {
        tx: tx.to_vec(),
        signature: signature.as_bytes().to_vec(),
    }
    .encode_to_vec()
}

/// A payload together with its signature.
///
/// Only [`sign_envelope`] and the decoders construct one, so an envelope in
/// hand always carries a well-formed signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedEnvelope {
    tx: Vec<u8>,
    signature: TxSignature,
}

impl SignedEnvelope {
    /// The encoded payload bytes that were signed.
    pub fn tx(&self) -> &[u8] {
        &self.tx
    }

    pub fn signature(&self) -> &TxSignature {
        &self.signature
    }

    /// Envelope wire bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        build_envelope(&self.tx, &self.signature)
    }

    /// Transport form for submission.
    pub fn to_base64(&self) -> String {
        encode_base64(&self.to_bytes())
    }

    /// Parses envelope wire bytes.
    pub fn decode(bytes: &[u8]) -> TxResult<Self> {
        let signed = wire::SignedTx::decode(bytes)?;
        if signed.tx.is_empty() {
            return Err(TxError::Decode("envelope carries no transaction".into()));
        }
        Ok(Self {
            tx: signed.tx,
            signature: TxSignature::try_from_slice(&signed.signature)?,
        })
    }

    /// Parses the base64 transport form.
    pub fn from_base64(text: &str) -> TxResult<Self> {
        Self::decode(&decode_base64("envelope", text)?)
    }

    /// Decodes the embedded payload.
    pub fn payload(&self) -> TxResult<TransactionPayload> {
        TransactionPayload::decode(&self.tx)
    }

    /// Checks the signature for `chain_id` under `public_key`.
    pub fn verify(&self, chain_id: &str, public_key: &TxPublicKey) -> TxResult<bool> {
        verify_transaction_signature(&self.tx, chain_id, public_key, &self.signature)
    }

    /// SHA-256 of the envelope bytes.
    pub fn hash(&self) -> [u8; HASH_OUTPUT_LENGTH] {
        sha256(&self.to_bytes())
    }
}

/// Signs encoded payload bytes for `chain_id` and wraps them in an envelope.
///
/// On any signing failure the error is returned and no envelope exists.
pub async fn sign_envelope<S>(tx: &[u8], chain_id: &str, signer: &S) -> TxResult<SignedEnvelope>
where
    S: TxSigner + ?Sized,
{
    let signature = sign_transaction(tx, chain_id, signer).await?;
    let envelope = SignedEnvelope {
        tx: tx.to_vec(),
        signature,
    };
    debug!(hash = %hex::encode(envelope.hash()), "envelope built");
    Ok(envelope)
}
