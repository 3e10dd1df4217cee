//! Chain-bound transaction signing.
//!
//! Signing is a separate step from building because the key may not live in
//! this process (hardware wallet, remote signer). The signed message binds
//! the payload to one chain:
//!
//! ```text
//! "Vochain signed transaction:\n" || chain_id || "\n" || hex(sha256(tx))
//! ```
//!
//! so a signature collected for one chain never verifies on another, and the
//! fixed prefix keeps transaction signatures apart from any other message the
//! same key might sign.
//!
//! [`TxSigner`] is the only asynchronous seam in the crate. Everything before
//! it (encoding, proof packaging) is synchronous and pure.

use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

use crate::config::SIGNED_TX_PREFIX;
use crate::crypto::hash::sha256;
use crate::crypto::keys::{TxKeypair, TxPublicKey, TxSignature};
use crate::error::{TxError, TxResult};

/// Builds the domain-separated message a signer signs for `tx` on `chain_id`.
///
/// # Errors
///
/// [`TxError::Precondition`] if the chain id is empty or blank, or the
/// payload is empty.
pub fn signing_message(tx: &[u8], chain_id: &str) -> TxResult<Vec<u8>> {
    if chain_id.trim().is_empty() {
        return Err(TxError::precondition("chain id must not be empty"));
    }
    if tx.is_empty() {
        return Err(TxError::precondition("transaction payload must not be empty"));
    }
    let digest = hex::encode(sha256(tx));
    let mut message =
        Vec::with_capacity(SIGNED_TX_PREFIX.len() + chain_id.len() + 1 + digest.len());
    message.extend_from_slice(SIGNED_TX_PREFIX.as_bytes());
    message.extend_from_slice(chain_id.as_bytes());
    message.push(b'\n');
    message.extend_from_slice(digest.as_bytes());
    Ok(message)
}

// ---------------------------------------------------------------------------
// Signer capability
// ---------------------------------------------------------------------------

/// Anything able to produce Ed25519 signatures for one account.
#[async_trait]
pub trait TxSigner: Send + Sync {
    /// The public key signatures will verify under.
    async fn public_key(&self) -> TxResult<TxPublicKey>;

    /// Signs an already domain-separated message.
    async fn sign_message(&self, message: &[u8]) -> TxResult<TxSignature>;
}

/// Signs with a keypair held in this process.
#[derive(Debug, Clone)]
pub struct LocalSigner {
    keypair: TxKeypair,
}

impl LocalSigner {
    pub fn new(keypair: TxKeypair) -> Self {
        Self { keypair }
    }

    /// Loads the secret key from hex (optional `0x`).
    pub fn from_hex(secret_hex: &str) -> TxResult<Self> {
        Ok(Self::new(TxKeypair::from_hex(secret_hex)?))
    }

    pub fn keypair(&self) -> &TxKeypair {
        &self.keypair
    }
}

#[async_trait]
impl TxSigner for LocalSigner {
    async fn public_key(&self) -> TxResult<TxPublicKey> {
        Ok(self.keypair.public_key())
    }

    async fn sign_message(&self, message: &[u8]) -> TxResult<TxSignature> {
        Ok(self.keypair.sign(message))
    }
}

/// A signing request handed to an out-of-process signer.
#[derive(Debug)]
pub struct SignRequest {
    /// The domain-separated message to sign.
    pub message: Vec<u8>,
    /// Where to send the signature, or the reason it was refused.
    pub respond_to: oneshot::Sender<Result<TxSignature, String>>,
}

/// Forwards signing requests over a channel to a separate signing task.
///
/// The task on the other end owns the key (a wallet bridge, an HSM client,
/// a test double). If it goes away, requests fail with
/// [`TxError::MissingCredential`]; if it answers with a refusal, they fail
/// with [`TxError::Signing`].
#[derive(Debug, Clone)]
pub struct ChannelSigner {
    public_key: TxPublicKey,
    requests: mpsc::Sender<SignRequest>,
}

impl ChannelSigner {
    /// Creates a signer and the receiving end the backend task listens on.
    pub fn channel(public_key: TxPublicKey, capacity: usize) -> (Self, mpsc::Receiver<SignRequest>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (
            Self {
                public_key,
                requests: tx,
            },
            rx,
        )
    }
}

#[async_trait]
impl TxSigner for ChannelSigner {
    async fn public_key(&self) -> TxResult<TxPublicKey> {
        Ok(self.public_key.clone())
    }

    async fn sign_message(&self, message: &[u8]) -> TxResult<TxSignature> {
        let (respond_to, response) = oneshot::channel();
        let request = SignRequest {
            message: message.to_vec(),
            respond_to,
        };
        self.requests
            .send(request)
            .await
            .map_err(|_| TxError::MissingCredential("signing backend is not running".into()))?;

        match response.await {
            Ok(Ok(signature)) => Ok(signature),
            Ok(Err(reason)) => Err(TxError::Signing(reason)),
            Err(_) => Err(TxError::MissingCredential(
                "signing backend dropped the request".into(),
            )),
        }
    }
}

/// Serves [`SignRequest`]s with a local keypair until every sender is gone.
pub async fn serve_with_keypair(keypair: TxKeypair, mut requests: mpsc::Receiver<SignRequest>) {
    while let Some(request) = requests.recv().await {
        let signature = keypair.sign(&request.message);
        if request.respond_to.send(Ok(signature)).is_err() {
            debug!("signing requester went away before the reply");
        }
    }
}

// ---------------------------------------------------------------------------
// Protocol
// ---------------------------------------------------------------------------

/// Signs encoded transaction bytes for `chain_id`.
///
/// The signature returned by the signer is checked against the signer's
/// public key before it is handed back, so a misbehaving backend surfaces as
/// [`TxError::Signing`] here instead of as a rejected transaction later.
pub async fn sign_transaction<S>(tx: &[u8], chain_id: &str, signer: &S) -> TxResult<TxSignature>
where
    S: TxSigner + ?Sized,
{
    let message = signing_message(tx, chain_id)?;

    let signature = signer.sign_message(&message).await.map_err(|err| {
        warn!(error = %err, "signer failed");
        err
    })?;
    let public_key = signer.public_key().await?;

    if !public_key.verify(&message, &signature) {
        warn!(signer = %public_key, "signer returned a signature that does not verify");
        return Err(TxError::Signing(
            "signature does not verify under the signer's public key".into(),
        ));
    }

    debug!(chain_id, bytes = tx.len(), "transaction signed");
    Ok(signature)
}

/// Checks a signature over `tx` for `chain_id`.
///
/// Returns `Ok(false)` for a well-formed signature made by another key, for
/// another payload, or for another chain.
pub fn verify_transaction_signature(
    tx: &[u8],
    chain_id: &str,
    public_key: &TxPublicKey,
    signature: &TxSignature,
) -> TxResult<bool> {
    let message = signing_message(tx, chain_id)?;
    Ok(public_key.verify(&message, signature))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
