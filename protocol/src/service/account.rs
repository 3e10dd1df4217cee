//! Account transaction orchestration.
//!
//! [`AccountService`] glues the builders to the collaborators: it picks up
//! the chain id for signing and the sequence number from an account
//! snapshot, so callers only supply what they actually decide.

use std::future::Future;
use std::time::Duration;

use tracing::{debug, info, warn};

use super::{AccountInfo, ChainInfoProvider, TxSubmitter};
use crate::config::ClientConfig;
use crate::error::{TxError, TxResult};
use crate::identity::Address;
use crate::transaction::{
    collect_faucet, create_account, set_account_info, sign_envelope, AccountMetadata,
    EncodedFaucetPackage, EncodedTx, SignedEnvelope, TxSigner,
};

/// Builds, signs and submits account transactions.
pub struct AccountService<P> {
    chain: P,
    chain_id_override: Option<String>,
    timeout: Option<Duration>,
}

impl<P: ChainInfoProvider> AccountService<P> {
    /// A service with no chain id override and unbounded collaborator calls.
    pub fn new(chain: P) -> Self {
        Self {
            chain,
            chain_id_override: None,
            timeout: None,
        }
    }

    /// Uses `config.chain_id`, when set, instead of asking the chain endpoint,
    /// and bounds every collaborator call by `config.timeout_ms`.
    pub fn with_config(chain: P, config: &ClientConfig) -> Self {
        Self {
            chain,
            chain_id_override: config.chain_id.clone(),
            timeout: Some(config.timeout()),
        }
    }

    async fn bounded<T, F>(&self, call: &'static str, fut: F) -> TxResult<T>
    where
        F: Future<Output = TxResult<T>>,
    {
        let Some(limit) = self.timeout else {
            return fut.await;
        };
        match tokio::time::timeout(limit, fut).await {
            Ok(result) => result,
            Err(_) => {
                warn!(call, timeout_ms = limit.as_millis() as u64, "collaborator call timed out");
                Err(TxError::Backend(format!(
                    "{call} timed out after {}ms",
                    limit.as_millis()
                )))
            }
        }
    }

    /// The chain id signatures are bound to.
    pub async fn chain_id(&self) -> TxResult<String> {
        if let Some(id) = &self.chain_id_override {
            return Ok(id.clone());
        }
        let data = self
            .bounded("fetch_chain_data", self.chain.fetch_chain_data())
            .await?;
        if data.chain_id.trim().is_empty() {
            return Err(TxError::Backend("chain endpoint reported an empty chain id".into()));
        }
        Ok(data.chain_id)
    }

    /// Fetches the chain id, then signs and frames `encoded`.
    pub async fn sign_transaction<S>(&self, encoded: &EncodedTx, signer: &S) -> TxResult<SignedEnvelope>
    where
        S: TxSigner + ?Sized,
    {
        let chain_id = self.chain_id().await?;
        sign_envelope(&encoded.tx, &chain_id, signer).await
    }

    /// Encodes a CreateAccount transaction for `address`.
    pub fn create_account_transaction(
        &self,
        address: &Address,
        metadata: &AccountMetadata,
        info_uri: &str,
        faucet_package: Option<&EncodedFaucetPackage>,
        privacy_key_hex: Option<&str>,
    ) -> TxResult<EncodedTx> {
        create_account(
            &address.to_hex(),
            metadata,
            info_uri,
            faucet_package,
            privacy_key_hex,
        )
    }

    /// Encodes a SetAccountInfo transaction at the snapshot's sequence number.
    pub fn update_account_transaction(
        &self,
        account: &AccountInfo,
        metadata: &AccountMetadata,
        info_uri: &str,
    ) -> TxResult<EncodedTx> {
        debug!(address = %account.address, nonce = account.nonce, "updating account info");
        set_account_info(&account.address.to_hex(), account.nonce, metadata, info_uri)
    }

    /// Encodes a CollectFaucet transaction at the snapshot's sequence number.
    pub fn collect_faucet_transaction(
        &self,
        account: &AccountInfo,
        faucet_package: &EncodedFaucetPackage,
    ) -> TxResult<EncodedTx> {
        collect_faucet(account.nonce, faucet_package)
    }

    /// Submits a signed account transaction with its metadata document and
    /// returns the transaction hash.
    pub async fn submit_account_info<T>(
        &self,
        submitter: &T,
        envelope: &SignedEnvelope,
        encoded: &EncodedTx,
    ) -> TxResult<String>
    where
        T: TxSubmitter + ?Sized,
    {
        let metadata = encoded.metadata.as_deref().ok_or_else(|| {
            TxError::precondition(format!("{} carries no metadata document", encoded.kind))
        })?;
        let response = self
            .bounded(
                "set_account_info",
                submitter.set_account_info(&envelope.to_base64(), metadata),
            )
            .await?;
        info!(tx_hash = %response.tx_hash, kind = %encoded.kind, "account transaction submitted");
        Ok(response.tx_hash)
    }
}
