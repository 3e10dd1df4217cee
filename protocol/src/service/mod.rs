//! Collaborator interfaces.
//!
//! The core never talks HTTP itself. The chain, account, census and submit
//! endpoints are reached through the traits below, implemented by whatever
//! transport the embedding application uses. Request and response shapes
//! follow the Vochain API's JSON (camelCase).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::census::CensusProof;
use crate::error::TxResult;
use crate::identity::Address;
use crate::transaction::AccountMetadata;

pub mod account;

pub use crate::census::CensusProofResponse;
pub use account::AccountService;

/// Chain parameters reported by the chain endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainData {
    /// Identifier every signature is bound to.
    pub chain_id: String,
    pub height: u64,
    #[serde(default)]
    pub block_timestamp: u64,
    #[serde(default)]
    pub transaction_count: u64,
    #[serde(default)]
    pub max_census_size: u64,
}

/// Account snapshot reported by the account endpoint.
///
/// `nonce` is the account's next sequence number. The core uses it as given
/// and never increments or guesses it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountInfo {
    pub address: Address,
    pub balance: u64,
    pub nonce: u32,
    #[serde(default)]
    pub election_index: u32,
    #[serde(rename = "infoURL", default, skip_serializing_if = "Option::is_none")]
    pub info_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<AccountMetadata>,
}

/// Submit endpoint reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    pub tx_hash: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u64>,
}

/// Source of the current chain parameters.
#[async_trait]
pub trait ChainInfoProvider: Send + Sync {
    async fn fetch_chain_data(&self) -> TxResult<ChainData>;
}

/// Source of account snapshots.
#[async_trait]
pub trait AccountInfoProvider: Send + Sync {
    async fn fetch_account_info(&self, address: &Address) -> TxResult<AccountInfo>;
}

/// Source of census inclusion proofs.
#[async_trait]
pub trait CensusProofProvider: Send + Sync {
    /// Fetches the proof that `key` belongs to census `census_id`.
    async fn fetch_proof(&self, census_id: &str, key: &str) -> TxResult<CensusProofResponse>;
}

/// Network submission of signed envelopes.
#[async_trait]
pub trait TxSubmitter: Send + Sync {
    /// Submits a base64 envelope.
    async fn submit(&self, tx_b64: &str) -> TxResult<SubmitResponse>;

    /// Submits an account transaction together with its metadata document.
    async fn set_account_info(&self, tx_b64: &str, metadata_b64: &str)
        -> TxResult<SubmitResponse>;
}

/// Fetches a census proof and parses it into a [`CensusProof`].
pub async fn fetch_census_proof<C>(provider: &C, census_id: &str, key: &str) -> TxResult<CensusProof>
where
    C: CensusProofProvider + ?Sized,
{
    let response = provider.fetch_proof(census_id, key).await?;
    CensusProof::from_response(&response)
}
