//! # Client Configuration & Constants
//!
//! Every fixed size and magic string of the transaction format lives here,
//! together with [`ClientConfig`], the small bag of endpoints and overrides a
//! client process needs. If a length shows up as a literal anywhere else,
//! it belongs in this file instead.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{TxError, TxResult};

// ---------------------------------------------------------------------------
// Identity & key sizes
// ---------------------------------------------------------------------------

/// Account addresses are 20 raw bytes on the wire.
pub const ADDRESS_LENGTH: usize = 20;

/// Ed25519 secret (seed) key length.
pub const SIGNING_KEY_LENGTH: usize = 32;

/// Ed25519 verifying key length.
pub const VERIFYING_KEY_LENGTH: usize = 32;

/// Ed25519 signature length.
pub const SIGNATURE_LENGTH: usize = 64;

/// Output size of every hash used by the core (SHA-256, BLAKE3, Poseidon leaves).
pub const HASH_OUTPUT_LENGTH: usize = 32;

// ---------------------------------------------------------------------------
// Payload field sizes
// ---------------------------------------------------------------------------

/// Election (process) identifiers are 32 bytes.
pub const ELECTION_ID_LENGTH: usize = 32;

/// Privacy keys (SIKs) are 32-byte field elements.
pub const PRIVACY_KEY_LENGTH: usize = 32;

/// Size of one census tree sibling hash.
pub const SIBLING_LENGTH: usize = HASH_OUTPUT_LENGTH;

// ---------------------------------------------------------------------------
// Signing
// ---------------------------------------------------------------------------

/// Prefix of the chain-bound message that is actually signed.
///
/// The full message is `PREFIX || chain_id || "\n" || hex(sha256(tx))`.
pub const SIGNED_TX_PREFIX: &str = "Vochain signed transaction:\n";

/// Signature algorithm used by local signers.
pub const SIGNING_ALGORITHM: &str = "Ed25519";

// ---------------------------------------------------------------------------
// Endpoints
// ---------------------------------------------------------------------------

/// Default Vochain API endpoint (development network).
pub const DEFAULT_API_URL: &str = "https://api-dev.vocdoni.net/v2";

/// Default census service endpoint.
pub const DEFAULT_CENSUS_URL: &str = "https://census3-dev.vocdoni.net/api";

/// Default request timeout for collaborator services, in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

// ---------------------------------------------------------------------------
// ClientConfig
// ---------------------------------------------------------------------------

/// Runtime configuration for a client process.
///
/// None of these values influence payload encoding. `chain_id` and
/// `timeout_ms` are applied by [`crate::service::AccountService`]; the two
/// URLs are for the transport that implements the `service` traits, since
/// no HTTP client ships with this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientConfig {
    /// Base URL of the account / chain API. Read by transports only.
    pub api_url: String,
    /// Base URL of the census service. Read by transports only.
    pub census_url: String,
    /// Fixed chain id. When set, no chain metadata query is needed.
    pub chain_id: Option<String>,
    /// Upper bound on each collaborator call made by the account service.
    pub timeout_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            census_url: DEFAULT_CENSUS_URL.to_string(),
            chain_id: None,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl ClientConfig {
    /// Parses a JSON configuration document. Missing keys take defaults.
    pub fn from_json(json: &str) -> TxResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| TxError::precondition(format!("invalid client config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// [`Self::timeout_ms`] as a duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Rejects configurations no client could work with.
    pub fn validate(&self) -> TxResult<()> {
        if self.api_url.trim().is_empty() {
            return Err(TxError::precondition("api_url must not be empty"));
        }
        if matches!(&self.chain_id, Some(id) if id.trim().is_empty()) {
            return Err(TxError::precondition("chain_id override must not be empty"));
        }
        if self.timeout_ms == 0 {
            return Err(TxError::precondition("timeout_ms must be positive"));
        }
        Ok(())
    }
}
