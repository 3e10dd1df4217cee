//! # Transaction Module
//!
//! Construction, encoding, signing and framing of Vochain transactions.
//!
//! ## Architecture
//!
//! ```text
//! wire.rs     : protobuf schema (prost messages) for Tx and SignedTx
//! payload.rs  : TransactionPayload union, canonical encoder, reference decoder
//! metadata.rs : AccountMetadata document and its base64 transport form
//! builder.rs  : one fluent builder per variant, plus free-function shortcuts
//! signing.rs  : chain-bound signing protocol and the TxSigner capability
//! envelope.rs : SignedEnvelope framing and sign_envelope
//! ```
//!
//! ## Lifecycle
//!
//! 1. **Build**: a builder validates boundary inputs and returns an [`EncodedTx`].
//! 2. **Sign**: [`sign_envelope`] binds the bytes to a chain id and signs them.
//! 3. **Submit**: [`SignedEnvelope::to_base64`] is what goes over the wire,
//!    next to the metadata document for account transactions.

pub mod builder;
pub mod envelope;
pub mod metadata;
pub mod payload;
pub mod signing;
pub mod wire;

pub use builder::{
    collect_faucet, create_account, register_privacy_key, send_tokens, set_account_info,
    AmountInput, CollectFaucetBuilder, CreateAccountBuilder, EncodedTx, RegisterPrivacyKeyBuilder,
    SendTokensBuilder, SetAccountInfoBuilder,
};
pub use envelope::{build_envelope, sign_envelope, SignedEnvelope};
pub use metadata::{AccountMedia, AccountMetadata};
pub use payload::{EncodedFaucetPackage, FaucetPackage, TransactionPayload, TxKind};
pub use signing::{
    serve_with_keypair, sign_transaction, signing_message, verify_transaction_signature,
    ChannelSigner, LocalSigner, SignRequest, TxSigner,
};
