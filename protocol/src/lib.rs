// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # Vochain Transaction Core
//!
//! Turns a client's intent (create an account, update its metadata, collect
//! a faucet grant, register a privacy key, send tokens) into a canonical,
//! signed transaction envelope ready for submission to Vochain.
//!
//! ## Architecture
//!
//! - **codec**: hex and base64 boundary decoding shared by every encoder.
//! - **config**: wire sizes, the signing prefix, and [`config::ClientConfig`].
//! - **crypto**: Ed25519 keys, raw signatures, SHA-256 and BLAKE3.
//! - **identity**: 20-byte account addresses.
//! - **census**: census inclusion proofs and the privacy-key proof builder.
//! - **transaction**: payload union, builders, signing protocol, envelopes.
//! - **service**: collaborator traits (chain, accounts, census, submission)
//!   and the account orchestration built on them.
//! - **error**: the crate-wide [`error::TxError`].
//!
//! ## Flow
//!
//! ```text
//! builder ──encode──▶ EncodedTx ──sign_envelope(chain_id, signer)──▶ SignedEnvelope ──▶ base64
//! ```
//!
//! Everything up to the signer is synchronous and pure. The signer is the
//! single `async` seam, since the key may live in a wallet or remote service.

pub mod census;
pub mod codec;
pub mod config;
pub mod crypto;
pub mod error;
pub mod identity;
pub mod service;
pub mod transaction;

pub use error::{TxError, TxErrorKind, TxResult};
