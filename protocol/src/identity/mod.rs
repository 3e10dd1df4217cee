//! # Identity Module
//!
//! Account identity on Vochain is a 20-byte [`Address`] derived from the
//! account's Ed25519 public key. Keys themselves live in
//! [`crate::crypto::keys`]; this module only deals with the identifier that
//! ends up inside payloads.

pub mod address;

pub use address::Address;
