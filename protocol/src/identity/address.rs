//! # Account Addresses
//!
//! An [`Address`] is the 20-byte account identifier embedded in payloads.
//! It is derived from an Ed25519 public key:
//!
//! ```text
//! public_key (32 bytes)
//!     -> BLAKE3(public_key) -> 32 bytes
//!     -> first 20 bytes     -> address
//! ```
//!
//! Textual addresses arrive as hex, with or without a `0x` marker. They are
//! normalized to raw bytes on parse and never travel in a payload as text.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::codec::{decode_hex_fixed, encode_hex_prefixed};
use crate::config::ADDRESS_LENGTH;
use crate::crypto::hash::blake3_hash;
use crate::crypto::keys::TxPublicKey;
use crate::error::{TxError, TxResult};

/// A 20-byte account address.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address([u8; ADDRESS_LENGTH]);

impl Address {
    /// Wraps raw address bytes.
    pub const fn from_bytes(bytes: [u8; ADDRESS_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Derives the address controlled by `public_key`.
    pub fn from_public_key(public_key: &TxPublicKey) -> Self {
        let digest = blake3_hash(public_key.as_bytes());
        let mut bytes = [0u8; ADDRESS_LENGTH];
        bytes.copy_from_slice(&digest[..ADDRESS_LENGTH]);
        Self(bytes)
    }

    /// Parses a hex address, accepting an optional `0x` marker.
    ///
    /// `field` names the payload field in the error, e.g. `"from"`.
    pub fn parse(field: &'static str, s: &str) -> TxResult<Self> {
        decode_hex_fixed::<ADDRESS_LENGTH>(field, s).map(Self)
    }

    /// Builds an address from a slice read off the wire.
    pub fn try_from_slice(field: &'static str, slice: &[u8]) -> TxResult<Self> {
        let bytes: [u8; ADDRESS_LENGTH] = slice.try_into().map_err(|_| {
            TxError::encoding(
                field,
                format!("expected {ADDRESS_LENGTH} bytes, got {}", slice.len()),
            )
        })?;
        Ok(Self(bytes))
    }

    /// Raw bytes.
    pub fn as_bytes(&self) -> &[u8; ADDRESS_LENGTH] {
        &self.0
    }

    /// Owned raw bytes, ready for a protobuf `bytes` field.
    pub fn to_vec(&self) -> Vec<u8> {
        self.0.to_vec()
    }

    /// `0x`-prefixed lowercase hex.
    pub fn to_hex(&self) -> String {
        encode_hex_prefixed(&self.0)
    }
}

impl FromStr for Address {
    type Err = TxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse("address", s)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.to_hex())
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
