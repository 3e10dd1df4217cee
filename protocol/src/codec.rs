//! Textual boundary encodings.
//!
//! Everything that crosses the API boundary as text goes through here: hex
//! (optionally `0x`-prefixed) for addresses, keys and hashes, and standard
//! padded base64 for opaque blobs. Encoders never call `hex::decode` or the
//! base64 engine directly, so validation cannot drift between them.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};

use crate::error::{TxError, TxResult};

/// Strips a single leading `0x` / `0X` marker, if present.
pub fn strip_0x(s: &str) -> &str {
    s.strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s)
}

/// Decodes a hex string of any length after stripping the optional prefix.
///
/// `field` names the input in the returned error.
pub fn decode_hex(field: &'static str, s: &str) -> TxResult<Vec<u8>> {
    hex::decode(strip_0x(s.trim())).map_err(|e| TxError::encoding(field, e.to_string()))
}

/// Decodes a hex string that must be exactly `N` bytes long.
pub fn decode_hex_fixed<const N: usize>(field: &'static str, s: &str) -> TxResult<[u8; N]> {
    let bytes = decode_hex(field, s)?;
    bytes.as_slice().try_into().map_err(|_| {
        TxError::encoding(field, format!("expected {} bytes, got {}", N, bytes.len()))
    })
}

/// Decodes a non-empty hex string.
pub fn decode_hex_non_empty(field: &'static str, s: &str) -> TxResult<Vec<u8>> {
    let bytes = decode_hex(field, s)?;
    if bytes.is_empty() {
        return Err(TxError::encoding(field, "empty value"));
    }
    Ok(bytes)
}

/// Decodes standard (padded) base64.
pub fn decode_base64(field: &'static str, s: &str) -> TxResult<Vec<u8>> {
    BASE64
        .decode(s.trim())
        .map_err(|e| TxError::encoding(field, e.to_string()))
}

/// Encodes bytes as standard padded base64.
pub fn encode_base64(bytes: &[u8]) -> String {
    BASE64.encode(bytes)
}

/// Encodes bytes as `0x`-prefixed lowercase hex.
pub fn encode_hex_prefixed(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}
