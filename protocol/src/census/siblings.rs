//! Compact sibling encoding used by arbo census trees.
//!
//! Most siblings on a sparse Merkle path are empty (all zeros), so the
//! census service ships them packed:
//!
//! ```text
//! [0..2]   u16 LE  total length of the packed blob
//! [2..4]   u16 LE  bitmap length in bytes (L)
//! [4..4+L] bitmap; bit i (byte i/8, bit i%8) set when sibling i is non-empty
//! [4+L..]  non-empty siblings, SIBLING_LENGTH bytes each, in path order
//! ```

use crate::config::SIBLING_LENGTH;
use crate::error::{TxError, TxResult};

const HEADER_LEN: usize = 4;
const EMPTY_SIBLING: [u8; SIBLING_LENGTH] = [0u8; SIBLING_LENGTH];

/// Packs an ordered sibling path into the compact form.
pub fn pack_siblings(siblings: &[[u8; SIBLING_LENGTH]]) -> TxResult<Vec<u8>> {
    let bitmap_len = siblings.len().div_ceil(8);
    let mut bitmap = vec![0u8; bitmap_len];
    let mut body = Vec::with_capacity(siblings.len() * SIBLING_LENGTH);

    for (i, sibling) in siblings.iter().enumerate() {
        if *sibling != EMPTY_SIBLING {
            bitmap[i / 8] |= 1 << (i % 8);
            body.extend_from_slice(sibling);
        }
    }

    let full_len = HEADER_LEN + bitmap_len + body.len();
    let full_len_u16 = u16::try_from(full_len)
        .map_err(|_| TxError::encoding("siblings", format!("packed length {full_len} exceeds u16")))?;
    // bitmap_len <= full_len, so this cannot fail once full_len fits.
    let bitmap_len_u16 = u16::try_from(bitmap_len)
        .map_err(|_| TxError::encoding("siblings", "bitmap length exceeds u16"))?;

    let mut out = Vec::with_capacity(full_len);
    out.extend_from_slice(&full_len_u16.to_le_bytes());
    out.extend_from_slice(&bitmap_len_u16.to_le_bytes());
    out.extend_from_slice(&bitmap);
    out.extend_from_slice(&body);
    Ok(out)
}

/// Unpacks the compact form into a sibling path.
///
/// The result always has `8 * L` entries: the bitmap does not record the
/// exact path length, so trailing empty siblings pad out the last byte.
/// An empty blob is the path of a single-leaf census and unpacks to no
/// siblings.
pub fn unpack_siblings(packed: &[u8]) -> TxResult<Vec<[u8; SIBLING_LENGTH]>> {
    if packed.is_empty() {
        return Ok(Vec::new());
    }
    if packed.len() < HEADER_LEN {
        return Err(TxError::encoding(
            "siblings",
            format!("packed blob is {} bytes, shorter than its header", packed.len()),
        ));
    }

    let full_len = usize::from(u16::from_le_bytes([packed[0], packed[1]]));
    let bitmap_len = usize::from(u16::from_le_bytes([packed[2], packed[3]]));
    if full_len != packed.len() {
        return Err(TxError::encoding(
            "siblings",
            format!("header declares {full_len} bytes, blob has {}", packed.len()),
        ));
    }
    if HEADER_LEN + bitmap_len > full_len {
        return Err(TxError::encoding("siblings", "bitmap overruns packed blob"));
    }

    let bitmap = &packed[HEADER_LEN..HEADER_LEN + bitmap_len];
    let mut body = packed[HEADER_LEN + bitmap_len..].chunks_exact(SIBLING_LENGTH);
    if !body.remainder().is_empty() {
        return Err(TxError::encoding(
            "siblings",
            format!("sibling data is not a multiple of {SIBLING_LENGTH} bytes"),
        ));
    }

    let mut siblings = Vec::with_capacity(bitmap_len * 8);
    for i in 0..bitmap_len * 8 {
        if bitmap[i / 8] & (1 << (i % 8)) == 0 {
            siblings.push(EMPTY_SIBLING);
            continue;
        }
        let chunk = body
            .next()
            .ok_or_else(|| TxError::encoding("siblings", "bitmap marks more siblings than present"))?;
        let mut sibling = [0u8; SIBLING_LENGTH];
        sibling.copy_from_slice(chunk);
        siblings.push(sibling);
    }

    if body.next().is_some() {
        return Err(TxError::encoding("siblings", "unreferenced sibling data after bitmap"));
    }
    Ok(siblings)
}
