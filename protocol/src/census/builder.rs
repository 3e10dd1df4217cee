//! Packages a census proof into the privacy-key registration structure.
//!
//! The builder does no Merkle hashing and no zk work. It checks the proof's
//! scheme, decodes the election id and privacy key to fixed-width bytes, and
//! lays out the sibling path and leaf weight the way `RegisterSIKTx` expects.

use tracing::warn;

use super::proof::{CensusKeyType, CensusProof, ProofAlgorithm};
use super::siblings::unpack_siblings;
use crate::codec::decode_hex_fixed;
use crate::config::{ELECTION_ID_LENGTH, PRIVACY_KEY_LENGTH, SIBLING_LENGTH};
use crate::error::{TxError, TxResult};
use crate::transaction::wire;

/// Binary proof structure embedded in a RegisterPrivacyKey payload.
///
/// Always describes a Poseidon arbo proof keyed by address; any other scheme
/// is rejected before one of these is constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrivacyKeyProof {
    /// Election the key is registered for.
    pub election_id: [u8; ELECTION_ID_LENGTH],
    /// The privacy key (SIK) being registered.
    pub privacy_key: [u8; PRIVACY_KEY_LENGTH],
    /// Packed sibling path.
    pub siblings: Vec<u8>,
    /// Leaf value, i.e. the voting weight available to the voter.
    pub available_weight: Vec<u8>,
}

/// Builds the privacy-key registration proof.
///
/// # Errors
///
/// - [`TxError::SchemeMismatch`] if the proof is not a Poseidon Merkle proof
///   or its key type is not address-derived.
/// - [`TxError::Encoding`] if the election id or privacy key is not 32 bytes
///   of hex (optional `0x`).
pub fn build_privacy_key_proof(
    election_id_hex: &str,
    privacy_key_hex: &str,
    census_proof: &CensusProof,
) -> TxResult<PrivacyKeyProof> {
    if census_proof.algorithm != ProofAlgorithm::PoseidonMerkle {
        warn!(found = %census_proof.algorithm, "census proof algorithm rejected");
        return Err(TxError::SchemeMismatch {
            expected: ProofAlgorithm::PoseidonMerkle.to_string(),
            found: census_proof.algorithm.to_string(),
        });
    }
    if census_proof.key_type != CensusKeyType::Address {
        warn!(found = %census_proof.key_type, "census proof key type rejected");
        return Err(TxError::SchemeMismatch {
            expected: CensusKeyType::Address.to_string(),
            found: census_proof.key_type.to_string(),
        });
    }

    Ok(PrivacyKeyProof {
        election_id: decode_hex_fixed("electionId", election_id_hex)?,
        privacy_key: decode_hex_fixed("privacyKey", privacy_key_hex)?,
        siblings: census_proof.packed_siblings()?,
        available_weight: census_proof.value.clone(),
    })
}

impl PrivacyKeyProof {
    /// Unpacked sibling path.
    pub fn sibling_path(&self) -> TxResult<Vec<[u8; SIBLING_LENGTH]>> {
        unpack_siblings(&self.siblings)
    }

    pub(crate) fn to_wire(&self) -> wire::RegisterSikTx {
        wire::RegisterSikTx {
            election_id: self.election_id.to_vec(),
            census_proof: Some(wire::Proof {
                payload: Some(wire::proof::Payload::Arbo(wire::ProofArbo {
                    r#type: wire::ProofArboType::Poseidon as i32,
                    siblings: self.siblings.clone(),
                    available_weight: self.available_weight.clone(),
                    key_type: wire::ProofArboKeyType::Address as i32,
                })),
            }),
            sik: self.privacy_key.to_vec(),
        }
    }

    pub(crate) fn from_wire(tx: &wire::RegisterSikTx) -> TxResult<Self> {
        let arbo = match tx.census_proof.as_ref().and_then(|p| p.payload.as_ref()) {
            Some(wire::proof::Payload::Arbo(arbo)) => arbo,
            None => return Err(TxError::Decode("registerSIK without census proof".into())),
        };
        if arbo.r#type != wire::ProofArboType::Poseidon as i32 {
            return Err(TxError::SchemeMismatch {
                expected: ProofAlgorithm::PoseidonMerkle.to_string(),
                found: format!("arbo type {}", arbo.r#type),
            });
        }
        if arbo.key_type != wire::ProofArboKeyType::Address as i32 {
            return Err(TxError::SchemeMismatch {
                expected: CensusKeyType::Address.to_string(),
                found: format!("arbo key type {}", arbo.key_type),
            });
        }

        let election_id = tx.election_id.as_slice().try_into().map_err(|_| {
            TxError::encoding("electionId", format!("expected {ELECTION_ID_LENGTH} bytes"))
        })?;
        let privacy_key = tx.sik.as_slice().try_into().map_err(|_| {
            TxError::encoding("privacyKey", format!("expected {PRIVACY_KEY_LENGTH} bytes"))
        })?;

        Ok(Self {
            election_id,
            privacy_key,
            siblings: arbo.siblings.clone(),
            available_weight: arbo.available_weight.clone(),
        })
    }
}
