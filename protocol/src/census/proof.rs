//! Census inclusion proofs as handed over by the census service.
//!
//! A [`CensusProof`] is read-only input: it is fetched right before a
//! privacy-key registration and never computed or persisted here. The proof
//! records which tree algorithm produced it and how the leaf key was derived,
//! so the proof builder can refuse proofs of the wrong scheme.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::siblings::{pack_siblings, unpack_siblings};
use crate::codec::{decode_hex, decode_hex_non_empty};
use crate::config::SIBLING_LENGTH;
use crate::error::TxResult;

/// Merkle tree scheme a census proof belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ProofAlgorithm {
    /// Arbo sparse Merkle tree hashed with Poseidon.
    PoseidonMerkle,
    /// Arbo sparse Merkle tree hashed with BLAKE2b.
    Blake2bMerkle,
    /// Anything else the service reported, kept verbatim.
    Unknown(String),
}

impl ProofAlgorithm {
    /// Parses the census service's algorithm label. Never fails: unknown
    /// labels are preserved so a scheme mismatch can name them.
    ///
    /// A bare `arbo` is not a scheme: arbo trees hash with either BLAKE2b or
    /// Poseidon, so that label stays [`ProofAlgorithm::Unknown`].
    pub fn parse(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "poseidon-merkle" | "poseidon" => Self::PoseidonMerkle,
            "blake2b-merkle" | "blake2b" => Self::Blake2bMerkle,
            _ => Self::Unknown(label.trim().to_string()),
        }
    }
}

impl fmt::Display for ProofAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PoseidonMerkle => write!(f, "poseidon-merkle"),
            Self::Blake2bMerkle => write!(f, "blake2b-merkle"),
            Self::Unknown(label) => write!(f, "{label}"),
        }
    }
}

/// How the census leaf key was derived.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CensusKeyType {
    /// The leaf key is the voter's account address.
    Address,
    /// Any other identity scheme (public key, token holder id, ...).
    Other(String),
}

impl CensusKeyType {
    /// Parses the census service's key type label.
    pub fn parse(label: &str) -> Self {
        if label.trim().eq_ignore_ascii_case("address") {
            Self::Address
        } else {
            Self::Other(label.trim().to_string())
        }
    }
}

impl fmt::Display for CensusKeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Address => write!(f, "address"),
            Self::Other(label) => write!(f, "{label}"),
        }
    }
}

/// Census service response for a `(census, key)` proof query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CensusProofResponse {
    /// Packed sibling path, hex.
    pub proof: String,
    /// Leaf value (the voting weight as tree bytes), hex.
    pub value: String,
    /// Voting weight as a decimal string, informational only.
    #[serde(default)]
    pub weight: Option<String>,
    /// Tree algorithm label, e.g. `poseidon-merkle`.
    #[serde(rename = "type")]
    pub proof_type: String,
    /// Leaf key derivation label, e.g. `address`.
    pub key_type: String,
}

/// A Merkle inclusion proof over a census tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CensusProof {
    /// Sibling hashes from leaf to root.
    pub siblings: Vec<[u8; SIBLING_LENGTH]>,
    /// Leaf value bytes encoding the voting weight.
    pub value: Vec<u8>,
    /// Tree algorithm.
    pub algorithm: ProofAlgorithm,
    /// Leaf key derivation.
    pub key_type: CensusKeyType,
}

impl CensusProof {
    /// Parses the packed-hex form the census service returns.
    pub fn from_packed_hex(
        packed_siblings_hex: &str,
        value_hex: &str,
        algorithm: ProofAlgorithm,
        key_type: CensusKeyType,
    ) -> TxResult<Self> {
        let packed = decode_hex("proof", packed_siblings_hex)?;
        Ok(Self {
            siblings: unpack_siblings(&packed)?,
            value: decode_hex_non_empty("value", value_hex)?,
            algorithm,
            key_type,
        })
    }

    /// Parses a census service response.
    pub fn from_response(response: &CensusProofResponse) -> TxResult<Self> {
        Self::from_packed_hex(
            &response.proof,
            &response.value,
            ProofAlgorithm::parse(&response.proof_type),
            CensusKeyType::parse(&response.key_type),
        )
    }

    /// The sibling path in packed wire form.
    pub fn packed_siblings(&self) -> TxResult<Vec<u8>> {
        pack_siblings(&self.siblings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn algorithm_labels() {
        assert_eq!(ProofAlgorithm::parse("poseidon-merkle"), ProofAlgorithm::PoseidonMerkle);
        assert_eq!(ProofAlgorithm::parse("POSEIDON"), ProofAlgorithm::PoseidonMerkle);
        assert_eq!(ProofAlgorithm::parse("blake2b"), ProofAlgorithm::Blake2bMerkle);
        assert_eq!(
            ProofAlgorithm::parse("sha256-merkle"),
            ProofAlgorithm::Unknown("sha256-merkle".into())
        );
        assert_eq!(ProofAlgorithm::PoseidonMerkle.to_string(), "poseidon-merkle");
    }

    #[test]
    fn bare_arbo_label_names_no_hash() {
        assert_eq!(ProofAlgorithm::parse("arbo"), ProofAlgorithm::Unknown("arbo".into()));
        assert_eq!(ProofAlgorithm::parse(" ARBO "), ProofAlgorithm::Unknown("ARBO".into()));
    }

    #[test]
    fn arbo_labelled_response_fails_proof_builder() {
        let packed = pack_siblings(&[[5u8; SIBLING_LENGTH]]).unwrap();
        let response = CensusProofResponse {
            proof: hex::encode(packed),
            value: "01".into(),
            weight: None,
            proof_type: "arbo".into(),
            key_type: "address".into(),
        };
        let proof = CensusProof::from_response(&response).unwrap();
        let err = crate::census::build_privacy_key_proof(&"11".repeat(32), &"22".repeat(32), &proof)
            .unwrap_err();
        assert!(matches!(err, crate::error::TxError::SchemeMismatch { .. }));
    }

    #[test]
    fn key_type_labels() {
        assert_eq!(CensusKeyType::parse("address"), CensusKeyType::Address);
        assert_eq!(CensusKeyType::parse(" Address "), CensusKeyType::Address);
        assert_eq!(CensusKeyType::parse("other"), CensusKeyType::Other("other".into()));
    }

    #[test]
    fn parses_service_response() {
        let packed = pack_siblings(&[[5u8; SIBLING_LENGTH], [0u8; SIBLING_LENGTH]]).unwrap();
        let json = format!(
            r#"{{"proof":"0x{}","value":"01","weight":"1","type":"poseidon-merkle","keyType":"address"}}"#,
            hex::encode(&packed)
        );
        let response: CensusProofResponse = serde_json::from_str(&json).unwrap();
        let proof = CensusProof::from_response(&response).unwrap();

        assert_eq!(proof.algorithm, ProofAlgorithm::PoseidonMerkle);
        assert_eq!(proof.key_type, CensusKeyType::Address);
        assert_eq!(proof.value, vec![1]);
        assert_eq!(proof.siblings[0], [5u8; SIBLING_LENGTH]);
        assert_eq!(proof.packed_siblings().unwrap(), packed);
    }

    #[test]
    fn single_leaf_census_has_empty_proof() {
        let json = r#"{"proof":"","value":"01","type":"poseidon-merkle","keyType":"address"}"#;
        let response: CensusProofResponse = serde_json::from_str(json).unwrap();
        let proof = CensusProof::from_response(&response).unwrap();
        assert!(proof.siblings.is_empty());

        let built =
            crate::census::build_privacy_key_proof(&"11".repeat(32), &"22".repeat(32), &proof)
                .unwrap();
        assert!(built.sibling_path().unwrap().is_empty());
    }

    #[test]
    fn malformed_proof_hex_rejected() {
        let err = CensusProof::from_packed_hex(
            "0xnothex",
            "01",
            ProofAlgorithm::PoseidonMerkle,
            CensusKeyType::Address,
        )
        .unwrap_err();
        assert!(err.to_string().contains("proof"));
    }

    #[test]
    fn empty_value_rejected() {
        let packed = hex::encode(pack_siblings(&[]).unwrap());
        assert!(CensusProof::from_packed_hex(
            &packed,
            "",
            ProofAlgorithm::PoseidonMerkle,
            CensusKeyType::Address
        )
        .is_err());
    }
}
