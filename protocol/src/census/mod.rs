//! # Census Proofs
//!
//! Structures and helpers for the Merkle inclusion proofs that gate
//! privacy-key registration.
//!
//! ```text
//! proof.rs   : CensusProof, scheme labels, census service response shape
//! siblings.rs: packed sibling path codec (arbo compact format)
//! builder.rs : build_privacy_key_proof -> PrivacyKeyProof
//! ```
//!
//! Proofs come from the census service. This module validates and packages
//! them; it never computes one, and anonymous-vote zk proving is delegated to
//! an external prover altogether.

pub mod builder;
pub mod proof;
pub mod siblings;

pub use builder::{build_privacy_key_proof, PrivacyKeyProof};
pub use proof::{CensusKeyType, CensusProof, CensusProofResponse, ProofAlgorithm};
pub use siblings::{pack_siblings, unpack_siblings};
