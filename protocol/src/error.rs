//! Error types for transaction construction and signing.
//!
//! Every fallible operation in the crate returns a [`TxError`]. The variants
//! map one-to-one onto the kinds of problem a caller can fix: bad input data,
//! a missing or broken signing credential, or a census proof of the wrong
//! scheme. No operation ever hands back a partially built payload or envelope.

use thiserror::Error;

/// Convenience alias used across the crate.
pub type TxResult<T> = Result<T, TxError>;

/// Errors raised while building, proving, signing, or decoding transactions.
#[derive(Debug, Error)]
pub enum TxError {
    /// Malformed hex or base64, or a fixed-length field of the wrong size.
    #[error("encoding error in {field}: {reason}")]
    Encoding {
        /// The input field that failed to decode.
        field: &'static str,
        /// What was wrong with it.
        reason: String,
    },

    /// The census proof uses an algorithm or key type this flow does not accept.
    #[error("census proof scheme mismatch: expected {expected}, got {found}")]
    SchemeMismatch {
        /// The scheme the flow requires.
        expected: String,
        /// The scheme carried by the proof.
        found: String,
    },

    /// No signing credential is available (signer gone, key not configured).
    #[error("no signing credential available: {0}")]
    MissingCredential(String),

    /// The signer or the underlying primitive rejected the request.
    #[error("signing failed: {0}")]
    Signing(String),

    /// A required input is absent or out of range.
    #[error("precondition failed: {0}")]
    Precondition(String),

    /// Wire bytes could not be decoded back into a transaction.
    #[error("decode error: {0}")]
    Decode(String),

    /// A collaborator (chain, account, census or submit endpoint) failed.
    #[error("backend error: {0}")]
    Backend(String),
}

/// Coarse classification of a [`TxError`].
///
/// Lets callers decide between fixing input, re-authenticating, or refetching
/// a proof without matching on every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxErrorKind {
    /// Input data problem: correct the input and retry.
    Data,
    /// Credential problem: reauthenticate or reconnect the signer.
    Credential,
    /// Proof scheme problem: fetch a proof of the expected type.
    Scheme,
    /// Collaborator problem: retry later or switch endpoint.
    Backend,
}

impl TxError {
    /// Shorthand for an [`TxError::Encoding`] error.
    pub fn encoding(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Encoding {
            field,
            reason: reason.into(),
        }
    }

    /// Shorthand for a [`TxError::Precondition`] error.
    pub fn precondition(reason: impl Into<String>) -> Self {
        Self::Precondition(reason.into())
    }

    /// Returns the coarse kind of this error.
    pub fn kind(&self) -> TxErrorKind {
        match self {
            Self::Encoding { .. } | Self::Precondition(_) | Self::Decode(_) => TxErrorKind::Data,
            Self::MissingCredential(_) | Self::Signing(_) => TxErrorKind::Credential,
            Self::SchemeMismatch { .. } => TxErrorKind::Scheme,
            Self::Backend(_) => TxErrorKind::Backend,
        }
    }
}

impl From<prost::DecodeError> for TxError {
    fn from(err: prost::DecodeError) -> Self {
        Self::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_separate_data_from_credentials() {
        assert_eq!(TxError::encoding("from", "odd length").kind(), TxErrorKind::Data);
        assert_eq!(TxError::precondition("empty chain id").kind(), TxErrorKind::Data);
        assert_eq!(
            TxError::MissingCredential("signer dropped".into()).kind(),
            TxErrorKind::Credential
        );
        assert_eq!(TxError::Signing("rejected".into()).kind(), TxErrorKind::Credential);
        assert_eq!(
            TxError::SchemeMismatch {
                expected: "poseidon-merkle".into(),
                found: "blake2b-merkle".into()
            }
            .kind(),
            TxErrorKind::Scheme
        );
        assert_eq!(TxError::Backend("timeout".into()).kind(), TxErrorKind::Backend);
    }

    #[test]
    fn display_names_the_field() {
        let err = TxError::encoding("electionId", "invalid character 'z'");
        assert_eq!(
            err.to_string(),
            "encoding error in electionId: invalid character 'z'"
        );
    }
}
