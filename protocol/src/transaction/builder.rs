//! Payload construction via the builder pattern.
//!
//! Each transaction variant has its own builder. Inputs arrive in their
//! boundary form (hex addresses and keys, base64 faucet packages, a metadata
//! document) and are validated only in `build()`, which either returns a
//! complete [`EncodedTx`] or an error. Nothing is half-built.
//!
//! Builders do not sign. Signing happens in [`super::signing`] once the
//! caller has the encoded bytes, so construction stays testable without key
//! material.

use std::fmt;

use tracing::debug;

use super::metadata::AccountMetadata;
use super::payload::{
    CollectFaucet, CreateAccount, EncodedFaucetPackage, RegisterPrivacyKey, SendTokens,
    SetAccountInfo, TransactionPayload, TxKind,
};
use crate::census::{build_privacy_key_proof, CensusProof};
use crate::codec::{decode_hex_fixed, strip_0x};
use crate::config::PRIVACY_KEY_LENGTH;
use crate::error::{TxError, TxResult};
use crate::identity::Address;

// ---------------------------------------------------------------------------
// EncodedTx
// ---------------------------------------------------------------------------

/// Output of every builder: the canonical payload bytes, plus the metadata
/// document in transport form for the account variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedTx {
    /// Which variant was built.
    pub kind: TxKind,
    /// Canonical binary encoding of the payload. This is what gets signed.
    pub tx: Vec<u8>,
    /// Base64 of the metadata JSON (CreateAccount and SetAccountInfo only).
    pub metadata: Option<String>,
}

impl EncodedTx {
    fn new(payload: &TransactionPayload, metadata: Option<String>) -> Self {
        let tx = payload.encode();
        debug!(
            kind = %payload.kind(),
            bytes = tx.len(),
            with_metadata = metadata.is_some(),
            "transaction payload encoded"
        );
        Self {
            kind: payload.kind(),
            tx,
            metadata,
        }
    }

    /// Decodes the payload bytes back into a [`TransactionPayload`].
    pub fn payload(&self) -> TxResult<TransactionPayload> {
        TransactionPayload::decode(&self.tx)
    }
}

// ---------------------------------------------------------------------------
// Amounts
// ---------------------------------------------------------------------------

/// A transfer amount as supplied by the caller: a signed integer or a decimal
/// string. Only strictly positive whole values survive [`AmountInput::parse`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AmountInput {
    Integer(i128),
    Text(String),
}

impl AmountInput {
    /// Parses the amount into the on-chain `u64`.
    ///
    /// Negative, zero, fractional and non-numeric values are all
    /// [`TxError::Precondition`].
    pub fn parse(&self) -> TxResult<u64> {
        let value: i128 = match self {
            Self::Integer(v) => *v,
            Self::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Err(TxError::precondition("amount is empty"));
                }
                trimmed.parse::<i128>().map_err(|_| {
                    TxError::precondition(format!("amount {trimmed:?} is not a whole number"))
                })?
            }
        };
        if value <= 0 {
            return Err(TxError::precondition(format!(
                "amount must be positive, got {value}"
            )));
        }
        u64::try_from(value)
            .map_err(|_| TxError::precondition(format!("amount {value} exceeds u64 range")))
    }
}

impl fmt::Display for AmountInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(v) => write!(f, "{v}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<u64> for AmountInput {
    fn from(v: u64) -> Self {
        Self::Integer(i128::from(v))
    }
}

impl From<u32> for AmountInput {
    fn from(v: u32) -> Self {
        Self::Integer(i128::from(v))
    }
}

impl From<i64> for AmountInput {
    fn from(v: i64) -> Self {
        Self::Integer(i128::from(v))
    }
}

impl From<i32> for AmountInput {
    fn from(v: i32) -> Self {
        Self::Integer(i128::from(v))
    }
}

impl From<&str> for AmountInput {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for AmountInput {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

// ---------------------------------------------------------------------------
// Shared validation
// ---------------------------------------------------------------------------

fn required<T>(value: Option<T>, what: &str) -> TxResult<T> {
    value.ok_or_else(|| TxError::precondition(format!("{what} is required")))
}

fn required_address(field: &'static str, value: Option<String>) -> TxResult<Address> {
    let text = required(value, field)?;
    Address::parse(field, &text)
}

fn required_info_uri(value: Option<String>) -> TxResult<String> {
    let uri = required(value, "infoURI")?;
    if uri.trim().is_empty() {
        return Err(TxError::precondition("infoURI must not be empty"));
    }
    Ok(uri)
}

// ---------------------------------------------------------------------------
// CreateAccountBuilder
// ---------------------------------------------------------------------------

/// Builds a CreateAccount payload.
///
/// ```
/// use vochain_tx::transaction::{AccountMetadata, CreateAccountBuilder};
///
/// let encoded = CreateAccountBuilder::new()
///     .address("0x0102030405060708090a0b0c0d0e0f1011121314")
///     .metadata(AccountMetadata::new("My org"))
///     .info_uri("ipfs://bafy...")
///     .build()
///     .unwrap();
/// assert!(encoded.metadata.is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CreateAccountBuilder {
    address: Option<String>,
    metadata: Option<AccountMetadata>,
    info_uri: Option<String>,
    faucet_package: Option<EncodedFaucetPackage>,
    privacy_key: Option<String>,
}

impl CreateAccountBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Account address, hex with optional `0x`.
    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn metadata(mut self, metadata: AccountMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Content id under which the metadata document is published.
    pub fn info_uri(mut self, uri: impl Into<String>) -> Self {
        self.info_uri = Some(uri.into());
        self
    }

    /// Faucet grant funding the new account.
    pub fn faucet_package(mut self, package: EncodedFaucetPackage) -> Self {
        self.faucet_package = Some(package);
        self
    }

    /// Privacy key (SIK) to register alongside the account, 32 bytes of hex.
    /// A blank value means no key.
    pub fn privacy_key(mut self, sik_hex: impl Into<String>) -> Self {
        self.privacy_key = Some(sik_hex.into());
        self
    }

    pub fn build(self) -> TxResult<EncodedTx> {
        let account = required_address("address", self.address)?;
        let metadata = required(self.metadata, "account metadata")?;
        let info_uri = required_info_uri(self.info_uri)?;
        let faucet_package = self
            .faucet_package
            .as_ref()
            .map(EncodedFaucetPackage::decode)
            .transpose()?;
        let privacy_key = self
            .privacy_key
            .as_deref()
            .filter(|s| !strip_0x(s.trim()).is_empty())
            .map(|s| decode_hex_fixed::<PRIVACY_KEY_LENGTH>("privacyKey", s))
            .transpose()?
            .map(|k| k.to_vec());

        let payload = TransactionPayload::CreateAccount(CreateAccount {
            account,
            info_uri,
            faucet_package,
            privacy_key,
        });
        Ok(EncodedTx::new(&payload, Some(metadata.to_base64()?)))
    }
}

// ---------------------------------------------------------------------------
// SetAccountInfoBuilder
// ---------------------------------------------------------------------------

/// Builds a SetAccountInfo payload.
#[derive(Debug, Clone, Default)]
pub struct SetAccountInfoBuilder {
    address: Option<String>,
    nonce: Option<u32>,
    metadata: Option<AccountMetadata>,
    info_uri: Option<String>,
}

impl SetAccountInfoBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// The account's current sequence number.
    pub fn nonce(mut self, nonce: u32) -> Self {
        self.nonce = Some(nonce);
        self
    }

    pub fn metadata(mut self, metadata: AccountMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn info_uri(mut self, uri: impl Into<String>) -> Self {
        self.info_uri = Some(uri.into());
        self
    }

    pub fn build(self) -> TxResult<EncodedTx> {
        let account = required_address("address", self.address)?;
        let nonce = required(self.nonce, "nonce")?;
        let metadata = required(self.metadata, "account metadata")?;
        let info_uri = required_info_uri(self.info_uri)?;

        let payload = TransactionPayload::SetAccountInfo(SetAccountInfo {
            account,
            nonce,
            info_uri,
        });
        Ok(EncodedTx::new(&payload, Some(metadata.to_base64()?)))
    }
}

// ---------------------------------------------------------------------------
// CollectFaucetBuilder
// ---------------------------------------------------------------------------

/// Builds a CollectFaucet payload.
#[derive(Debug, Clone, Default)]
pub struct CollectFaucetBuilder {
    nonce: Option<u32>,
    faucet_package: Option<EncodedFaucetPackage>,
}

impl CollectFaucetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nonce(mut self, nonce: u32) -> Self {
        self.nonce = Some(nonce);
        self
    }

    pub fn faucet_package(mut self, package: EncodedFaucetPackage) -> Self {
        self.faucet_package = Some(package);
        self
    }

    pub fn build(self) -> TxResult<EncodedTx> {
        let nonce = required(self.nonce, "nonce")?;
        let faucet_package = required(self.faucet_package, "faucet package")?.decode()?;

        let payload = TransactionPayload::CollectFaucet(CollectFaucet {
            nonce,
            faucet_package,
        });
        Ok(EncodedTx::new(&payload, None))
    }
}

// ---------------------------------------------------------------------------
// RegisterPrivacyKeyBuilder
// ---------------------------------------------------------------------------

/// Builds a RegisterPrivacyKey payload from a census proof.
#[derive(Debug, Clone, Default)]
pub struct RegisterPrivacyKeyBuilder {
    election_id: Option<String>,
    privacy_key: Option<String>,
    census_proof: Option<CensusProof>,
}

impl RegisterPrivacyKeyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn election_id(mut self, election_id_hex: impl Into<String>) -> Self {
        self.election_id = Some(election_id_hex.into());
        self
    }

    pub fn privacy_key(mut self, sik_hex: impl Into<String>) -> Self {
        self.privacy_key = Some(sik_hex.into());
        self
    }

    pub fn census_proof(mut self, proof: CensusProof) -> Self {
        self.census_proof = Some(proof);
        self
    }

    pub fn build(self) -> TxResult<EncodedTx> {
        let election_id = required(self.election_id, "electionId")?;
        let privacy_key = required(self.privacy_key, "privacyKey")?;
        let census_proof = required(self.census_proof, "census proof")?;

        let proof = build_privacy_key_proof(&election_id, &privacy_key, &census_proof)?;
        let payload = TransactionPayload::RegisterPrivacyKey(RegisterPrivacyKey { proof });
        Ok(EncodedTx::new(&payload, None))
    }
}

// ---------------------------------------------------------------------------
// SendTokensBuilder
// ---------------------------------------------------------------------------

/// Builds a SendTokens payload.
#[derive(Debug, Clone, Default)]
pub struct SendTokensBuilder {
    nonce: Option<u32>,
    from: Option<String>,
    to: Option<String>,
    amount: Option<AmountInput>,
}

impl SendTokensBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nonce(mut self, nonce: u32) -> Self {
        self.nonce = Some(nonce);
        self
    }

    pub fn from_address(mut self, address: impl Into<String>) -> Self {
        self.from = Some(address.into());
        self
    }

    pub fn to_address(mut self, address: impl Into<String>) -> Self {
        self.to = Some(address.into());
        self
    }

    pub fn amount(mut self, amount: impl Into<AmountInput>) -> Self {
        self.amount = Some(amount.into());
        self
    }

    pub fn build(self) -> TxResult<EncodedTx> {
        let nonce = required(self.nonce, "nonce")?;
        let from = required_address("from", self.from)?;
        let to = required_address("to", self.to)?;
        let value = required(self.amount, "amount")?.parse()?;

        let payload = TransactionPayload::SendTokens(SendTokens {
            nonce,
            from,
            to,
            value,
        });
        Ok(EncodedTx::new(&payload, None))
    }
}

// ---------------------------------------------------------------------------
// Free-function entry points
// ---------------------------------------------------------------------------

/// Encodes a CreateAccount transaction. The nonce is always 0.
pub fn create_account(
    address: &str,
    metadata: &AccountMetadata,
    info_uri: &str,
    faucet_package: Option<&EncodedFaucetPackage>,
    privacy_key_hex: Option<&str>,
) -> TxResult<EncodedTx> {
    let mut builder = CreateAccountBuilder::new()
        .address(address)
        .metadata(metadata.clone())
        .info_uri(info_uri);
    if let Some(pkg) = faucet_package {
        builder = builder.faucet_package(pkg.clone());
    }
    if let Some(sik) = privacy_key_hex {
        builder = builder.privacy_key(sik);
    }
    builder.build()
}

/// Encodes a SetAccountInfo transaction.
pub fn set_account_info(
    address: &str,
    nonce: u32,
    metadata: &AccountMetadata,
    info_uri: &str,
) -> TxResult<EncodedTx> {
    SetAccountInfoBuilder::new()
        .address(address)
        .nonce(nonce)
        .metadata(metadata.clone())
        .info_uri(info_uri)
        .build()
}

/// Encodes a CollectFaucet transaction.
pub fn collect_faucet(nonce: u32, faucet_package: &EncodedFaucetPackage) -> TxResult<EncodedTx> {
    CollectFaucetBuilder::new()
        .nonce(nonce)
        .faucet_package(faucet_package.clone())
        .build()
}

/// Encodes a RegisterPrivacyKey transaction.
pub fn register_privacy_key(
    election_id_hex: &str,
    privacy_key_hex: &str,
    census_proof: &CensusProof,
) -> TxResult<EncodedTx> {
    RegisterPrivacyKeyBuilder::new()
        .election_id(election_id_hex)
        .privacy_key(privacy_key_hex)
        .census_proof(census_proof.clone())
        .build()
}

/// Encodes a SendTokens transaction.
pub fn send_tokens(
    nonce: u32,
    from: &str,
    to: &str,
    amount: impl Into<AmountInput>,
) -> TxResult<EncodedTx> {
    SendTokensBuilder::new()
        .nonce(nonce)
        .from_address(from)
        .to_address(to)
        .amount(amount)
        .build()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::census::{CensusKeyType, ProofAlgorithm};
    use crate::codec::encode_base64;
    use crate::config::SIBLING_LENGTH;

    const ALICE: &str = "0x1111111111111111111111111111111111111111";
    const BOB: &str = "2222222222222222222222222222222222222222";
    const ELECTION: &str = "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";
    const SIK: &str = "bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb";

    fn faucet() -> EncodedFaucetPackage {
        EncodedFaucetPackage {
            payload: encode_base64(b"faucet-grant"),
            signature: encode_base64(&[7u8; 65]),
        }
    }

    fn census_proof(algorithm: ProofAlgorithm) -> CensusProof {
        CensusProof {
            siblings: vec![[3u8; SIBLING_LENGTH]],
            value: vec![1],
            algorithm,
            key_type: CensusKeyType::Address,
        }
    }

    // -----------------------------------------------------------------------
    // Amounts
    // -----------------------------------------------------------------------

    #[test]
    fn amount_accepts_integers_and_decimal_strings() {
        assert_eq!(AmountInput::from(100u64).parse().unwrap(), 100);
        assert_eq!(AmountInput::from(5i32).parse().unwrap(), 5);
        assert_eq!(AmountInput::from(" 42 ").parse().unwrap(), 42);
        assert_eq!(AmountInput::from(u64::MAX).parse().unwrap(), u64::MAX);
    }

    #[test]
    fn amount_rejects_negative_zero_and_garbage() {
        for input in [
            AmountInput::from(-5i64),
            AmountInput::from(0u64),
            AmountInput::from("abc"),
            AmountInput::from("1.5"),
            AmountInput::from(""),
            AmountInput::from("-1"),
        ] {
            assert!(
                matches!(input.parse(), Err(TxError::Precondition(_))),
                "{input} should be rejected"
            );
        }
    }

    #[test]
    fn amount_above_u64_rejected() {
        let too_big = format!("{}", u128::from(u64::MAX) + 1);
        assert!(matches!(
            AmountInput::from(too_big).parse(),
            Err(TxError::Precondition(_))
        ));
    }

    // -----------------------------------------------------------------------
    // Builders
    // -----------------------------------------------------------------------

    #[test]
    fn send_tokens_encodes_all_fields() {
        let encoded = send_tokens(3, ALICE, BOB, 100u64).unwrap();
        assert_eq!(encoded.kind, TxKind::SendTokens);
        assert!(encoded.metadata.is_none());

        match encoded.payload().unwrap() {
            TransactionPayload::SendTokens(p) => {
                assert_eq!(p.nonce, 3);
                assert_eq!(p.from, ALICE.parse::<Address>().unwrap());
                assert_eq!(p.to, BOB.parse::<Address>().unwrap());
                assert_eq!(p.value, 100);
            }
            other => panic!("unexpected payload {other:?}"),
        }
    }

    #[test]
    fn send_tokens_negative_amount_is_precondition() {
        assert!(matches!(
            send_tokens(3, ALICE, BOB, -5i64),
            Err(TxError::Precondition(_))
        ));
    }

    #[test]
    fn send_tokens_without_nonce_is_precondition() {
        let err = SendTokensBuilder::new()
            .from_address(ALICE)
            .to_address(BOB)
            .amount(1u64)
            .build()
            .unwrap_err();
        assert!(matches!(err, TxError::Precondition(_)));
    }

    #[test]
    fn send_tokens_bad_address_is_encoding_error() {
        let err = send_tokens(1, "0xzz", BOB, 1u64).unwrap_err();
        assert!(matches!(err, TxError::Encoding { field: "from", .. }));
    }

    #[test]
    fn create_account_carries_metadata_and_optionals() {
        let metadata = AccountMetadata::new("Org");
        let encoded =
            create_account(ALICE, &metadata, "ipfs://cid", Some(&faucet()), Some(SIK)).unwrap();

        assert_eq!(
            AccountMetadata::from_base64(encoded.metadata.as_deref().unwrap()).unwrap(),
            metadata
        );
        match encoded.payload().unwrap() {
            TransactionPayload::CreateAccount(p) => {
                assert_eq!(p.info_uri, "ipfs://cid");
                assert_eq!(p.faucet_package.unwrap().payload, b"faucet-grant".to_vec());
                assert_eq!(p.privacy_key, Some(vec![0xbb; 32]));
            }
            other => panic!("unexpected payload {other:?}"),
        }
    }

    #[test]
    fn create_account_without_optionals() {
        let encoded =
            create_account(ALICE, &AccountMetadata::new("Org"), "ipfs://cid", None, None).unwrap();
        match encoded.payload().unwrap() {
            TransactionPayload::CreateAccount(p) => {
                assert!(p.faucet_package.is_none());
                assert!(p.privacy_key.is_none());
            }
            other => panic!("unexpected payload {other:?}"),
        }
    }

    #[test]
    fn create_account_blank_privacy_key_is_absent() {
        for blank in ["", "  ", "0x"] {
            let encoded = create_account(
                ALICE,
                &AccountMetadata::new("Org"),
                "ipfs://cid",
                None,
                Some(blank),
            )
            .unwrap();
            match encoded.payload().unwrap() {
                TransactionPayload::CreateAccount(p) => assert!(p.privacy_key.is_none()),
                other => panic!("unexpected payload {other:?}"),
            }
        }
    }

    #[test]
    fn create_account_requires_metadata() {
        let err = CreateAccountBuilder::new()
            .address(ALICE)
            .info_uri("ipfs://cid")
            .build()
            .unwrap_err();
        assert!(matches!(err, TxError::Precondition(_)));
    }

    #[test]
    fn create_account_short_privacy_key_rejected() {
        let err = create_account(
            ALICE,
            &AccountMetadata::new("Org"),
            "ipfs://cid",
            None,
            Some("0xbeef"),
        )
        .unwrap_err();
        assert!(matches!(err, TxError::Encoding { field: "privacyKey", .. }));
    }

    #[test]
    fn empty_info_uri_rejected() {
        let err = set_account_info(ALICE, 4, &AccountMetadata::new("Org"), "  ").unwrap_err();
        assert!(matches!(err, TxError::Precondition(_)));
    }

    #[test]
    fn set_account_info_uses_given_nonce() {
        let encoded = set_account_info(ALICE, 9, &AccountMetadata::new("Org"), "ipfs://x").unwrap();
        assert_eq!(encoded.kind, TxKind::SetAccountInfo);
        assert_eq!(encoded.payload().unwrap().nonce(), Some(9));
    }

    #[test]
    fn collect_faucet_decodes_base64_package() {
        let encoded = collect_faucet(2, &faucet()).unwrap();
        match encoded.payload().unwrap() {
            TransactionPayload::CollectFaucet(p) => {
                assert_eq!(p.nonce, 2);
                assert_eq!(p.faucet_package.signature, vec![7u8; 65]);
            }
            other => panic!("unexpected payload {other:?}"),
        }
    }

    #[test]
    fn collect_faucet_invalid_base64_is_encoding_error() {
        let broken = EncodedFaucetPackage {
            payload: "***".into(),
            signature: encode_base64(b"sig"),
        };
        assert!(matches!(
            collect_faucet(1, &broken),
            Err(TxError::Encoding { .. })
        ));
    }

    #[test]
    fn register_privacy_key_requires_poseidon() {
        let ok = register_privacy_key(ELECTION, SIK, &census_proof(ProofAlgorithm::PoseidonMerkle))
            .unwrap();
        assert_eq!(ok.kind, TxKind::RegisterPrivacyKey);

        let err = register_privacy_key(ELECTION, SIK, &census_proof(ProofAlgorithm::Blake2bMerkle))
            .unwrap_err();
        assert!(matches!(err, TxError::SchemeMismatch { .. }));
    }

    #[test]
    fn builders_are_deterministic() {
        let a = send_tokens(1, ALICE, BOB, "10").unwrap();
        let b = send_tokens(1, ALICE, BOB, 10u64).unwrap();
        assert_eq!(a, b);
    }
}
