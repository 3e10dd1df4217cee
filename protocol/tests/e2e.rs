//! End-to-end integration tests for the Vochain transaction core.
//!
//! Each test drives the public API the way a client would: boundary strings
//! in, a signed base64 envelope out, then decodes the envelope again and
//! checks what came back. No test shares state with another.

use vochain_tx::census::{
    build_privacy_key_proof, pack_siblings, CensusKeyType, CensusProof, CensusProofResponse,
    ProofAlgorithm,
};
use vochain_tx::codec::{decode_hex, encode_base64};
use vochain_tx::crypto::keys::TxKeypair;
use vochain_tx::identity::Address;
use vochain_tx::transaction::{
    collect_faucet, create_account, register_privacy_key, send_tokens, set_account_info,
    sign_envelope, verify_transaction_signature, AccountMetadata, ChannelSigner,
    CollectFaucetBuilder, EncodedFaucetPackage, LocalSigner, SendTokensBuilder,
    SetAccountInfoBuilder, SignedEnvelope, TransactionPayload, TxSigner,
};
use vochain_tx::{TxError, TxErrorKind};

const CHAIN_A: &str = "vocdoni/DEV/32";
const CHAIN_B: &str = "vocdoni/STAGE/11";

const FROM: &str = "0xAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA01";
const TO: &str = "0xBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBB02";
const ELECTION: &str = "0x4ae20a8eb4ca2e0fd5b2d4a6b5ab56e1c4b42c8b0c15a9d4f77c6f0000000001";
const SIK: &str = "0x0f1e2d3c4b5a69788796a5b4c3d2e1f00f1e2d3c4b5a69788796a5b4c3d2e1f0";

// ---------------------------------------------------------------------------
// Test Helpers
// ---------------------------------------------------------------------------

fn signer() -> LocalSigner {
    LocalSigner::new(TxKeypair::from_seed(&[0x42; 32]))
}

fn faucet_package() -> EncodedFaucetPackage {
    EncodedFaucetPackage {
        payload: encode_base64(b"{\"to\":\"aaaa\",\"amount\":100,\"identifier\":7}"),
        signature: encode_base64(&[0x1b; 65]),
    }
}

fn census_response(proof_type: &str, key_type: &str) -> CensusProofResponse {
    let siblings = [[0x01; 32], [0u8; 32], [0x03; 32]];
    CensusProofResponse {
        proof: hex::encode(pack_siblings(&siblings).unwrap()),
        value: "0a".into(),
        weight: Some("10".into()),
        proof_type: proof_type.into(),
        key_type: key_type.into(),
    }
}

async fn sign_and_reopen(tx: &[u8]) -> SignedEnvelope {
    let envelope = sign_envelope(tx, CHAIN_A, &signer()).await.unwrap();
    SignedEnvelope::from_base64(&envelope.to_base64()).unwrap()
}

// ---------------------------------------------------------------------------
// Addresses
// ---------------------------------------------------------------------------

#[test]
fn address_prefix_is_optional() {
    let with = Address::parse("address", FROM).unwrap();
    let without = Address::parse("address", &FROM[2..]).unwrap();
    assert_eq!(with, without);
    assert_eq!(with.to_vec(), decode_hex("address", FROM).unwrap());
    assert_eq!(with.to_string(), FROM.to_lowercase());
}

// ---------------------------------------------------------------------------
// Encode / decode for every variant
// ---------------------------------------------------------------------------

#[test]
fn send_tokens_scenario() {
    let encoded = send_tokens(3, FROM, TO, 100u64).unwrap();
    match TransactionPayload::decode(&encoded.tx).unwrap() {
        TransactionPayload::SendTokens(p) => {
            assert_eq!(p.nonce, 3);
            assert_eq!(p.from.to_string(), FROM.to_lowercase());
            assert_eq!(p.to.to_string(), TO.to_lowercase());
            assert_eq!(p.value, 100);
        }
        other => panic!("unexpected payload {other:?}"),
    }

    let err = send_tokens(3, FROM, TO, -5i64).unwrap_err();
    assert!(matches!(err, TxError::Precondition(_)));
    assert_eq!(err.kind(), TxErrorKind::Data);
}

#[test]
fn create_account_reports_absent_optionals_as_none() {
    let meta = AccountMetadata::new("Civic Lab").with_description("Votes for the neighbourhood");
    let encoded = create_account(FROM, &meta, "ipfs://bafybeigdyr", None, None).unwrap();

    match TransactionPayload::decode(&encoded.tx).unwrap() {
        TransactionPayload::CreateAccount(p) => {
            assert_eq!(p.account, Address::parse("address", FROM).unwrap());
            assert_eq!(p.info_uri, "ipfs://bafybeigdyr");
            assert_eq!(p.faucet_package, None);
            assert_eq!(p.privacy_key, None);
        }
        other => panic!("unexpected payload {other:?}"),
    }
    assert_eq!(
        AccountMetadata::from_base64(encoded.metadata.as_deref().unwrap()).unwrap(),
        meta
    );
}

#[test]
fn create_account_always_uses_sequence_zero() {
    let with_everything = create_account(
        FROM,
        &AccountMetadata::new("x"),
        "ipfs://cid",
        Some(&faucet_package()),
        Some(SIK),
    )
    .unwrap();
    let payload = with_everything.payload().unwrap();
    assert_eq!(payload.nonce(), Some(0));
    match payload {
        TransactionPayload::CreateAccount(p) => {
            assert!(p.faucet_package.is_some());
            assert_eq!(p.privacy_key.unwrap().len(), 32);
        }
        other => panic!("unexpected payload {other:?}"),
    }
}

#[test]
fn sequence_is_required_where_it_applies() {
    let set_info = SetAccountInfoBuilder::new()
        .address(FROM)
        .metadata(AccountMetadata::new("x"))
        .info_uri("ipfs://cid")
        .build();
    let faucet = CollectFaucetBuilder::new()
        .faucet_package(faucet_package())
        .build();
    let transfer = SendTokensBuilder::new()
        .from_address(FROM)
        .to_address(TO)
        .amount(1u64)
        .build();

    for result in [set_info, faucet, transfer] {
        assert!(matches!(result, Err(TxError::Precondition(_))));
    }
}

#[test]
fn set_account_info_roundtrip() {
    let encoded = set_account_info(FROM, 8, &AccountMetadata::new("x"), "ipfs://v2").unwrap();
    match encoded.payload().unwrap() {
        TransactionPayload::SetAccountInfo(p) => {
            assert_eq!(p.nonce, 8);
            assert_eq!(p.info_uri, "ipfs://v2");
        }
        other => panic!("unexpected payload {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Signing
// ---------------------------------------------------------------------------

#[tokio::test]
async fn signing_is_deterministic_per_key() {
    let encoded = send_tokens(1, FROM, TO, 5u64).unwrap();
    let first = sign_envelope(&encoded.tx, CHAIN_A, &signer()).await.unwrap();
    let second = sign_envelope(&encoded.tx, CHAIN_A, &signer()).await.unwrap();
    assert_eq!(first.to_base64(), second.to_base64());
}

#[tokio::test]
async fn signature_for_one_chain_fails_on_another() {
    let encoded = send_tokens(1, FROM, TO, 5u64).unwrap();
    let signer = signer();
    let envelope = sign_envelope(&encoded.tx, CHAIN_A, &signer).await.unwrap();
    let public_key = signer.public_key().await.unwrap();

    assert!(
        verify_transaction_signature(&encoded.tx, CHAIN_A, &public_key, envelope.signature())
            .unwrap()
    );
    assert!(
        !verify_transaction_signature(&encoded.tx, CHAIN_B, &public_key, envelope.signature())
            .unwrap()
    );
}

#[tokio::test]
async fn missing_chain_id_is_precondition() {
    let encoded = send_tokens(1, FROM, TO, 5u64).unwrap();
    let err = sign_envelope(&encoded.tx, "", &signer()).await.unwrap_err();
    assert!(matches!(err, TxError::Precondition(_)));
}

#[tokio::test]
async fn unavailable_signer_is_credential_problem() {
    let (remote, backend) = ChannelSigner::channel(TxKeypair::generate().public_key(), 1);
    drop(backend);

    let encoded = send_tokens(1, FROM, TO, 5u64).unwrap();
    let err = sign_envelope(&encoded.tx, CHAIN_A, &remote).await.unwrap_err();
    assert!(matches!(err, TxError::MissingCredential(_)));
    assert_eq!(err.kind(), TxErrorKind::Credential);
}

// ---------------------------------------------------------------------------
// Faucet
// ---------------------------------------------------------------------------

#[tokio::test]
async fn collect_faucet_envelope_carries_raw_package() {
    let package = faucet_package();
    let encoded = collect_faucet(4, &package).unwrap();
    let envelope = sign_and_reopen(&encoded.tx).await;

    match envelope.payload().unwrap() {
        TransactionPayload::CollectFaucet(p) => {
            assert_eq!(p.nonce, 4);
            assert_eq!(p.faucet_package, package.decode().unwrap());
            assert_eq!(p.faucet_package.signature, vec![0x1b; 65]);
        }
        other => panic!("unexpected payload {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Privacy-key registration
// ---------------------------------------------------------------------------

#[tokio::test]
async fn register_privacy_key_with_address_poseidon_proof() {
    let proof = CensusProof::from_response(&census_response("poseidon-merkle", "address")).unwrap();
    let encoded = register_privacy_key(ELECTION, SIK, &proof).unwrap();
    let envelope = sign_and_reopen(&encoded.tx).await;

    match envelope.payload().unwrap() {
        TransactionPayload::RegisterPrivacyKey(p) => {
            let expected = build_privacy_key_proof(ELECTION, SIK, &proof).unwrap();
            assert_eq!(p.proof, expected);
            assert_eq!(p.proof.available_weight, vec![0x0a]);
            let path = p.proof.sibling_path().unwrap();
            assert_eq!(path[0], [0x01; 32]);
            assert_eq!(path[1], [0u8; 32]);
            assert_eq!(path[2], [0x03; 32]);
        }
        other => panic!("unexpected payload {other:?}"),
    }
}

#[test]
fn register_privacy_key_rejects_other_key_type() {
    let proof = CensusProof::from_response(&census_response("poseidon-merkle", "other")).unwrap();
    assert_eq!(proof.key_type, CensusKeyType::Other("other".into()));

    let err = register_privacy_key(ELECTION, SIK, &proof).unwrap_err();
    assert!(matches!(err, TxError::SchemeMismatch { .. }));
    assert_eq!(err.kind(), TxErrorKind::Scheme);
}

#[test]
fn register_privacy_key_rejects_other_algorithm() {
    let proof = CensusProof::from_response(&census_response("blake2b-merkle", "address")).unwrap();
    assert_eq!(proof.algorithm, ProofAlgorithm::Blake2bMerkle);
    assert!(matches!(
        register_privacy_key(ELECTION, SIK, &proof),
        Err(TxError::SchemeMismatch { .. })
    ));
}

#[test]
fn register_privacy_key_rejects_bare_arbo_label() {
    let proof = CensusProof::from_response(&census_response("arbo", "address")).unwrap();
    assert_eq!(proof.algorithm, ProofAlgorithm::Unknown("arbo".into()));

    let err = register_privacy_key(ELECTION, SIK, &proof).unwrap_err();
    assert!(matches!(err, TxError::SchemeMismatch { .. }));
    assert_eq!(err.kind(), TxErrorKind::Scheme);
}
