//! The transaction payload union and its canonical encoding.
//!
//! [`TransactionPayload`] is the typed view of a transaction: one variant per
//! intent, each holding only its own fields. [`TransactionPayload::encode`]
//! maps it onto the protobuf union in [`super::wire`];
//! [`TransactionPayload::decode`] is the reference decoder that maps it back,
//! reporting unset optional fields as `None`.

use prost::Message;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::wire::{self, tx::Payload};
use crate::census::PrivacyKeyProof;
use crate::codec::{decode_base64, encode_base64};
use crate::config::PRIVACY_KEY_LENGTH;
use crate::error::{TxError, TxResult};
use crate::identity::Address;

// ---------------------------------------------------------------------------
// Faucet packages
// ---------------------------------------------------------------------------

/// A faucet grant: opaque payload plus the faucet operator's signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaucetPackage {
    pub payload: Vec<u8>,
    pub signature: Vec<u8>,
}

/// The faucet package as it arrives at the API boundary (base64 text).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedFaucetPackage {
    pub payload: String,
    pub signature: String,
}

impl EncodedFaucetPackage {
    /// Decodes both halves to raw bytes. Both must be non-empty.
    pub fn decode(&self) -> TxResult<FaucetPackage> {
        let payload = decode_base64("faucetPackage.payload", &self.payload)?;
        let signature = decode_base64("faucetPackage.signature", &self.signature)?;
        if payload.is_empty() || signature.is_empty() {
            return Err(TxError::precondition(
                "faucet package payload and signature must not be empty",
            ));
        }
        Ok(FaucetPackage { payload, signature })
    }
}

impl FaucetPackage {
    /// Re-encodes the package into its base64 boundary form.
    pub fn encode(&self) -> EncodedFaucetPackage {
        EncodedFaucetPackage {
            payload: encode_base64(&self.payload),
            signature: encode_base64(&self.signature),
        }
    }

    fn to_wire(&self) -> wire::FaucetPackage {
        wire::FaucetPackage {
            payload: self.payload.clone(),
            signature: self.signature.clone(),
        }
    }

    fn from_wire(pkg: &wire::FaucetPackage) -> Self {
        Self {
            payload: pkg.payload.clone(),
            signature: pkg.signature.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Variants
// ---------------------------------------------------------------------------

/// Creates an account. Always uses the account's first sequence slot (0).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateAccount {
    pub account: Address,
    pub info_uri: String,
    pub faucet_package: Option<FaucetPackage>,
    pub privacy_key: Option<Vec<u8>>,
}

/// Points an existing account at a new metadata document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetAccountInfo {
    pub account: Address,
    pub nonce: u32,
    pub info_uri: String,
}

/// Redeems a faucet grant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectFaucet {
    pub nonce: u32,
    pub faucet_package: FaucetPackage,
}

/// Registers a privacy key for anonymous participation in an election.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterPrivacyKey {
    pub proof: PrivacyKeyProof,
}

/// Transfers tokens between accounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendTokens {
    pub nonce: u32,
    pub from: Address,
    pub to: Address,
    pub value: u64,
}

/// Discriminant of a [`TransactionPayload`], for logging and dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TxKind {
    CreateAccount,
    SetAccountInfo,
    CollectFaucet,
    RegisterPrivacyKey,
    SendTokens,
}

impl fmt::Display for TxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CreateAccount => write!(f, "CreateAccount"),
            Self::SetAccountInfo => write!(f, "SetAccountInfo"),
            Self::CollectFaucet => write!(f, "CollectFaucet"),
            Self::RegisterPrivacyKey => write!(f, "RegisterPrivacyKey"),
            Self::SendTokens => write!(f, "SendTokens"),
        }
    }
}

/// A transaction payload. Exactly one variant is active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionPayload {
    CreateAccount(CreateAccount),
    SetAccountInfo(SetAccountInfo),
    CollectFaucet(CollectFaucet),
    RegisterPrivacyKey(RegisterPrivacyKey),
    SendTokens(SendTokens),
}

impl TransactionPayload {
    /// The active variant.
    pub fn kind(&self) -> TxKind {
        match self {
            Self::CreateAccount(_) => TxKind::CreateAccount,
            Self::SetAccountInfo(_) => TxKind::SetAccountInfo,
            Self::CollectFaucet(_) => TxKind::CollectFaucet,
            Self::RegisterPrivacyKey(_) => TxKind::RegisterPrivacyKey,
            Self::SendTokens(_) => TxKind::SendTokens,
        }
    }

    /// The sequence number embedded in the payload, if the variant has one.
    pub fn nonce(&self) -> Option<u32> {
        match self {
            Self::CreateAccount(_) => Some(0),
            Self::SetAccountInfo(p) => Some(p.nonce),
            Self::CollectFaucet(p) => Some(p.nonce),
            Self::RegisterPrivacyKey(_) => None,
            Self::SendTokens(p) => Some(p.nonce),
        }
    }

    /// Maps the payload onto the wire union.
    pub fn to_wire(&self) -> wire::Tx {
        let payload = match self {
            Self::CreateAccount(p) => Payload::SetAccount(wire::SetAccountTx {
                txtype: wire::TxType::CreateAccount as i32,
                nonce: Some(0),
                info_uri: Some(p.info_uri.clone()),
                account: Some(p.account.to_vec()),
                faucet_package: p.faucet_package.as_ref().map(FaucetPackage::to_wire),
                delegates: Vec::new(),
                sik: p.privacy_key.clone(),
            }),
            Self::SetAccountInfo(p) => Payload::SetAccount(wire::SetAccountTx {
                txtype: wire::TxType::SetAccountInfoUri as i32,
                nonce: Some(p.nonce),
                info_uri: Some(p.info_uri.clone()),
                account: Some(p.account.to_vec()),
                faucet_package: None,
                delegates: Vec::new(),
                sik: None,
            }),
            Self::CollectFaucet(p) => Payload::CollectFaucet(wire::CollectFaucetTx {
                faucet_package: Some(p.faucet_package.to_wire()),
                nonce: p.nonce,
            }),
            Self::RegisterPrivacyKey(p) => Payload::RegisterSik(p.proof.to_wire()),
            Self::SendTokens(p) => Payload::SendTokens(wire::SendTokensTx {
                txtype: wire::TxType::SendTokens as i32,
                nonce: p.nonce,
                from: p.from.to_vec(),
                to: p.to.to_vec(),
                value: p.value,
            }),
        };
        wire::Tx {
            payload: Some(payload),
        }
    }

    /// Canonical binary encoding.
    pub fn encode(&self) -> Vec<u8> {
        self.to_wire().encode_to_vec()
    }

    /// Reference decoder: parses canonical bytes back into a payload.
    pub fn decode(bytes: &[u8]) -> TxResult<Self> {
        let tx = wire::Tx::decode(bytes)?;
        match tx.payload {
            None => Err(TxError::Decode("transaction has no payload".into())),
            Some(Payload::SetAccount(p)) => Self::from_set_account(p),
            Some(Payload::CollectFaucet(p)) => {
                let pkg = p
                    .faucet_package
                    .as_ref()
                    .ok_or_else(|| TxError::Decode("collectFaucet without faucet package".into()))?;
                Ok(Self::CollectFaucet(CollectFaucet {
                    nonce: p.nonce,
                    faucet_package: FaucetPackage::from_wire(pkg),
                }))
            }
            Some(Payload::RegisterSik(p)) => Ok(Self::RegisterPrivacyKey(RegisterPrivacyKey {
                proof: PrivacyKeyProof::from_wire(&p)?,
            })),
            Some(Payload::SendTokens(p)) => Ok(Self::SendTokens(SendTokens {
                nonce: p.nonce,
                from: Address::try_from_slice("from", &p.from)?,
                to: Address::try_from_slice("to", &p.to)?,
                value: p.value,
            })),
        }
    }

    fn from_set_account(p: wire::SetAccountTx) -> TxResult<Self> {
        let account = p
            .account
            .as_deref()
            .ok_or_else(|| TxError::Decode("setAccount without account".into()))
            .and_then(|a| Address::try_from_slice("account", a))?;
        let info_uri = p
            .info_uri
            .ok_or_else(|| TxError::Decode("setAccount without infoURI".into()))?;
        let nonce = p
            .nonce
            .ok_or_else(|| TxError::Decode("setAccount without nonce".into()))?;

        match wire::TxType::try_from(p.txtype) {
            Ok(wire::TxType::CreateAccount) => {
                if nonce != 0 {
                    return Err(TxError::Decode(format!(
                        "createAccount must use nonce 0, found {nonce}"
                    )));
                }
                if let Some(sik) = &p.sik {
                    if sik.len() != PRIVACY_KEY_LENGTH {
                        return Err(TxError::encoding(
                            "privacyKey",
                            format!("expected {PRIVACY_KEY_LENGTH} bytes, got {}", sik.len()),
                        ));
                    }
                }
                Ok(Self::CreateAccount(CreateAccount {
                    account,
                    info_uri,
                    faucet_package: p.faucet_package.as_ref().map(FaucetPackage::from_wire),
                    privacy_key: p.sik,
                }))
            }
            Ok(wire::TxType::SetAccountInfoUri) => Ok(Self::SetAccountInfo(SetAccountInfo {
                account,
                nonce,
                info_uri,
            })),
            _ => Err(TxError::Decode(format!(
                "unsupported setAccount txtype {}",
                p.txtype
            ))),
        }
    }
}
