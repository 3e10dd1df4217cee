//! Protobuf wire schema for Vochain transactions.
//!
//! Hand-maintained `prost` messages for the subset of the transaction union
//! this crate produces. The layout follows Vochain's message shapes, but the
//! tag and enum numbering is this crate's own and is not checked against the
//! upstream `.proto` files; envelopes are only guaranteed to decode with this
//! schema. Signed bytes depend on these numbers, so never renumber them.
//! Fields declared `optional` carry explicit presence, so an unset value is
//! absent from the bytes rather than encoded as zero.

/// The transaction tagged union. Exactly one payload is set.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Tx {
    #[prost(oneof = "tx::Payload", tags = "7, 9, 10, 13")]
    pub payload: ::core::option::Option<tx::Payload>,
}

pub mod tx {
    /// Payload variants of [`super::Tx`].
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Payload {
        #[prost(message, tag = "7")]
        SendTokens(super::SendTokensTx),
        #[prost(message, tag = "9")]
        SetAccount(super::SetAccountTx),
        #[prost(message, tag = "10")]
        CollectFaucet(super::CollectFaucetTx),
        #[prost(message, tag = "13")]
        RegisterSik(super::RegisterSikTx),
    }
}

/// Signed transport unit: encoded [`Tx`] bytes plus the signature over them.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SignedTx {
    #[prost(bytes = "vec", tag = "1")]
    pub tx: ::prost::alloc::vec::Vec<u8>,
    #[prost(bytes = "vec", tag = "2")]
    pub signature: ::prost::alloc::vec::Vec<u8>,
}

/// Discriminates the account-level transactions that share a message type.
/// Numbering is local to this schema.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum TxType {
    TxUnknown = 0,
    SendTokens = 1,
    CreateAccount = 2,
    SetAccountInfoUri = 3,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SendTokensTx {
    #[prost(enumeration = "TxType", tag = "1")]
    pub txtype: i32,
    #[prost(uint32, tag = "2")]
    pub nonce: u32,
    #[prost(bytes = "vec", tag = "3")]
    pub from: ::prost::alloc::vec::Vec<u8>,
    #[prost(bytes = "vec", tag = "4")]
    pub to: ::prost::alloc::vec::Vec<u8>,
    #[prost(uint64, tag = "5")]
    pub value: u64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SetAccountTx {
    #[prost(enumeration = "TxType", tag = "1")]
    pub txtype: i32,
    #[prost(uint32, optional, tag = "2")]
    pub nonce: ::core::option::Option<u32>,
    #[prost(string, optional, tag = "3")]
    pub info_uri: ::core::option::Option<::prost::alloc::string::String>,
    #[prost(bytes = "vec", optional, tag = "4")]
    pub account: ::core::option::Option<::prost::alloc::vec::Vec<u8>>,
    #[prost(message, optional, tag = "5")]
    pub faucet_package: ::core::option::Option<FaucetPackage>,
    #[prost(bytes = "vec", repeated, tag = "6")]
    pub delegates: ::prost::alloc::vec::Vec<::prost::alloc::vec::Vec<u8>>,
    #[prost(bytes = "vec", optional, tag = "7")]
    pub sik: ::core::option::Option<::prost::alloc::vec::Vec<u8>>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct FaucetPackage {
    #[prost(bytes = "vec", tag = "1")]
    pub payload: ::prost::alloc::vec::Vec<u8>,
    #[prost(bytes = "vec", tag = "2")]
    pub signature: ::prost::alloc::vec::Vec<u8>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CollectFaucetTx {
    #[prost(message, optional, tag = "2")]
    pub faucet_package: ::core::option::Option<FaucetPackage>,
    #[prost(uint32, tag = "3")]
    pub nonce: u32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RegisterSikTx {
    #[prost(bytes = "vec", tag = "1")]
    pub election_id: ::prost::alloc::vec::Vec<u8>,
    #[prost(message, optional, tag = "2")]
    pub census_proof: ::core::option::Option<Proof>,
    #[prost(bytes = "vec", tag = "3")]
    pub sik: ::prost::alloc::vec::Vec<u8>,
}

/// Census proof union. Only the arbo tree proof is produced by this crate.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Proof {
    #[prost(oneof = "proof::Payload", tags = "6")]
    pub payload: ::core::option::Option<proof::Payload>,
}

pub mod proof {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Payload {
        #[prost(message, tag = "6")]
        Arbo(super::ProofArbo),
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProofArbo {
    #[prost(enumeration = "ProofArboType", tag = "1")]
    pub r#type: i32,
    #[prost(bytes = "vec", tag = "2")]
    pub siblings: ::prost::alloc::vec::Vec<u8>,
    #[prost(bytes = "vec", tag = "3")]
    pub available_weight: ::prost::alloc::vec::Vec<u8>,
    #[prost(enumeration = "ProofArboKeyType", tag = "4")]
    pub key_type: i32,
}

/// Hash function of an arbo census tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum ProofArboType {
    Blake2b = 0,
    Poseidon = 1,
}

/// How the census leaf key was derived.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum ProofArboKeyType {
    Pubkey = 0,
    Address = 1,
}
