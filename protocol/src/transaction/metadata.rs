//! Account metadata documents.
//!
//! Metadata is not part of the signed payload. The payload only carries the
//! content id (`infoURI`) under which the document is published; the document
//! itself travels next to the signed envelope as base64 of its UTF-8 JSON.
//!
//! Serialization is canonical: struct fields serialize in declaration order
//! and every map is a `BTreeMap`, so the same document always yields the same
//! bytes.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::codec::{decode_base64, encode_base64};
use crate::error::{TxError, TxResult};

/// Language key used when a text has no translations.
pub const DEFAULT_LANGUAGE: &str = "default";

/// Current metadata schema version.
pub const METADATA_VERSION: &str = "1.0";

/// Text keyed by language code.
pub type MultiLanguage = BTreeMap<String, String>;

/// Media references (URLs or content ids).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountMedia {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
}

/// The off-chain document describing an account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountMetadata {
    pub version: String,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub name: MultiLanguage,
    #[serde(default)]
    pub description: MultiLanguage,
    #[serde(default)]
    pub news_feed: MultiLanguage,
    #[serde(default)]
    pub media: AccountMedia,
    #[serde(default)]
    pub meta: BTreeMap<String, serde_json::Value>,
}

impl AccountMetadata {
    /// A document with a single-language name and nothing else.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            version: METADATA_VERSION.to_string(),
            languages: vec![DEFAULT_LANGUAGE.to_string()],
            name: BTreeMap::from([(DEFAULT_LANGUAGE.to_string(), name.into())]),
            description: MultiLanguage::new(),
            news_feed: MultiLanguage::new(),
            media: AccountMedia::default(),
            meta: BTreeMap::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description
            .insert(DEFAULT_LANGUAGE.to_string(), description.into());
        self
    }

    pub fn with_news_feed(mut self, feed: impl Into<String>) -> Self {
        self.news_feed.insert(DEFAULT_LANGUAGE.to_string(), feed.into());
        self
    }

    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.media.avatar = Some(avatar.into());
        self
    }

    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.media.header = Some(header.into());
        self
    }

    pub fn with_logo(mut self, logo: impl Into<String>) -> Self {
        self.media.logo = Some(logo.into());
        self
    }

    /// Adds an arbitrary annotation. A repeated key overwrites the old value.
    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.meta.insert(key.into(), value.into());
        self
    }

    /// Canonical UTF-8 JSON bytes.
    pub fn to_json_bytes(&self) -> TxResult<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| TxError::encoding("metadata", e.to_string()))
    }

    /// Transport form: base64 of the canonical JSON.
    pub fn to_base64(&self) -> TxResult<String> {
        Ok(encode_base64(&self.to_json_bytes()?))
    }

    /// Parses the transport form back into a document.
    pub fn from_base64(text: &str) -> TxResult<Self> {
        let bytes = decode_base64("metadata", text)?;
        serde_json::from_slice(&bytes).map_err(|e| TxError::encoding("metadata", e.to_string()))
    }
}
