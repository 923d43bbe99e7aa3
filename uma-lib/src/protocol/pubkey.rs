use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::keys::UmaKeyPair;
use crate::Result;

/// Public keys a VASP publishes at `/.well-known/lnurlpubkey`.
///
/// Keys travel as hex; the expiration as unix seconds. A missing expiration
/// means the keys never expire.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PubkeyResponse {
    /// DER SubjectPublicKeyInfo of the signing key.
    #[serde(with = "hex")]
    pub signing_pubkey: Vec<u8>,
    /// DER SubjectPublicKeyInfo of the travel-rule encryption key.
    #[serde(with = "hex")]
    pub encryption_pubkey: Vec<u8>,
    /// When these keys stop being valid.
    #[serde(
        default,
        with = "chrono::serde::ts_seconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub expiration_timestamp: Option<DateTime<Utc>>,
}

impl PubkeyResponse {
    /// Create a response from raw key bytes.
    pub fn new(
        signing_pubkey: impl Into<Vec<u8>>,
        encryption_pubkey: impl Into<Vec<u8>>,
        expiration_timestamp: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            signing_pubkey: signing_pubkey.into(),
            encryption_pubkey: encryption_pubkey.into(),
            expiration_timestamp,
        }
    }

    /// Publish the public halves of a signing and an encryption keypair.
    pub fn from_keys(
        signing: &UmaKeyPair,
        encryption: &UmaKeyPair,
        expiration_timestamp: Option<DateTime<Utc>>,
    ) -> Self {
        Self::new(
            signing.public_key.clone(),
            encryption.public_key.clone(),
            expiration_timestamp,
        )
    }

    /// Whether the keys are still valid at `now`.
    ///
    /// Valid means no expiration, or an expiration strictly after `now`.
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.expiration_timestamp
            .map_or(true, |expiration| expiration > now)
    }

    /// Serialize to the JSON wire form.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
