//! Compliance payload assembly.
//!
//! Both sides of an exchange attach a signed compliance block: the sender in
//! its [`PayRequest`](crate::protocol::PayRequest) payer data, the receiver
//! in its discovery response. Each block carries a fresh nonce and timestamp
//! that are bound into the signature.

use chrono::Utc;

use crate::encryption::encrypt_travel_rule_info;
use crate::protocol::{CompliancePayerData, KycStatus, LnurlComplianceResponse, LnurlpRequest};
use crate::signing::{generate_nonce, sign_message, Signable};
use crate::Result;

/// Build the sender's compliance block.
///
/// `travel_rule_info`, when present and non-empty, is encrypted to
/// `receiver_encryption_pubkey`. The signature covers
/// `payer_identifier|nonce|timestamp`.
///
/// # Errors
///
/// - [`UmaError::InvalidKey`](crate::UmaError::InvalidKey) if either key cannot be loaded
/// - [`UmaError::Encryption`](crate::UmaError::Encryption) if encryption fails
#[allow(clippy::too_many_arguments)]
pub fn build_payer_compliance(
    receiver_encryption_pubkey: &[u8],
    signing_private_key: &[u8],
    payer_identifier: &str,
    travel_rule_info: Option<&str>,
    kyc_status: KycStatus,
    utxos: Vec<String>,
    node_pubkey: Option<String>,
    utxo_callback: impl Into<String>,
) -> Result<CompliancePayerData> {
    let encrypted_travel_rule_info = match travel_rule_info {
        Some(info) if !info.is_empty() => {
            Some(encrypt_travel_rule_info(info, receiver_encryption_pubkey)?)
        }
        _ => None,
    };

    let signed = SignedFields::sign(payer_identifier, signing_private_key)?;

    Ok(CompliancePayerData {
        kyc_status,
        utxos,
        node_pubkey,
        encrypted_travel_rule_info,
        signature: signed.signature,
        signature_nonce: signed.nonce,
        signature_timestamp: signed.timestamp,
        utxo_callback: utxo_callback.into(),
    })
}

/// Build the receiver's compliance block for a discovery response.
///
/// The receiver identifier is the request's receiver address, and the
/// signature covers `receiver_address|nonce|timestamp`.
pub fn build_receiver_compliance(
    request: &LnurlpRequest,
    signing_private_key: &[u8],
    is_subject_to_travel_rule: bool,
    kyc_status: KycStatus,
) -> Result<LnurlComplianceResponse> {
    let signed = SignedFields::sign(&request.receiver_address, signing_private_key)?;

    Ok(LnurlComplianceResponse {
        kyc_status,
        signature: signed.signature,
        signature_nonce: signed.nonce,
        signature_timestamp: signed.timestamp,
        is_subject_to_travel_rule,
        receiver_identifier: request.receiver_address.clone(),
    })
}

/// `identifier|nonce|timestamp` with a fresh nonce and the current time.
struct SignedFields {
    nonce: String,
    timestamp: i64,
    signature: String,
}

struct IdentityPayload<'a> {
    identifier: &'a str,
    nonce: &'a str,
    timestamp: i64,
}

impl Signable for IdentityPayload<'_> {
    fn signable_payload(&self) -> Vec<u8> {
        format!("{}|{}|{}", self.identifier, self.nonce, self.timestamp).into_bytes()
    }
}

impl SignedFields {
    fn sign(identifier: &str, signing_private_key: &[u8]) -> Result<Self> {
        let nonce = generate_nonce();
        let timestamp = Utc::now().timestamp();
        let signature = sign_message(
            &IdentityPayload {
                identifier,
                nonce: &nonce,
                timestamp,
            },
            signing_private_key,
        )?;

        Ok(Self {
            nonce,
            timestamp,
            signature,
        })
    }
}
