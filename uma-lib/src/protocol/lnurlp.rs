//! Discovery (LNURL-pay) request and response.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::KycStatus;
use crate::signing::Signable;
use crate::Result;

/// LNURL tag carried by every discovery response.
pub const PAY_REQUEST_TAG: &str = "payRequest";

/// Discovery query sent by the sending VASP, encoded as a URL.
///
/// See [`crate::uri::encode_lnurlp_request`] for the wire form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LnurlpRequest {
    /// Address being paid, `<identifier>@<host>`.
    pub receiver_address: String,
    /// Decimal string of a random `u32`.
    pub nonce: String,
    /// Hex signature over [`Signable::signable_payload`].
    pub signature: String,
    /// Whether the sending VASP is subject to the travel rule.
    pub is_subject_to_travel_rule: bool,
    /// Domain of the sending VASP, used to fetch its public keys.
    pub vasp_domain: String,
    /// Signing time, second precision on the wire.
    pub timestamp: DateTime<Utc>,
    /// Protocol version the sender speaks.
    pub uma_version: String,
}

impl LnurlpRequest {
    /// Encode this request as a discovery URL.
    pub fn encode_to_url(&self) -> Result<String> {
        crate::uri::encode_lnurlp_request(self)
    }
}

impl Signable for LnurlpRequest {
    fn signable_payload(&self) -> Vec<u8> {
        format!(
            "{}|{}|{}",
            self.receiver_address,
            self.nonce,
            self.timestamp.timestamp()
        )
        .into_bytes()
    }
}

/// The receiving VASP's answer to a discovery query.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LnurlpResponse {
    /// Always [`PAY_REQUEST_TAG`].
    pub tag: String,
    /// URL the sender posts its [`crate::protocol::PayRequest`] to.
    pub callback: String,
    /// Smallest payable amount in millisatoshis.
    pub min_sendable: u64,
    /// Largest payable amount in millisatoshis.
    pub max_sendable: u64,
    /// LNURL metadata JSON string.
    pub encoded_metadata: String,
    /// Currencies the receiver can be paid in.
    pub currencies: Vec<Currency>,
    /// Payer fields the receiver asks for.
    pub required_payer_data: PayerDataOptions,
    /// Signed receiver compliance block.
    pub compliance: LnurlComplianceResponse,
    /// Negotiated protocol version.
    pub uma_version: String,
}

impl LnurlpResponse {
    /// Serialize to the JSON wire form.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl Signable for LnurlpResponse {
    fn signable_payload(&self) -> Vec<u8> {
        self.compliance.signable_payload()
    }
}

/// Receiver-side compliance data in a discovery response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LnurlComplianceResponse {
    /// KYC status of the receiving user.
    pub kyc_status: KycStatus,
    /// Hex signature over `receiver_identifier|signature_nonce|signature_timestamp`.
    pub signature: String,
    /// Decimal string of a random `u32`.
    pub signature_nonce: String,
    /// Unix seconds at signing time.
    pub signature_timestamp: i64,
    /// Whether the receiving VASP is subject to the travel rule.
    pub is_subject_to_travel_rule: bool,
    /// UMA address of the receiver.
    pub receiver_identifier: String,
}

impl Signable for LnurlComplianceResponse {
    fn signable_payload(&self) -> Vec<u8> {
        format!(
            "{}|{}|{}",
            self.receiver_identifier, self.signature_nonce, self.signature_timestamp
        )
        .into_bytes()
    }
}

/// A currency the receiver accepts.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Currency {
    /// ISO 4217 style code, e.g. `USD`.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Display symbol.
    pub symbol: String,
    /// Millisatoshis per smallest unit of this currency.
    #[serde(rename = "multiplier")]
    pub millisatoshi_per_unit: f64,
    /// Smallest payable amount, in this currency's smallest unit.
    pub min_sendable: u64,
    /// Largest payable amount, in this currency's smallest unit.
    pub max_sendable: u64,
}

/// Which payer fields the receiver requires. `identifier` is always mandatory.
///
/// Travels as `{"identifier": {"mandatory": true}, "name": {"mandatory": bool}, ...}`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "PayerDataOptionsWire", into = "PayerDataOptionsWire")]
pub struct PayerDataOptions {
    /// Payer name is required.
    pub name_required: bool,
    /// Payer email is required.
    pub email_required: bool,
    /// Compliance data is required.
    pub compliance_required: bool,
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
struct PayerDataField {
    mandatory: bool,
}

impl PayerDataField {
    fn mandatory(mandatory: bool) -> Self {
        Self { mandatory }
    }
}

#[derive(Serialize, Deserialize)]
struct PayerDataOptionsWire {
    #[serde(default)]
    identifier: PayerDataField,
    #[serde(default)]
    name: PayerDataField,
    #[serde(default)]
    email: PayerDataField,
    #[serde(default)]
    compliance: PayerDataField,
}

impl From<PayerDataOptionsWire> for PayerDataOptions {
    fn from(wire: PayerDataOptionsWire) -> Self {
        Self {
            name_required: wire.name.mandatory,
            email_required: wire.email.mandatory,
            compliance_required: wire.compliance.mandatory,
        }
    }
}

impl From<PayerDataOptions> for PayerDataOptionsWire {
    fn from(options: PayerDataOptions) -> Self {
        Self {
            identifier: PayerDataField::mandatory(true),
            name: PayerDataField::mandatory(options.name_required),
            email: PayerDataField::mandatory(options.email_required),
            compliance: PayerDataField::mandatory(options.compliance_required),
        }
    }
}
