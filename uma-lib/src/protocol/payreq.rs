//! Pay request and pay response.

use serde::{Deserialize, Serialize};

use super::KycStatus;
use crate::signing::Signable;
use crate::Result;

/// Information about the payer, sent with a [`PayRequest`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayerData {
    /// UMA address of the payer. Always present.
    pub identifier: String,
    /// Payer name, when requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Payer email, when requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Signed sender compliance block.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compliance: Option<CompliancePayerData>,
}

/// Sender-side compliance data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompliancePayerData {
    /// KYC status of the payer.
    pub kyc_status: KycStatus,
    /// UTXOs of the channels the payment may use.
    pub utxos: Vec<String>,
    /// Public key of the sending node.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_pubkey: Option<String>,
    /// Hex ECIES ciphertext of the travel-rule text, readable only by the receiver.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encrypted_travel_rule_info: Option<String>,
    /// Hex signature over `identifier|signature_nonce|signature_timestamp`.
    pub signature: String,
    /// Decimal string of a random `u32`.
    pub signature_nonce: String,
    /// Unix seconds at signing time.
    pub signature_timestamp: i64,
    /// URL the receiver posts post-payment UTXO information to.
    pub utxo_callback: String,
}

/// Payment request sent to the receiver's callback.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayRequest {
    /// Currency the amount is denominated in.
    pub currency_code: String,
    /// Amount in the smallest unit of `currency_code`.
    pub amount: u64,
    /// Payer information.
    pub payer_data: PayerData,
}

impl PayRequest {
    /// Serialize to the JSON wire form.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl Signable for PayRequest {
    fn signable_payload(&self) -> Vec<u8> {
        match &self.payer_data.compliance {
            Some(compliance) => format!(
                "{}|{}|{}",
                self.payer_data.identifier,
                compliance.signature_nonce,
                compliance.signature_timestamp
            )
            .into_bytes(),
            None => self.payer_data.identifier.clone().into_bytes(),
        }
    }
}

/// Receiver's answer to a [`PayRequest`], wrapping the invoice to pay.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayReqResponse {
    /// Encoded Lightning payment request.
    pub encoded_invoice: String,
    /// Route hints; empty when none.
    pub routes: Vec<String>,
    /// Receiver compliance data.
    pub compliance: PayReqResponseCompliance,
    /// Conversion details for the requested currency.
    pub payment_info: PayReqResponsePaymentInfo,
}

impl PayReqResponse {
    /// Serialize to the JSON wire form.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Receiver compliance data attached to a pay response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayReqResponseCompliance {
    /// UTXOs of the receiving node's channels.
    pub utxos: Vec<String>,
    /// URL the sender posts post-payment UTXO information to.
    pub utxo_callback: String,
    /// Public key of the receiving node.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_pubkey: Option<String>,
}

/// How the receiver converted the requested amount.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayReqResponsePaymentInfo {
    /// Currency of the original request.
    pub currency_code: String,
    /// Millisatoshis per smallest currency unit used for conversion.
    pub multiplier: f64,
    /// Fees the receiving VASP added, in millisatoshis.
    pub exchange_fees_msats: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn compliance() -> CompliancePayerData {
        CompliancePayerData {
            kyc_status: KycStatus::Verified,
            utxos: vec!["abcd:0".to_string()],
            node_pubkey: Some("02ab".to_string()),
            encrypted_travel_rule_info: None,
            signature: "3044".to_string(),
            signature_nonce: "42".to_string(),
            signature_timestamp: 1_700_000_001,
            utxo_callback: "https://vasp2.com/utxo".to_string(),
        }
    }

    #[test]
    fn pay_request_wire_names() {
        let request = PayRequest {
            currency_code: "USD".to_string(),
            amount: 500,
            payer_data: PayerData {
                identifier: "$bob@vasp2.com".to_string(),
                name: None,
                email: Some("bob@vasp2.com".to_string()),
                compliance: Some(compliance()),
            },
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["currencyCode"], json!("USD"));
        assert_eq!(value["payerData"]["email"], json!("bob@vasp2.com"));
        assert!(value["payerData"].get("name").is_none());
        assert_eq!(value["payerData"]["compliance"]["signatureNonce"], json!("42"));
        assert_eq!(value["payerData"]["compliance"]["utxoCallback"], json!("https://vasp2.com/utxo"));
        assert!(value["payerData"]["compliance"].get("encryptedTravelRuleInfo").is_none());
    }

    #[test]
    fn signable_payload_with_and_without_compliance() {
        let mut request = PayRequest {
            currency_code: "SAT".to_string(),
            amount: 1,
            payer_data: PayerData {
                identifier: "$bob@vasp2.com".to_string(),
                name: None,
                email: None,
                compliance: None,
            },
        };
        assert_eq!(request.signable_payload(), b"$bob@vasp2.com".to_vec());

        request.payer_data.compliance = Some(compliance());
        assert_eq!(
            request.signable_payload(),
            b"$bob@vasp2.com|42|1700000001".to_vec()
        );
    }

    #[test]
    fn pay_response_wire_names() {
        let response = PayReqResponse {
            encoded_invoice: "lnbc1...".to_string(),
            routes: vec![],
            compliance: PayReqResponseCompliance {
                utxos: vec![],
                utxo_callback: "https://vasp1.com/utxo".to_string(),
                node_pubkey: None,
            },
            payment_info: PayReqResponsePaymentInfo {
                currency_code: "USD".to_string(),
                multiplier: 34_150.0,
                exchange_fees_msats: 2_000,
            },
        };
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["encodedInvoice"], json!("lnbc1..."));
        assert_eq!(value["paymentInfo"]["exchangeFeesMsats"], json!(2_000));
        assert_eq!(value["compliance"]["utxoCallback"], json!("https://vasp1.com/utxo"));
    }
}
