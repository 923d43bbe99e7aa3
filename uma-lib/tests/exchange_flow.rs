//! End-to-end sender/receiver exchange.
//!
//! Two VASPs run the full discovery and payment flow against each other
//! through in-process collaborators.

use std::collections::HashMap;
use std::sync::Mutex;

use uma_lib::keys::UmaKeyPair;
use uma_lib::protocol::{
    pubkey_url, Currency, KycStatus, PayerDataOptions, PubkeyResponse,
};
use uma_lib::{
    build_lnurlp_response, build_pay_req_response, build_pay_request,
    build_signed_lnurlp_request, decrypt_travel_rule_info, fetch_public_key,
    is_uma_lnurlp_query, parse_lnurlp_request, parse_lnurlp_response, parse_pay_req_response,
    parse_pay_request, verify_lnurlp_request_signature, verify_lnurlp_response_signature,
    verify_pay_request_signature, HttpTransport, InMemoryPublicKeyCache, InvoiceCreator,
    Result, UmaError, UMA_PROTOCOL_VERSION,
};

struct Vasp {
    domain: &'static str,
    signing: UmaKeyPair,
    encryption: UmaKeyPair,
}

impl Vasp {
    fn new(domain: &'static str) -> Self {
        Self {
            domain,
            signing: UmaKeyPair::generate().unwrap(),
            encryption: UmaKeyPair::generate().unwrap(),
        }
    }

    fn pubkeys(&self) -> PubkeyResponse {
        PubkeyResponse::from_keys(&self.signing, &self.encryption, None)
    }
}

/// Serves each VASP's public key document.
struct Directory {
    bodies: HashMap<String, String>,
    hits: Mutex<usize>,
}

impl Directory {
    fn new(vasps: &[&Vasp]) -> Self {
        let bodies = vasps
            .iter()
            .map(|vasp| (pubkey_url(vasp.domain), vasp.pubkeys().to_json().unwrap()))
            .collect();
        Self {
            bodies,
            hits: Mutex::new(0),
        }
    }

    fn hits(&self) -> usize {
        *self.hits.lock().unwrap()
    }
}

impl HttpTransport for Directory {
    fn get(&self, url: &str) -> Result<String> {
        *self.hits.lock().unwrap() += 1;
        self.bodies
            .get(url)
            .cloned()
            .ok_or_else(|| UmaError::invalid_request(format!("404 {url}")))
    }
}

struct FakeNode;

impl InvoiceCreator for FakeNode {
    fn create_uma_invoice(&self, amount_msats: u64, _metadata: &str) -> Result<String> {
        Ok(format!("lnbcrt{amount_msats}n1fake"))
    }
}

const METADATA: &str = r#"[["text/plain","Pay $alice"]]"#;

fn usd() -> Currency {
    Currency {
        code: "USD".to_string(),
        name: "US Dollar".to_string(),
        symbol: "$".to_string(),
        millisatoshi_per_unit: 34_150.0,
        min_sendable: 1,
        max_sendable: 10_000_000,
    }
}

#[test]
fn full_exchange() {
    let receiver = Vasp::new("vasp1.com");
    let sender = Vasp::new("vasp2.com");
    let directory = Directory::new(&[&receiver, &sender]);
    let receiver_cache = InMemoryPublicKeyCache::new();
    let sender_cache = InMemoryPublicKeyCache::new();

    // Sender: discovery
    let url = build_signed_lnurlp_request(
        "$alice@vasp1.com",
        &sender.signing.private_key,
        true,
        sender.domain,
    )
    .unwrap();
    assert!(is_uma_lnurlp_query(&url));

    // Receiver: verify and answer
    let request = parse_lnurlp_request(&url).unwrap();
    let sender_keys = fetch_public_key(&request.vasp_domain, &receiver_cache, &directory).unwrap();
    verify_lnurlp_request_signature(&request, &sender_keys).unwrap();

    let response = build_lnurlp_response(
        &request,
        &receiver.signing.private_key,
        true,
        "https://vasp1.com/api/uma/payreq/$alice",
        METADATA,
        1_000,
        10_000_000_000,
        PayerDataOptions {
            name_required: true,
            email_required: false,
            compliance_required: true,
        },
        vec![usd()],
        KycStatus::Verified,
    )
    .unwrap();
    let response_json = response.to_json().unwrap();

    // Sender: verify and pay
    let response = parse_lnurlp_response(&response_json).unwrap();
    assert_eq!(response.uma_version, UMA_PROTOCOL_VERSION);
    let receiver_keys = fetch_public_key(receiver.domain, &sender_cache, &directory).unwrap();
    verify_lnurlp_response_signature(&response, &receiver_keys).unwrap();

    let travel_rule = r#"{"originator":{"name":"Bob"}}"#;
    let pay_request = build_pay_request(
        &receiver_keys.encryption_pubkey,
        &sender.signing.private_key,
        "USD",
        1_000,
        "$bob@vasp2.com",
        Some("Bob"),
        None,
        Some(travel_rule),
        KycStatus::Verified,
        vec!["txid:0".to_string()],
        Some("02sendernode".to_string()),
        "https://vasp2.com/api/uma/utxos",
    )
    .unwrap();
    let pay_request_json = pay_request.to_json().unwrap();

    // Receiver: verify, read travel rule, invoice
    let pay_request = parse_pay_request(&pay_request_json).unwrap();
    let sender_keys = fetch_public_key(sender.domain, &receiver_cache, &directory).unwrap();
    verify_pay_request_signature(&pay_request, &sender_keys).unwrap();

    let compliance = pay_request.payer_data.compliance.as_ref().unwrap();
    let encrypted = compliance.encrypted_travel_rule_info.as_deref().unwrap();
    assert_eq!(
        decrypt_travel_rule_info(encrypted, &receiver.encryption.private_key).unwrap(),
        travel_rule
    );

    let pay_response = build_pay_req_response(
        &pay_request,
        &FakeNode,
        METADATA,
        "USD",
        34_150,
        10_000,
        vec!["txid:1".to_string()],
        None,
        "https://vasp1.com/api/uma/utxos",
    )
    .unwrap();
    let pay_response = parse_pay_req_response(&pay_response.to_json().unwrap()).unwrap();
    assert_eq!(
        pay_response.encoded_invoice,
        format!("lnbcrt{}n1fake", 1_000 * 34_150 + 10_000)
    );

    // Each side fetched each counterparty once; the second receiver lookup hit its cache.
    assert_eq!(directory.hits(), 2);
}

#[test]
fn discovery_request_end_to_end_scenario() {
    let sender = Vasp::new("vasp2.com");
    let stranger = Vasp::new("evil.com");

    let url = build_signed_lnurlp_request(
        "$alice@vasp1.com",
        &sender.signing.private_key,
        false,
        "vasp2.com",
    )
    .unwrap();
    let request = parse_lnurlp_request(&url).unwrap();

    assert_eq!(request.receiver_address, "$alice@vasp1.com");
    assert_eq!(request.vasp_domain, "vasp2.com");
    assert!(!request.is_subject_to_travel_rule);
    verify_lnurlp_request_signature(&request, &sender.pubkeys()).unwrap();
    assert_eq!(
        verify_lnurlp_request_signature(&request, &stranger.pubkeys()),
        Err(UmaError::InvalidSignature)
    );
}

#[test]
fn tampered_messages_fail_verification() {
    let sender = Vasp::new("vasp2.com");
    let url = build_signed_lnurlp_request(
        "$alice@vasp1.com",
        &sender.signing.private_key,
        false,
        "vasp2.com",
    )
    .unwrap();

    let mut request = parse_lnurlp_request(&url).unwrap();
    request.receiver_address = "$mallory@vasp1.com".to_string();
    assert_eq!(
        verify_lnurlp_request_signature(&request, &sender.pubkeys()),
        Err(UmaError::InvalidSignature)
    );

    let mut request = parse_lnurlp_request(&url).unwrap();
    let mut signature = hex::decode(&request.signature).unwrap();
    signature[10] ^= 0x01;
    request.signature = hex::encode(signature);
    assert_eq!(
        verify_lnurlp_request_signature(&request, &sender.pubkeys()),
        Err(UmaError::InvalidSignature)
    );
}

#[test]
fn unsupported_version_round_trips_through_error_body() {
    let sender = Vasp::new("vasp2.com");
    let url = build_signed_lnurlp_request(
        "$alice@vasp1.com",
        &sender.signing.private_key,
        false,
        "vasp2.com",
    )
    .unwrap()
    .replace(
        &format!("umaVersion={UMA_PROTOCOL_VERSION}"),
        "umaVersion=42.0",
    );

    let err = parse_lnurlp_request(&url).unwrap_err();
    assert!(err.is_retryable());
    let body = err.unsupported_version_body().unwrap().to_json().unwrap();

    let majors = uma_lib::errors::supported_major_versions_from_error_body(&body).unwrap();
    assert_eq!(
        uma_lib::version::select_highest_supported_version(&majors).as_deref(),
        Some(UMA_PROTOCOL_VERSION)
    );
}
