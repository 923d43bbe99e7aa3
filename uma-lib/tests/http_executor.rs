//! Integration tests for the HTTP-backed collaborators.
//!
//! The blocking clients run on `spawn_blocking` against a wiremock server.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p uma-lib --features http-executor --test http_executor
//! ```

#![cfg(feature = "http-executor")]

use sha2::{Digest, Sha256};
use uma_lib::executors::{HttpConfig, LndConfig, LndInvoiceCreator};
use uma_lib::protocol::PubkeyResponse;
use uma_lib::transport::ReqwestTransport;
use uma_lib::{fetch_public_key, HttpTransport, InMemoryPublicKeyCache, InvoiceCreator, UmaError};
use wiremock::{
    matchers::{body_json, header, method, path},
    Mock, MockServer, ResponseTemplate,
};

// ============================================================================
// Public key transport
// ============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn test_fetch_public_key_over_http() {
    let mock_server = MockServer::start().await;
    let keys = PubkeyResponse::new(vec![0x30, 0x56], vec![0x30, 0x57], None);

    Mock::given(method("GET"))
        .and(path("/.well-known/lnurlpubkey"))
        .respond_with(ResponseTemplate::new(200).set_body_string(keys.to_json().unwrap()))
        .expect(1)
        .mount(&mock_server)
        .await;

    // wiremock binds 127.0.0.1; address it as localhost so the plain-http scheme is used.
    let domain = mock_server.uri().replace("http://127.0.0.1", "localhost");
    let expected = keys.clone();

    tokio::task::spawn_blocking(move || {
        let transport = ReqwestTransport::new(&HttpConfig::default()).unwrap();
        let cache = InMemoryPublicKeyCache::new();
        assert_eq!(fetch_public_key(&domain, &cache, &transport).unwrap(), expected);
        assert_eq!(fetch_public_key(&domain, &cache, &transport).unwrap(), expected);
    })
    .await
    .unwrap();
}

#[tokio::test(flavor = "multi_thread")]
async fn test_http_error_status_is_invalid_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let url = format!("{}/.well-known/lnurlpubkey", mock_server.uri());
    let result = tokio::task::spawn_blocking(move || {
        ReqwestTransport::new(&HttpConfig::default().with_timeout(5))
            .unwrap()
            .get(&url)
    })
    .await
    .unwrap();

    assert!(matches!(result, Err(UmaError::InvalidRequest(msg)) if msg.contains("404")));
}

// ============================================================================
// LND invoice creator
// ============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn test_lnd_create_invoice_mock() {
    use base64::Engine;

    let mock_server = MockServer::start().await;
    let metadata = r#"[["text/plain","Pay $alice"]]{"identifier":"$bob@vasp2.com"}"#;
    let description_hash =
        base64::engine::general_purpose::STANDARD.encode(Sha256::digest(metadata.as_bytes()));

    Mock::given(method("POST"))
        .and(path("/v1/invoices"))
        .and(header("Grpc-Metadata-macaroon", "test_macaroon"))
        .and(body_json(serde_json::json!({
            "value_msat": "34160000",
            "description_hash": description_hash,
            "expiry": "600"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "r_hash": "abc",
            "payment_request": "lnbcrt341600n1mock",
            "add_index": "1"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = LndConfig::new(mock_server.uri(), "test_macaroon");
    let invoice = tokio::task::spawn_blocking(move || {
        LndInvoiceCreator::new(config)
            .unwrap()
            .create_uma_invoice(34_160_000, metadata)
    })
    .await
    .unwrap()
    .unwrap();

    assert_eq!(invoice, "lnbcrt341600n1mock");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_lnd_error_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/invoices"))
        .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
            "code": 2,
            "message": "invoice amount too large"
        })))
        .mount(&mock_server)
        .await;

    let config = LndConfig::new(mock_server.uri(), "test_macaroon");
    let result = tokio::task::spawn_blocking(move || {
        LndInvoiceCreator::new(config)
            .unwrap()
            .create_uma_invoice(1, "")
    })
    .await
    .unwrap();

    assert!(matches!(result, Err(UmaError::InvalidRequest(msg)) if msg.contains("too large")));
}
