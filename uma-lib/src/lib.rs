//! UMA (Universal Money Address) exchange library.
//!
//! This crate implements the VASP-to-VASP side of UMA: building, signing,
//! parsing and verifying the discovery and payment messages two VASPs
//! exchange, negotiating the protocol version, and caching counterparty
//! public keys. It performs no I/O of its own; HTTP and invoice creation are
//! injected through the [`HttpTransport`] and [`InvoiceCreator`] traits.
//!
//! # Exchange
//!
//! 1. Sender: [`build_signed_lnurlp_request`] produces a discovery URL.
//! 2. Receiver: [`parse_lnurlp_request`], [`fetch_public_key`] for the
//!    sender's domain, [`verify_lnurlp_request_signature`], then
//!    [`build_lnurlp_response`].
//! 3. Sender: [`parse_lnurlp_response`], [`verify_lnurlp_response_signature`],
//!    then [`build_pay_request`] with the receiver's encryption key.
//! 4. Receiver: [`parse_pay_request`], [`verify_pay_request_signature`],
//!    then [`build_pay_req_response`] to hand back an invoice.
//!
//! # Features
//!
//! - `tracing`: spans on the exchange functions (key material is never recorded)
//! - `http-executor`: `reqwest` transport and an LND invoice creator
//! - `test-utils`: mocks and fixtures for downstream tests
//!
//! # Example
//!
//! ```
//! use uma_lib::keys::UmaKeyPair;
//! use uma_lib::protocol::PubkeyResponse;
//! use uma_lib::{build_signed_lnurlp_request, parse_lnurlp_request, verify_lnurlp_request_signature};
//!
//! let sender = UmaKeyPair::generate()?;
//! let url = build_signed_lnurlp_request("$alice@vasp1.com", &sender.private_key, true, "vasp2.com")?;
//!
//! let request = parse_lnurlp_request(&url)?;
//! let sender_keys = PubkeyResponse::from_keys(&sender, &sender, None);
//! verify_lnurlp_request_signature(&request, &sender_keys)?;
//! assert_eq!(request.vasp_domain, "vasp2.com");
//! # Ok::<(), uma_lib::UmaError>(())
//! ```

use chrono::{SubsecRound, Utc};
use serde::de::DeserializeOwned;

pub mod compliance;
pub mod config;
pub mod encryption;
pub mod errors;
pub mod executors;
pub mod invoice;
pub mod keys;
pub mod prelude;
pub mod protocol;
pub mod public_key_cache;
pub mod signing;
pub mod transport;
pub mod uri;
pub mod version;

/// Test utilities for exchange testing.
///
/// This module is only available with the `test-utils` feature or in test builds.
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use encryption::{decrypt_travel_rule_info, encrypt_travel_rule_info};
pub use errors::{UmaError, UmaErrorCode};
pub use invoice::InvoiceCreator;
pub use public_key_cache::{InMemoryPublicKeyCache, PublicKeyCache};
pub use signing::generate_nonce;
pub use transport::HttpTransport;
pub use uri::is_uma_lnurlp_query;
pub use version::{MAJOR_VERSION, MINOR_VERSION, UMA_PROTOCOL_VERSION};

use compliance::{build_payer_compliance, build_receiver_compliance};
use protocol::{
    pubkey_url, Currency, KycStatus, LnurlpRequest, LnurlpResponse, PayReqResponse,
    PayReqResponseCompliance, PayReqResponsePaymentInfo, PayRequest, PayerData,
    PayerDataOptions, PubkeyResponse, PAY_REQUEST_TAG,
};
use signing::{sign_message, verify_message};
use version::select_lower_version;

/// Common result alias for UMA operations.
pub type Result<T> = std::result::Result<T, UmaError>;

/// Public keys of a counterparty VASP, from `cache` or its well-known endpoint.
///
/// A fresh fetch is stored in `cache` before returning.
///
/// # Errors
///
/// Returns [`UmaError::InvalidRequest`] naming the domain if the fetch fails
/// or the body is not a valid public key response.
#[cfg_attr(feature = "tracing", tracing::instrument(skip(cache, transport)))]
pub fn fetch_public_key<C, T>(vasp_domain: &str, cache: &C, transport: &T) -> Result<PubkeyResponse>
where
    C: PublicKeyCache + ?Sized,
    T: HttpTransport + ?Sized,
{
    if let Some(keys) = cache.fetch(vasp_domain) {
        #[cfg(feature = "tracing")]
        tracing::debug!("public key cache hit");
        return Ok(keys);
    }

    #[cfg(feature = "tracing")]
    tracing::debug!("public key cache miss, fetching");

    let body = transport.get(&pubkey_url(vasp_domain)).map_err(|err| {
        UmaError::invalid_request(format!(
            "unable to fetch public keys for {}: {}",
            vasp_domain, err
        ))
    })?;
    let keys = parse_pubkey_response(&body)?;
    cache.add(vasp_domain, keys.clone());
    Ok(keys)
}

/// Build and sign a discovery request, returning it as a URL.
///
/// # Errors
///
/// - [`UmaError::InvalidRequest`] if `receiver_address` is not `<identifier>@<host>`
/// - [`UmaError::InvalidKey`] if the signing key cannot be loaded
#[cfg_attr(feature = "tracing", tracing::instrument(skip(signing_private_key)))]
pub fn build_signed_lnurlp_request(
    receiver_address: &str,
    signing_private_key: &[u8],
    is_subject_to_travel_rule: bool,
    sender_vasp_domain: &str,
) -> Result<String> {
    let mut request = LnurlpRequest {
        receiver_address: receiver_address.to_string(),
        nonce: generate_nonce(),
        signature: String::new(),
        is_subject_to_travel_rule,
        vasp_domain: sender_vasp_domain.to_string(),
        timestamp: Utc::now().trunc_subsecs(0),
        uma_version: UMA_PROTOCOL_VERSION.to_string(),
    };
    request.signature = sign_message(&request, signing_private_key)?;
    request.encode_to_url()
}

/// Decode a discovery request URL.
///
/// See [`uri::decode_lnurlp_request`] for the failure modes.
pub fn parse_lnurlp_request(url: &str) -> Result<LnurlpRequest> {
    uri::decode_lnurlp_request(url)
}

/// Build the signed discovery response to `request`.
///
/// The response version is the lower of the request's version and ours.
///
/// # Errors
///
/// - [`UmaError::InvalidRequest`] if `min_sendable_msats > max_sendable_msats`
/// - [`UmaError::MalformedVersion`] if the request's version does not parse
/// - [`UmaError::InvalidKey`] if the signing key cannot be loaded
#[allow(clippy::too_many_arguments)]
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        skip(request, signing_private_key, encoded_metadata, currencies),
        fields(receiver = %request.receiver_address)
    )
)]
pub fn build_lnurlp_response(
    request: &LnurlpRequest,
    signing_private_key: &[u8],
    requires_travel_rule_info: bool,
    callback: &str,
    encoded_metadata: &str,
    min_sendable_msats: u64,
    max_sendable_msats: u64,
    required_payer_data: PayerDataOptions,
    currencies: Vec<Currency>,
    receiver_kyc_status: KycStatus,
) -> Result<LnurlpResponse> {
    if min_sendable_msats > max_sendable_msats {
        return Err(UmaError::invalid_request(format!(
            "min sendable {} exceeds max sendable {}",
            min_sendable_msats, max_sendable_msats
        )));
    }

    let uma_version = select_lower_version(&request.uma_version, UMA_PROTOCOL_VERSION)?;
    let compliance = build_receiver_compliance(
        request,
        signing_private_key,
        requires_travel_rule_info,
        receiver_kyc_status,
    )?;

    Ok(LnurlpResponse {
        tag: PAY_REQUEST_TAG.to_string(),
        callback: callback.to_string(),
        min_sendable: min_sendable_msats,
        max_sendable: max_sendable_msats,
        encoded_metadata: encoded_metadata.to_string(),
        currencies,
        required_payer_data,
        compliance,
        uma_version,
    })
}

/// Build a signed pay request.
///
/// `travel_rule_info`, when present, is encrypted to the receiver's
/// `receiver_encryption_pubkey`.
#[allow(clippy::too_many_arguments)]
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(skip(
        receiver_encryption_pubkey,
        sending_vasp_private_key,
        payer_name,
        payer_email,
        travel_rule_info,
        payer_utxos,
        payer_node_pubkey
    ))
)]
pub fn build_pay_request(
    receiver_encryption_pubkey: &[u8],
    sending_vasp_private_key: &[u8],
    currency_code: &str,
    amount: u64,
    payer_identifier: &str,
    payer_name: Option<&str>,
    payer_email: Option<&str>,
    travel_rule_info: Option<&str>,
    payer_kyc_status: KycStatus,
    payer_utxos: Vec<String>,
    payer_node_pubkey: Option<String>,
    utxo_callback: &str,
) -> Result<PayRequest> {
    let compliance = build_payer_compliance(
        receiver_encryption_pubkey,
        sending_vasp_private_key,
        payer_identifier,
        travel_rule_info,
        payer_kyc_status,
        payer_utxos,
        payer_node_pubkey,
        utxo_callback,
    )?;

    Ok(PayRequest {
        currency_code: currency_code.to_string(),
        amount,
        payer_data: PayerData {
            identifier: payer_identifier.to_string(),
            name: payer_name.map(str::to_string),
            email: payer_email.map(str::to_string),
            compliance: Some(compliance),
        },
    })
}

/// Build the pay response to `request`, creating its invoice.
///
/// The invoice amount is `amount * msats_per_currency_unit + receiver_fees_msats`,
/// and its metadata is `metadata` followed by the request's payer data JSON.
///
/// # Errors
///
/// Returns [`UmaError::InvalidRequest`] if the amount overflows or the
/// invoice creator fails.
#[allow(clippy::too_many_arguments)]
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(skip(request, invoice_creator, metadata, receiver_utxos))
)]
pub fn build_pay_req_response<I>(
    request: &PayRequest,
    invoice_creator: &I,
    metadata: &str,
    currency_code: &str,
    msats_per_currency_unit: u64,
    receiver_fees_msats: u64,
    receiver_utxos: Vec<String>,
    receiver_node_pubkey: Option<String>,
    utxo_callback: &str,
) -> Result<PayReqResponse>
where
    I: InvoiceCreator + ?Sized,
{
    let amount_msats = request
        .amount
        .checked_mul(msats_per_currency_unit)
        .and_then(|msats| msats.checked_add(receiver_fees_msats))
        .ok_or_else(|| UmaError::invalid_request("invoice amount overflows u64 millisatoshis"))?;

    let payer_data = serde_json::to_string(&request.payer_data)?;
    let invoice_metadata = format!("{}{}", metadata, payer_data);

    let encoded_invoice = invoice_creator
        .create_uma_invoice(amount_msats, &invoice_metadata)
        .map_err(|err| UmaError::invalid_request(format!("invoice creation failed: {}", err)))?;

    Ok(PayReqResponse {
        encoded_invoice,
        routes: Vec::new(),
        compliance: PayReqResponseCompliance {
            utxos: receiver_utxos,
            utxo_callback: utxo_callback.to_string(),
            node_pubkey: receiver_node_pubkey,
        },
        payment_info: PayReqResponsePaymentInfo {
            currency_code: currency_code.to_string(),
            multiplier: msats_per_currency_unit as f64,
            exchange_fees_msats: receiver_fees_msats,
        },
    })
}

/// Verify a discovery request against the sending VASP's keys.
pub fn verify_lnurlp_request_signature(
    request: &LnurlpRequest,
    sender_keys: &PubkeyResponse,
) -> Result<()> {
    verify_message(request, &request.signature, &sender_keys.signing_pubkey)
}

/// Verify a discovery response against the receiving VASP's keys.
pub fn verify_lnurlp_response_signature(
    response: &LnurlpResponse,
    receiver_keys: &PubkeyResponse,
) -> Result<()> {
    verify_message(
        response,
        &response.compliance.signature,
        &receiver_keys.signing_pubkey,
    )
}

/// Verify a pay request against the sending VASP's keys.
///
/// A request without compliance data carries no signature and verifies trivially.
pub fn verify_pay_request_signature(
    request: &PayRequest,
    sender_keys: &PubkeyResponse,
) -> Result<()> {
    match &request.payer_data.compliance {
        Some(compliance) => {
            verify_message(request, &compliance.signature, &sender_keys.signing_pubkey)
        }
        None => Ok(()),
    }
}

fn parse_json<T: DeserializeOwned>(kind: &str, json: &str) -> Result<T> {
    serde_json::from_str(json)
        .map_err(|e| UmaError::invalid_request(format!("invalid {}: {}", kind, e)))
}

/// Parse a discovery response body.
pub fn parse_lnurlp_response(json: &str) -> Result<LnurlpResponse> {
    parse_json("discovery response", json)
}

/// Parse a pay request body.
pub fn parse_pay_request(json: &str) -> Result<PayRequest> {
    parse_json("pay request", json)
}

/// Parse a pay response body.
pub fn parse_pay_req_response(json: &str) -> Result<PayReqResponse> {
    parse_json("pay response", json)
}

/// Parse a `/.well-known/lnurlpubkey` body.
pub fn parse_pubkey_response(json: &str) -> Result<PubkeyResponse> {
    parse_json("public key response", json)
}
