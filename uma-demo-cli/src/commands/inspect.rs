//! Inspect command - decode a discovery request and check its signature

use anyhow::{Context, Result};
use uma_lib::protocol::{LnurlpRequest, PubkeyResponse};

use crate::ui;

pub fn run(url: &str, signing_pubkey_hex: Option<&str>, fetch: bool, _verbose: bool) -> Result<()> {
    if !uma_lib::is_uma_lnurlp_query(url) {
        ui::warning("URL is not a UMA discovery request");
    }

    let request = uma_lib::parse_lnurlp_request(url).context("Failed to parse discovery request")?;
    show_request(&request);

    let sender_keys = match (signing_pubkey_hex, fetch) {
        (Some(hex_key), _) => {
            let signing = super::decode_hex_key("signing public key", hex_key)?;
            Some(PubkeyResponse::new(signing, Vec::new(), None))
        }
        (None, true) => Some(fetch_sender_keys(&request.vasp_domain)?),
        (None, false) => None,
    };

    match sender_keys {
        Some(keys) => {
            uma_lib::verify_lnurlp_request_signature(&request, &keys)
                .context("Signature verification failed")?;
            ui::success("Signature is valid");
        }
        None => ui::info("Pass --signing-pubkey or --fetch to verify the signature"),
    }

    Ok(())
}

fn show_request(request: &LnurlpRequest) {
    ui::header("Discovery Request");
    ui::key_value("Receiver", &request.receiver_address);
    ui::key_value("Sender VASP", &request.vasp_domain);
    ui::key_value("UMA version", &request.uma_version);
    ui::key_value("Nonce", &request.nonce);
    ui::key_value("Timestamp", &request.timestamp.to_rfc3339());
    ui::key_value(
        "Travel rule",
        &request.is_subject_to_travel_rule.to_string(),
    );
}

#[cfg(feature = "http-executor")]
fn fetch_sender_keys(vasp_domain: &str) -> Result<PubkeyResponse> {
    use uma_lib::executors::HttpConfig;
    use uma_lib::transport::ReqwestTransport;
    use uma_lib::InMemoryPublicKeyCache;

    tracing::info!(vasp_domain, "fetching public keys");
    let transport = ReqwestTransport::new(&HttpConfig::default())?;
    let cache = InMemoryPublicKeyCache::new();
    Ok(uma_lib::fetch_public_key(vasp_domain, &cache, &transport)?)
}

#[cfg(not(feature = "http-executor"))]
fn fetch_sender_keys(_vasp_domain: &str) -> Result<PubkeyResponse> {
    anyhow::bail!("--fetch needs the http-executor feature")
}
