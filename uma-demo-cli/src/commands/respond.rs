//! Respond command - answer a discovery request as the receiving VASP

use anyhow::{Context, Result};
use uma_lib::config::VaspConfig;
use uma_lib::protocol::{split_uma_address, Currency, KycStatus, PayerDataOptions};

use crate::ui;

/// Millisatoshis per US cent used for the demo currency.
const DEMO_MSATS_PER_CENT: f64 = 34_150.0;

pub fn run(
    url: &str,
    vasp_domain: &str,
    signing_key_hex: &str,
    kyc_status: &str,
    verbose: bool,
) -> Result<()> {
    let signing_key = super::decode_hex_key("signing key", signing_key_hex)?;
    let config = VaspConfig::new(vasp_domain);
    config.validate().context("Invalid VASP configuration")?;

    let request = match uma_lib::parse_lnurlp_request(url) {
        Ok(request) => request,
        Err(err) => {
            if let Some(body) = err.unsupported_version_body() {
                ui::warning("Counterparty speaks an unsupported version; a server would answer 412 with:");
                println!("{}", body.to_json()?);
            }
            return Err(anyhow::Error::new(err).context("Failed to parse discovery request"));
        }
    };

    let (identifier, _) = split_uma_address(&request.receiver_address)?;
    let metadata = encoded_metadata(identifier, vasp_domain)?;
    let payer_data = PayerDataOptions {
        name_required: false,
        email_required: false,
        compliance_required: true,
    };

    let response = uma_lib::build_lnurlp_response(
        &request,
        &signing_key,
        config.is_subject_to_travel_rule,
        &config.callback_url(identifier),
        &metadata,
        config.min_sendable_msats,
        config.max_sendable_msats,
        payer_data,
        vec![demo_currency(&config)],
        KycStatus::from(kyc_status),
    )
    .context("Failed to build discovery response")?;

    if verbose {
        ui::header("Discovery Response");
        ui::key_value("Negotiated version", &response.uma_version);
        ui::key_value("Callback", &response.callback);
        ui::separator();
    }

    println!("{}", response.to_json()?);
    Ok(())
}

fn encoded_metadata(identifier: &str, vasp_domain: &str) -> Result<String> {
    let metadata = serde_json::json!([
        ["text/plain", format!("Pay to {}", identifier)],
        ["text/identifier", format!("{}@{}", identifier, vasp_domain)],
    ]);
    Ok(serde_json::to_string(&metadata)?)
}

fn demo_currency(config: &VaspConfig) -> Currency {
    let to_cents = |msats: u64| (msats as f64 / DEMO_MSATS_PER_CENT) as u64;
    let max_sendable = to_cents(config.max_sendable_msats);
    Currency {
        code: "USD".to_string(),
        name: "US Dollar".to_string(),
        symbol: "$".to_string(),
        millisatoshi_per_unit: DEMO_MSATS_PER_CENT,
        min_sendable: to_cents(config.min_sendable_msats).max(1).min(max_sendable),
        max_sendable,
    }
}
