//! Request command - build a signed discovery request URL

use anyhow::{Context, Result};

use crate::ui;

pub fn run(
    receiver: &str,
    vasp_domain: &str,
    signing_key_hex: &str,
    travel_rule: bool,
    qr: bool,
    verbose: bool,
) -> Result<()> {
    let signing_key = super::decode_hex_key("signing key", signing_key_hex)?;

    tracing::debug!(receiver, vasp_domain, "building discovery request");
    let url = uma_lib::build_signed_lnurlp_request(receiver, &signing_key, travel_rule, vasp_domain)
        .context("Failed to build discovery request")?;

    if verbose {
        ui::header("Discovery Request");
        ui::key_value("Receiver", receiver);
        ui::key_value("Sender VASP", vasp_domain);
        ui::key_value("Travel rule", &travel_rule.to_string());
        ui::separator();
    }

    // Bare URL on stdout so it can be piped into `inspect` or `respond`.
    println!("{}", url);

    if qr {
        ui::qr_code(&url)?;
    }

    Ok(())
}
