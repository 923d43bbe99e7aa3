//! Negotiate command - pick a protocol version to talk to a counterparty

use anyhow::{Context, Result};
use uma_lib::errors::supported_major_versions_from_error_body;
use uma_lib::version::{
    is_version_supported, parse_version, select_highest_supported_version, select_lower_version,
    supported_major_versions, UMA_PROTOCOL_VERSION,
};

use crate::ui;

pub fn run(version: Option<&str>, error_body: Option<&str>, _verbose: bool) -> Result<()> {
    ui::header("Version Negotiation");
    ui::key_value("Our version", UMA_PROTOCOL_VERSION);
    ui::key_value("Supported majors", &format!("{:?}", supported_major_versions()));

    if let Some(body) = error_body {
        let majors = supported_major_versions_from_error_body(body)
            .context("Failed to read unsupported-version body")?;
        ui::key_value("Counterparty majors", &format!("{:?}", majors));
        return match select_highest_supported_version(&majors) {
            Some(picked) => {
                ui::success(&format!("Retry with version {}", picked));
                Ok(())
            }
            None => anyhow::bail!("No protocol version in common with the counterparty"),
        };
    }

    let Some(version) = version else {
        ui::info("Pass a counterparty version or --error-body to negotiate");
        return Ok(());
    };

    parse_version(version).context("Failed to parse counterparty version")?;
    if !is_version_supported(version) {
        anyhow::bail!("Version {} is not supported", version);
    }

    let agreed = select_lower_version(version, UMA_PROTOCOL_VERSION)?;
    ui::success(&format!("Agreed on version {}", agreed));
    Ok(())
}
