//! Keygen command - create signing and encryption keypairs

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use uma_lib::keys::UmaKeyPair;
use uma_lib::protocol::PubkeyResponse;

use crate::ui;

pub const SIGNING_KEY_FILE: &str = "signing.key";
pub const ENCRYPTION_KEY_FILE: &str = "encryption.key";
pub const PUBKEY_FILE: &str = "pubkeys.json";

pub fn run(output_dir: Option<&Path>, verbose: bool) -> Result<()> {
    let signing = UmaKeyPair::generate().context("Failed to generate signing key")?;
    let encryption = UmaKeyPair::generate().context("Failed to generate encryption key")?;
    let pubkeys = PubkeyResponse::from_keys(&signing, &encryption, None).to_json()?;

    ui::header("UMA Keys");
    ui::key_value("Signing public key", &signing.public_key_hex());
    ui::key_value("Encryption public key", &encryption.public_key_hex());

    match output_dir {
        Some(dir) => {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
            write_file(&dir.join(SIGNING_KEY_FILE), &signing.private_key_hex())?;
            write_file(&dir.join(ENCRYPTION_KEY_FILE), &encryption.private_key_hex())?;
            write_file(&dir.join(PUBKEY_FILE), &pubkeys)?;

            tracing::info!(dir = %dir.display(), "wrote key files");
            ui::success(&format!("Keys written to {}", dir.display()));
            ui::info(&format!(
                "Serve {} at /.well-known/lnurlpubkey",
                PUBKEY_FILE
            ));
        }
        None => {
            ui::warning("No --output-dir given; private keys are printed below");
            ui::key_value("Signing private key", &signing.private_key_hex());
            ui::key_value("Encryption private key", &encryption.private_key_hex());
        }
    }

    if verbose {
        ui::separator();
        ui::json(&serde_json::from_str(&pubkeys)?);
    }

    Ok(())
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).with_context(|| format!("Failed to write {}", path.display()))
}
