//! Encrypt and decrypt travel-rule information

use anyhow::{Context, Result};

pub fn encrypt(info: &str, pubkey_hex: &str) -> Result<()> {
    let pubkey = super::decode_hex_key("encryption public key", pubkey_hex)?;
    let ciphertext = uma_lib::encrypt_travel_rule_info(info, &pubkey)
        .context("Failed to encrypt travel-rule information")?;
    println!("{}", ciphertext);
    Ok(())
}

pub fn decrypt(ciphertext: &str, private_key_hex: &str) -> Result<()> {
    let private_key = super::decode_hex_key("encryption private key", private_key_hex)?;
    let info = uma_lib::decrypt_travel_rule_info(ciphertext.trim(), &private_key)
        .context("Failed to decrypt travel-rule information")?;
    println!("{}", info);
    Ok(())
}
