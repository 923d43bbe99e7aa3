//! CLI command implementations

pub mod inspect;
pub mod keygen;
pub mod negotiate;
pub mod request;
pub mod respond;
pub mod travel_rule;

use anyhow::{Context, Result};

/// Decode a hex key argument.
pub fn decode_hex_key(label: &str, value: &str) -> Result<Vec<u8>> {
    hex::decode(value.trim()).with_context(|| format!("{} is not valid hex", label))
}
