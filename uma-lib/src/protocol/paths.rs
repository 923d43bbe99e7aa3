//! Canonical URL builders and UMA address helpers.
//!
//! Every VASP must produce byte-identical URLs for the same inputs, so all
//! path construction goes through these functions.

use crate::{Result, UmaError};

/// Path prefix for discovery (LNURL-pay) queries.
pub const LNURLP_WELL_KNOWN_PATH: &str = "/.well-known/lnurlp";

/// Path a VASP serves its public keys from.
pub const PUBKEY_WELL_KNOWN_PATH: &str = "/.well-known/lnurlpubkey";

/// Whether `domain` names a local development host (`localhost:<port>`).
pub fn is_domain_localhost(domain: &str) -> bool {
    domain.starts_with("localhost:")
}

/// URL scheme for a domain: `http` for local development hosts, otherwise `https`.
pub fn url_scheme(domain: &str) -> &'static str {
    if is_domain_localhost(domain) {
        "http"
    } else {
        "https"
    }
}

/// Build the discovery URL (without query) for `identifier` at `host`.
///
/// The identifier is percent-encoded as a path segment; `$` and `+` stay literal.
///
/// ```
/// use uma_lib::protocol::lnurlp_url;
///
/// assert_eq!(lnurlp_url("vasp1.com", "$alice"), "https://vasp1.com/.well-known/lnurlp/$alice");
/// assert_eq!(lnurlp_url("localhost:8080", "bob"), "http://localhost:8080/.well-known/lnurlp/bob");
/// assert_eq!(lnurlp_url("vasp1.com", "$a%b c"), "https://vasp1.com/.well-known/lnurlp/$a%25b%20c");
/// ```
pub fn lnurlp_url(host: &str, identifier: &str) -> String {
    format!(
        "{}://{}{}/{}",
        url_scheme(host),
        host,
        LNURLP_WELL_KNOWN_PATH,
        encode_path_segment(identifier)
    )
}

/// Percent-encode everything outside RFC 3986 `pchar` (minus `@`).
fn encode_path_segment(segment: &str) -> String {
    let mut encoded = String::with_capacity(segment.len());
    let mut buf = [0u8; 4];
    for ch in segment.chars() {
        if ch.is_ascii_alphanumeric() || "-._~!$'()*+,;=:".contains(ch) {
            encoded.push(ch);
        } else {
            encoded.push_str(&urlencoding::encode(ch.encode_utf8(&mut buf)));
        }
    }
    encoded
}

/// Build the public key endpoint URL for a VASP domain.
pub fn pubkey_url(vasp_domain: &str) -> String {
    format!(
        "{}://{}{}",
        url_scheme(vasp_domain),
        vasp_domain,
        PUBKEY_WELL_KNOWN_PATH
    )
}

/// Split a UMA address `<identifier>@<host>` into its two halves.
///
/// # Errors
///
/// Returns [`UmaError::InvalidRequest`] unless the address contains exactly
/// one `@` with something on both sides.
pub fn split_uma_address(address: &str) -> Result<(&str, &str)> {
    let mut parts = address.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(identifier), Some(host), None) if !identifier.is_empty() && !host.is_empty() => {
            Ok((identifier, host))
        }
        _ => Err(UmaError::invalid_request(format!(
            "invalid receiver address {}",
            address
        ))),
    }
}

/// The VASP domain hosting a UMA address.
pub fn vasp_domain_from_uma_address(address: &str) -> Result<String> {
    split_uma_address(address).map(|(_, host)| host.to_string())
}
