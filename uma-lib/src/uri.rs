//! Discovery request URL codec.
//!
//! A discovery request travels as a GET URL:
//!
//! ```text
//! https://{host}/.well-known/lnurlp/{identifier}
//!     ?signature=<hex>&vaspDomain=<domain>&nonce=<u32>
//!     &isSubjectToTravelRule=<true|false>&timestamp=<unix-seconds>&umaVersion=<major.minor>
//! ```
//!
//! # Examples
//!
//! ```rust
//! use uma_lib::uri::is_uma_lnurlp_query;
//!
//! assert!(!is_uma_lnurlp_query("https://vasp1.com/.well-known/lnurlp/$alice"));
//! ```

use chrono::DateTime;

use crate::protocol::{lnurlp_url, split_uma_address, LnurlpRequest};
use crate::version::{is_version_supported, supported_major_versions};
use crate::{Result, UmaError};

const SIGNATURE: &str = "signature";
const VASP_DOMAIN: &str = "vaspDomain";
const NONCE: &str = "nonce";
const IS_SUBJECT_TO_TRAVEL_RULE: &str = "isSubjectToTravelRule";
const TIMESTAMP: &str = "timestamp";
const UMA_VERSION: &str = "umaVersion";

/// Encode a discovery request as a URL.
///
/// # Errors
///
/// Returns [`UmaError::InvalidRequest`] if the receiver address does not
/// contain exactly one `@`.
pub fn encode_lnurlp_request(request: &LnurlpRequest) -> Result<String> {
    let (identifier, host) = split_uma_address(&request.receiver_address)?;

    let timestamp = request.timestamp.timestamp().to_string();
    let params = [
        (SIGNATURE, request.signature.as_str()),
        (VASP_DOMAIN, request.vasp_domain.as_str()),
        (NONCE, request.nonce.as_str()),
        (
            IS_SUBJECT_TO_TRAVEL_RULE,
            if request.is_subject_to_travel_rule {
                "true"
            } else {
                "false"
            },
        ),
        (TIMESTAMP, timestamp.as_str()),
        (UMA_VERSION, request.uma_version.as_str()),
    ];

    let query = params
        .iter()
        .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&");

    Ok(format!("{}?{}", lnurlp_url(host, identifier), query))
}

/// Decode a discovery request URL.
///
/// # Errors
///
/// - [`UmaError::InvalidRequest`] if the URL is malformed, a required query
///   parameter is missing or blank, or the path is not
///   `/.well-known/lnurlp/<identifier>`
/// - [`UmaError::UnsupportedVersion`] if `umaVersion` has no supported major
pub fn decode_lnurlp_request(url: &str) -> Result<LnurlpRequest> {
    let parsed = ParsedUrl::parse(url)?;

    let signature = parsed.required(SIGNATURE)?;
    let vasp_domain = parsed.required(VASP_DOMAIN)?;
    let nonce = parsed.required(NONCE)?;
    let timestamp = parsed.required(TIMESTAMP)?;
    let uma_version = parsed.required(UMA_VERSION)?;

    let identifier = lnurlp_identifier(parsed.path)?;

    if !is_version_supported(&uma_version) {
        return Err(UmaError::unsupported_version(
            uma_version,
            supported_major_versions(),
        ));
    }

    let timestamp = timestamp
        .parse::<i64>()
        .ok()
        .and_then(|seconds| DateTime::from_timestamp(seconds, 0))
        .ok_or_else(|| UmaError::invalid_request(format!("invalid timestamp {}", timestamp)))?;

    let is_subject_to_travel_rule = parsed
        .param(IS_SUBJECT_TO_TRAVEL_RULE)
        .is_some_and(|value| value.eq_ignore_ascii_case("true"));

    Ok(LnurlpRequest {
        receiver_address: format!("{}@{}", identifier, parsed.host),
        nonce,
        signature,
        is_subject_to_travel_rule,
        vasp_domain,
        timestamp,
        uma_version,
    })
}

/// Whether `url` is a well-formed UMA discovery query.
///
/// Never fails: any decode error is reported as `false`.
pub fn is_uma_lnurlp_query(url: &str) -> bool {
    decode_lnurlp_request(url).is_ok()
}

/// The `<identifier>` of a `/.well-known/lnurlp/<identifier>` path.
fn lnurlp_identifier(path: &str) -> Result<String> {
    let segments: Vec<&str> = path.split('/').collect();
    match segments.as_slice() {
        ["", ".well-known", "lnurlp", identifier] if !identifier.is_empty() => {
            // Path segments are plain percent-encoding: `+` is literal here.
            urlencoding::decode(identifier)
                .map(|decoded| decoded.into_owned())
                .map_err(|_| {
                    UmaError::invalid_request(format!("invalid percent encoding {}", identifier))
                })
        }
        _ => Err(UmaError::invalid_request(format!(
            "invalid discovery path {}",
            path
        ))),
    }
}

/// The pieces of an absolute URL that discovery decoding needs.
struct ParsedUrl<'a> {
    host: &'a str,
    path: &'a str,
    query: Vec<(String, String)>,
}

impl<'a> ParsedUrl<'a> {
    fn parse(url: &'a str) -> Result<Self> {
        let invalid = || UmaError::invalid_request(format!("invalid URL {}", url));

        let (scheme, rest) = url.split_once("://").ok_or_else(invalid)?;
        if scheme.is_empty() {
            return Err(invalid());
        }

        // Fragments never reach the server.
        let rest = rest.split('#').next().unwrap_or(rest);
        let (location, query) = rest.split_once('?').unwrap_or((rest, ""));
        let (host, path) = match location.find('/') {
            Some(index) => location.split_at(index),
            None => (location, ""),
        };
        if host.is_empty() {
            return Err(invalid());
        }

        let mut pairs = Vec::new();
        for param in query.split('&').filter(|param| !param.is_empty()) {
            let (key, value) = param.split_once('=').unwrap_or((param, ""));
            pairs.push((url_decode(key)?, url_decode(value)?));
        }

        Ok(Self {
            host,
            path,
            query: pairs,
        })
    }

    /// First value for `key`.
    fn param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }

    fn required(&self, key: &str) -> Result<String> {
        match self.param(key) {
            Some(value) if !value.trim().is_empty() => Ok(value.to_string()),
            _ => Err(UmaError::invalid_request(format!(
                "missing required query parameter {}",
                key
            ))),
        }
    }
}

/// Query-string decoding: percent escapes, with `+` as space.
fn url_decode(encoded: &str) -> Result<String> {
    let spaced = encoded.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|decoded| decoded.into_owned())
        .map_err(|_| UmaError::invalid_request(format!("invalid percent encoding {}", encoded)))
}
