//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and traits for
//! quick setup. Import everything with:
//!
//! ```rust
//! use uma_lib::prelude::*;
//! ```
//!
//! ## What's Included
//!
//! - Exchange functions: building, parsing, and verifying every message
//! - Wire types: `LnurlpRequest`, `LnurlpResponse`, `PayRequest`, `PayReqResponse`, ...
//! - Error types: `UmaError`, `UmaErrorCode`, `Result`
//! - Collaborator traits: `HttpTransport`, `InvoiceCreator`, `PublicKeyCache`

// Exchange functions
pub use crate::{
    build_lnurlp_response, build_pay_req_response, build_pay_request,
    build_signed_lnurlp_request, fetch_public_key, is_uma_lnurlp_query, parse_lnurlp_request,
    parse_lnurlp_response, parse_pay_req_response, parse_pay_request, parse_pubkey_response,
    verify_lnurlp_request_signature, verify_lnurlp_response_signature,
    verify_pay_request_signature,
};

// Error handling
pub use crate::errors::{UmaError, UmaErrorCode};
pub use crate::Result;

// Wire types
pub use crate::protocol::{
    CompliancePayerData, Currency, KycStatus, LnurlComplianceResponse, LnurlpRequest,
    LnurlpResponse, PayReqResponse, PayRequest, PayerData, PayerDataOptions, PubkeyResponse,
};

// Keys and travel rule
pub use crate::encryption::{decrypt_travel_rule_info, encrypt_travel_rule_info};
pub use crate::keys::UmaKeyPair;

// Collaborators
pub use crate::invoice::InvoiceCreator;
pub use crate::public_key_cache::{InMemoryPublicKeyCache, PublicKeyCache};
pub use crate::transport::HttpTransport;

// Configuration
pub use crate::config::VaspConfig;
pub use crate::version::UMA_PROTOCOL_VERSION;
