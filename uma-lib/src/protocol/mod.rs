//! UMA wire messages and protocol conventions.
//!
//! This module defines the single source of truth for:
//! - The four exchanged messages and their JSON field names
//! - Well-known URL paths and the scheme rule for local development hosts
//! - KYC status values, including forward-compatible unknown values
//!
//! # Messages
//!
//! | Message              | Direction           | Encoding                     |
//! |----------------------|---------------------|------------------------------|
//! | [`LnurlpRequest`]    | sender -> receiver  | URL query string             |
//! | [`LnurlpResponse`]   | receiver -> sender  | JSON                         |
//! | [`PayRequest`]       | sender -> receiver  | JSON                         |
//! | [`PayReqResponse`]   | receiver -> sender  | JSON                         |
//! | [`PubkeyResponse`]   | any VASP            | JSON at `/.well-known/lnurlpubkey` |
//!
//! JSON field names are the `lowerCamelCase` form of the Rust field names.
//! The only exceptions are declared on the types themselves:
//! `Currency::millisatoshi_per_unit` travels as `multiplier`, and
//! [`PayerDataOptions`] expands to `{field: {"mandatory": bool}}`.

mod kyc;
mod lnurlp;
mod paths;
mod payreq;
mod pubkey;

pub use kyc::KycStatus;
pub use lnurlp::{
    Currency, LnurlComplianceResponse, LnurlpRequest, LnurlpResponse, PayerDataOptions,
    PAY_REQUEST_TAG,
};
pub use paths::*;
pub use payreq::{
    CompliancePayerData, PayReqResponse, PayReqResponseCompliance, PayReqResponsePaymentInfo,
    PayRequest, PayerData,
};
pub use pubkey::PubkeyResponse;
