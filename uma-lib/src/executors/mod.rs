//! HTTP-backed collaborator implementations.
//!
//! ## Feature Flags
//!
//! The `http-executor` feature flag must be enabled for actual HTTP requests:
//!
//! ```toml
//! [dependencies]
//! uma-lib = { version = "0.1", features = ["http-executor"] }
//! ```
//!
//! ## Supported Backends
//!
//! - **LND REST API** - invoice creation for pay responses
//! - **reqwest** - public key fetches, see [`crate::transport::ReqwestTransport`]
//!
//! ## Usage
//!
//! ```rust,ignore
//! use uma_lib::executors::{LndConfig, LndInvoiceCreator};
//! use uma_lib::invoice::InvoiceCreator;
//!
//! let creator = LndInvoiceCreator::new(LndConfig::new("https://localhost:8080", "macaroon_hex"))?;
//! let bolt11 = creator.create_uma_invoice(1_000_000, "[[\"text/plain\",\"Pay $alice\"]]")?;
//! ```

mod config;

#[cfg(feature = "http-executor")]
mod lnd;

pub use config::{HttpConfig, LndConfig};
#[cfg(feature = "http-executor")]
pub use lnd::LndInvoiceCreator;
