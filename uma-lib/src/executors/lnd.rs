//! LND REST API invoice creator.
//!
//! Creates invoices via `POST /v1/invoices`. The UMA metadata is committed
//! to through the invoice's `description_hash` (SHA-256, base64 on the wire).

use std::time::Duration;

use base64::Engine;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::config::LndConfig;
use crate::invoice::InvoiceCreator;
use crate::{Result, UmaError};

/// [`InvoiceCreator`] backed by an LND node.
pub struct LndInvoiceCreator {
    config: LndConfig,
    client: reqwest::blocking::Client,
}

impl LndInvoiceCreator {
    /// Create a new LND invoice creator with the given configuration.
    pub fn new(config: LndConfig) -> Result<Self> {
        if config.rest_url.is_empty() {
            return Err(UmaError::invalid_request("LND REST URL cannot be empty"));
        }
        if config.macaroon_hex.is_empty() {
            return Err(UmaError::invalid_request("LND macaroon cannot be empty"));
        }

        let mut builder =
            reqwest::blocking::Client::builder().timeout(Duration::from_secs(config.timeout_secs));
        if let Some(pem) = &config.tls_cert_pem {
            let cert = reqwest::Certificate::from_pem(pem.as_bytes())
                .map_err(|e| UmaError::invalid_request(format!("invalid LND TLS cert: {}", e)))?;
            builder = builder.add_root_certificate(cert);
        }
        let client = builder
            .build()
            .map_err(|e| UmaError::invalid_request(format!("HTTP client setup failed: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Get the configuration.
    pub fn config(&self) -> &LndConfig {
        &self.config
    }

    /// Build the full URL for an API endpoint.
    fn url(&self, path: &str) -> String {
        format!("{}/v1/{}", self.config.rest_url.trim_end_matches('/'), path)
    }
}

impl InvoiceCreator for LndInvoiceCreator {
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, metadata)))]
    fn create_uma_invoice(&self, amount_msats: u64, metadata: &str) -> Result<String> {
        let description_hash = base64::engine::general_purpose::STANDARD
            .encode(Sha256::digest(metadata.as_bytes()));
        let body = LndAddInvoiceRequest {
            value_msat: amount_msats.to_string(),
            description_hash,
            expiry: self.config.invoice_expiry_secs.to_string(),
        };

        let response = self
            .client
            .post(self.url("invoices"))
            .header("Grpc-Metadata-macaroon", &self.config.macaroon_hex)
            .json(&body)
            .send()
            .map_err(|e| UmaError::invalid_request(format!("LND request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().unwrap_or_default();
            return Err(UmaError::invalid_request(format!(
                "LND returned HTTP {}: {}",
                status, text
            )));
        }

        let invoice: LndAddInvoiceResponse = response
            .json()
            .map_err(|e| UmaError::invalid_request(format!("LND response unreadable: {}", e)))?;
        if invoice.payment_request.is_empty() {
            return Err(UmaError::invalid_request("LND returned an empty payment request"));
        }
        Ok(invoice.payment_request)
    }
}

// LND REST API types

#[derive(Debug, Serialize)]
struct LndAddInvoiceRequest {
    value_msat: String,
    description_hash: String,
    expiry: String,
}

#[derive(Debug, Deserialize)]
struct LndAddInvoiceResponse {
    #[serde(default)]
    payment_request: String,
}
