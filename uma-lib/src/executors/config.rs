//! Configuration types for HTTP-backed collaborators.

use serde::{Deserialize, Serialize};

/// Configuration for the LND REST invoice creator.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LndConfig {
    /// REST API endpoint URL (e.g., "https://localhost:8080").
    pub rest_url: String,

    /// Invoice macaroon for authentication (hex-encoded).
    pub macaroon_hex: String,

    /// TLS certificate (PEM format, optional for self-signed).
    pub tls_cert_pem: Option<String>,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Lifetime of created invoices in seconds.
    #[serde(default = "default_invoice_expiry")]
    pub invoice_expiry_secs: u64,
}

fn default_timeout() -> u64 {
    30
}

fn default_invoice_expiry() -> u64 {
    600
}

impl LndConfig {
    /// Create a new LND configuration.
    pub fn new(rest_url: impl Into<String>, macaroon_hex: impl Into<String>) -> Self {
        Self {
            rest_url: rest_url.into(),
            macaroon_hex: macaroon_hex.into(),
            tls_cert_pem: None,
            timeout_secs: default_timeout(),
            invoice_expiry_secs: default_invoice_expiry(),
        }
    }

    /// Set the TLS certificate.
    pub fn with_tls_cert(mut self, cert_pem: impl Into<String>) -> Self {
        self.tls_cert_pem = Some(cert_pem.into());
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set the invoice lifetime.
    pub fn with_invoice_expiry(mut self, secs: u64) -> Self {
        self.invoice_expiry_secs = secs;
        self
    }
}

/// Configuration for the HTTP public key transport.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in seconds.
    #[serde(default = "default_http_timeout")]
    pub timeout_secs: u64,

    /// `User-Agent` header sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_http_timeout() -> u64 {
    10
}

fn default_user_agent() -> String {
    format!("uma-lib/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_http_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl HttpConfig {
    /// Set the request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set the user agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}
