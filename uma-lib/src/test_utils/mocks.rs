//! Mock collaborators.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::invoice::InvoiceCreator;
use crate::protocol::{pubkey_url, PubkeyResponse};
use crate::transport::HttpTransport;
use crate::{Result, UmaError};

/// [`HttpTransport`] serving canned bodies keyed by URL.
///
/// Unknown URLs fail with [`UmaError::InvalidRequest`], like a 404.
#[derive(Debug, Default)]
pub struct MockTransport {
    responses: HashMap<String, String>,
    requests: Mutex<Vec<String>>,
}

impl MockTransport {
    /// Create a transport with no responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `keys` from `vasp_domain`'s public key endpoint.
    pub fn with_pubkeys(self, vasp_domain: &str, keys: &PubkeyResponse) -> Self {
        let body = keys.to_json().unwrap_or_default();
        self.with_body(vasp_domain, body)
    }

    /// Serve a raw body from `vasp_domain`'s public key endpoint.
    pub fn with_body(mut self, vasp_domain: &str, body: impl Into<String>) -> Self {
        self.responses.insert(pubkey_url(vasp_domain), body.into());
        self
    }

    /// Number of GETs issued.
    pub fn call_count(&self) -> usize {
        self.requested_urls().len()
    }

    /// URLs requested so far, in order.
    pub fn requested_urls(&self) -> Vec<String> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }
}

impl HttpTransport for MockTransport {
    fn get(&self, url: &str) -> Result<String> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(url.to_string());
        }
        self.responses
            .get(url)
            .cloned()
            .ok_or_else(|| UmaError::invalid_request(format!("no mock response for {}", url)))
    }
}

/// [`InvoiceCreator`] returning a fixed invoice and recording each call.
#[derive(Debug)]
pub struct MockInvoiceCreator {
    invoice: Option<String>,
    calls: Mutex<Vec<(u64, String)>>,
}

impl MockInvoiceCreator {
    /// Always return `invoice`.
    pub fn new(invoice: impl Into<String>) -> Self {
        Self {
            invoice: Some(invoice.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Always fail.
    pub fn failing() -> Self {
        Self {
            invoice: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// `(amount_msats, metadata)` for each call so far.
    pub fn calls(&self) -> Vec<(u64, String)> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }
}

impl InvoiceCreator for MockInvoiceCreator {
    fn create_uma_invoice(&self, amount_msats: u64, metadata: &str) -> Result<String> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((amount_msats, metadata.to_string()));
        }
        self.invoice
            .clone()
            .ok_or_else(|| UmaError::invalid_request("mock invoice creator failure"))
    }
}
