//! `reqwest`-backed [`HttpTransport`].

use std::time::Duration;

use super::traits::HttpTransport;
use crate::executors::HttpConfig;
use crate::{Result, UmaError};

/// Blocking HTTP transport built on `reqwest`.
///
/// Must not be called from inside an async runtime worker; wrap calls in
/// `spawn_blocking` there.
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    /// Create a transport from configuration.
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| UmaError::invalid_request(format!("HTTP client setup failed: {}", e)))?;
        Ok(Self { client })
    }
}

impl HttpTransport for ReqwestTransport {
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self)))]
    fn get(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| UmaError::invalid_request(format!("GET {} failed: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(UmaError::invalid_request(format!(
                "GET {} returned HTTP {}",
                url, status
            )));
        }

        response
            .text()
            .map_err(|e| UmaError::invalid_request(format!("GET {} body unreadable: {}", url, e)))
    }
}
