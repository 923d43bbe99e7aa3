//! Local VASP configuration.

use serde::{Deserialize, Serialize};

use crate::protocol::url_scheme;
use crate::version::{is_version_supported, supported_major_versions, UMA_PROTOCOL_VERSION};
use crate::{Result, UmaError};

/// Settings describing the VASP running this library.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaspConfig {
    /// Domain this VASP serves UMA addresses under (e.g., "vasp1.com").
    pub domain: String,

    /// Protocol version this VASP speaks.
    #[serde(default = "default_uma_version")]
    pub uma_version: String,

    /// Smallest amount offered in discovery responses, in millisatoshis.
    #[serde(default = "default_min_sendable")]
    pub min_sendable_msats: u64,

    /// Largest amount offered in discovery responses, in millisatoshis.
    #[serde(default = "default_max_sendable")]
    pub max_sendable_msats: u64,

    /// Pay request callback path; `{identifier}` is replaced with the user part
    /// of the receiver address.
    #[serde(default = "default_callback_path")]
    pub callback_path: String,

    /// Whether this VASP is subject to the travel rule.
    #[serde(default = "default_travel_rule")]
    pub is_subject_to_travel_rule: bool,
}

fn default_uma_version() -> String {
    UMA_PROTOCOL_VERSION.to_string()
}

fn default_min_sendable() -> u64 {
    1_000
}

fn default_max_sendable() -> u64 {
    10_000_000_000
}

fn default_callback_path() -> String {
    "/api/uma/payreq/{identifier}".to_string()
}

fn default_travel_rule() -> bool {
    true
}

impl VaspConfig {
    /// Create a configuration for `domain` with default settings.
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            uma_version: default_uma_version(),
            min_sendable_msats: default_min_sendable(),
            max_sendable_msats: default_max_sendable(),
            callback_path: default_callback_path(),
            is_subject_to_travel_rule: default_travel_rule(),
        }
    }

    /// Set the protocol version.
    pub fn with_uma_version(mut self, version: impl Into<String>) -> Self {
        self.uma_version = version.into();
        self
    }

    /// Set the sendable range in millisatoshis.
    pub fn with_sendable_range(mut self, min_msats: u64, max_msats: u64) -> Self {
        self.min_sendable_msats = min_msats;
        self.max_sendable_msats = max_msats;
        self
    }

    /// Set the callback path template.
    pub fn with_callback_path(mut self, path: impl Into<String>) -> Self {
        self.callback_path = path.into();
        self
    }

    /// Set whether this VASP is subject to the travel rule.
    pub fn with_travel_rule(mut self, subject: bool) -> Self {
        self.is_subject_to_travel_rule = subject;
        self
    }

    /// Absolute pay request callback URL for a local user.
    pub fn callback_url(&self, identifier: &str) -> String {
        format!(
            "{}://{}{}",
            url_scheme(&self.domain),
            self.domain,
            self.callback_path.replace("{identifier}", identifier)
        )
    }

    /// Check the configuration is usable.
    ///
    /// # Errors
    ///
    /// - [`UmaError::InvalidRequest`] for an empty domain or an inverted sendable range
    /// - [`UmaError::UnsupportedVersion`] if `uma_version` is not supported
    pub fn validate(&self) -> Result<()> {
        if self.domain.trim().is_empty() {
            return Err(UmaError::invalid_request("VASP domain cannot be empty"));
        }
        if self.min_sendable_msats > self.max_sendable_msats {
            return Err(UmaError::invalid_request(format!(
                "min sendable {} exceeds max sendable {}",
                self.min_sendable_msats, self.max_sendable_msats
            )));
        }
        if !is_version_supported(&self.uma_version) {
            return Err(UmaError::unsupported_version(
                self.uma_version.clone(),
                supported_major_versions(),
            ));
        }
        Ok(())
    }
}
