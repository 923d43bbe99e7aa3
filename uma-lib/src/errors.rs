//! Error types for UMA operations.
//!
//! Every failure in the exchange surfaces as a typed [`UmaError`]; nothing is
//! logged or retried inside the library. The embedding application decides
//! what the user sees.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error codes for FFI and embedding hosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum UmaErrorCode {
    /// Version string could not be parsed
    MalformedVersion = 1000,
    /// No mutually supported protocol version
    UnsupportedVersion = 1001,
    /// Invalid request/data, or a collaborator failed
    InvalidRequest = 2000,
    /// Signature verification failed
    InvalidSignature = 3000,
    /// A local key could not be loaded
    InvalidKey = 3001,
    /// Travel-rule encryption or decryption failed
    Encryption = 3002,
    /// Serialization error
    Serialization = 5002,
}

/// Comprehensive error type for UMA operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UmaError {
    /// The version string is not `major.minor`.
    MalformedVersion(String),

    /// The requested version has no supported major version in common with us.
    UnsupportedVersion {
        /// Version the counterparty asked for
        requested: String,
        /// Major versions this implementation speaks
        supported_major_versions: Vec<u32>,
    },

    /// Malformed URL or message, missing fields, or a collaborator failure.
    InvalidRequest(String),

    /// The signature does not verify against the payload and public key.
    InvalidSignature,

    /// A private or public key could not be decoded.
    InvalidKey(String),

    /// ECIES failure.
    Encryption(String),

    /// Serialization of one of our own records failed.
    Serialization(String),
}

impl UmaError {
    /// Get the error code for FFI/embedding hosts.
    pub fn code(&self) -> UmaErrorCode {
        match self {
            Self::MalformedVersion(_) => UmaErrorCode::MalformedVersion,
            Self::UnsupportedVersion { .. } => UmaErrorCode::UnsupportedVersion,
            Self::InvalidRequest(_) => UmaErrorCode::InvalidRequest,
            Self::InvalidSignature => UmaErrorCode::InvalidSignature,
            Self::InvalidKey(_) => UmaErrorCode::InvalidKey,
            Self::Encryption(_) => UmaErrorCode::Encryption,
            Self::Serialization(_) => UmaErrorCode::Serialization,
        }
    }

    /// Get the error message as an owned String (useful for FFI).
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Returns true if the caller could reasonably retry the exchange.
    ///
    /// Only a version mismatch qualifies: the sender may retry with a version
    /// picked from [`UmaError::supported_major_versions`]. Signature failures
    /// never qualify since a retry cannot change the cryptographic outcome.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::UnsupportedVersion { .. })
    }

    /// Major versions advertised by an `UnsupportedVersion` error.
    pub fn supported_major_versions(&self) -> Option<&[u32]> {
        match self {
            Self::UnsupportedVersion {
                supported_major_versions,
                ..
            } => Some(supported_major_versions),
            _ => None,
        }
    }

    /// JSON body an HTTP server returns for an `UnsupportedVersion` error.
    pub fn unsupported_version_body(&self) -> Option<UnsupportedVersionBody> {
        self.supported_major_versions()
            .map(|majors| UnsupportedVersionBody {
                supported_major_versions: majors.to_vec(),
            })
    }

    /// Create an invalid request error.
    pub fn invalid_request(reason: impl Into<String>) -> Self {
        Self::InvalidRequest(reason.into())
    }

    /// Create an unsupported version error for `requested`.
    pub fn unsupported_version(
        requested: impl Into<String>,
        supported_major_versions: Vec<u32>,
    ) -> Self {
        Self::UnsupportedVersion {
            requested: requested.into(),
            supported_major_versions,
        }
    }
}

impl fmt::Display for UmaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedVersion(version) => write!(f, "malformed version: {}", version),
            Self::UnsupportedVersion {
                requested,
                supported_major_versions,
            } => {
                write!(
                    f,
                    "unsupported version {}, supported major versions: {:?}",
                    requested, supported_major_versions
                )
            }
            Self::InvalidRequest(msg) => write!(f, "invalid request: {}", msg),
            Self::InvalidSignature => write!(f, "invalid signature"),
            Self::InvalidKey(msg) => write!(f, "invalid key: {}", msg),
            Self::Encryption(msg) => write!(f, "encryption error: {}", msg),
            Self::Serialization(msg) => write!(f, "serialization error: {}", msg),
        }
    }
}

impl std::error::Error for UmaError {}

impl From<serde_json::Error> for UmaError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Wire shape of an unsupported-version error response.
///
/// ```
/// use uma_lib::errors::UnsupportedVersionBody;
///
/// let body = UnsupportedVersionBody { supported_major_versions: vec![1] };
/// assert_eq!(body.to_json().unwrap(), r#"{"supportedMajorVersions":[1]}"#);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnsupportedVersionBody {
    /// Major versions the responding VASP supports.
    pub supported_major_versions: Vec<u32>,
}

impl UnsupportedVersionBody {
    /// Serialize to the JSON error body.
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Extract the supported major versions from an unsupported-version error body.
pub fn supported_major_versions_from_error_body(body: &str) -> crate::Result<Vec<u32>> {
    let parsed: UnsupportedVersionBody = serde_json::from_str(body)
        .map_err(|e| UmaError::invalid_request(format!("unsupported version body: {}", e)))?;
    Ok(parsed.supported_major_versions)
}
