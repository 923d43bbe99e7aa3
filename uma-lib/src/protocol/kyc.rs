use std::fmt;

use serde::{Deserialize, Serialize};

/// Know-your-customer verification state of a user.
///
/// Serialized as its symbolic name. Values introduced by later protocol
/// versions decode to [`KycStatus::Unrecognized`] and re-encode verbatim.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum KycStatus {
    /// Status not known to the VASP.
    #[default]
    Unknown,
    /// The user has not been verified.
    NotVerified,
    /// Verification is in progress.
    Pending,
    /// The user is verified.
    Verified,
    /// A value this version does not know about.
    Unrecognized(String),
}

impl KycStatus {
    /// Wire name of this status.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Unknown => "UNKNOWN",
            Self::NotVerified => "NOT_VERIFIED",
            Self::Pending => "PENDING",
            Self::Verified => "VERIFIED",
            Self::Unrecognized(value) => value,
        }
    }
}

impl From<&str> for KycStatus {
    fn from(value: &str) -> Self {
        match value {
            "UNKNOWN" => Self::Unknown,
            "NOT_VERIFIED" => Self::NotVerified,
            "PENDING" => Self::Pending,
            "VERIFIED" => Self::Verified,
            other => Self::Unrecognized(other.to_string()),
        }
    }
}

impl From<String> for KycStatus {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<KycStatus> for String {
    fn from(status: KycStatus) -> Self {
        match status {
            KycStatus::Unrecognized(value) => value,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for KycStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
