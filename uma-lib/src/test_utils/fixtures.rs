//! Test fixtures and data generators.

use crate::keys::UmaKeyPair;
use crate::protocol::{Currency, PubkeyResponse};

/// Collection of commonly used test fixtures.
pub struct TestFixtures;

impl TestFixtures {
    /// LNURL metadata for a plain-text description.
    pub const METADATA: &'static str = r#"[["text/plain","Pay to vasp1.com user $alice"],["text/identifier","$alice@vasp1.com"]]"#;

    /// Callback URL the sample receiver advertises.
    pub const CALLBACK: &'static str = "https://vasp1.com/api/uma/payreq/$alice";

    /// Sample US dollar currency (cents, ~34 150 msats each).
    pub fn usd_currency() -> Currency {
        Currency {
            code: "USD".to_string(),
            name: "US Dollar".to_string(),
            symbol: "$".to_string(),
            millisatoshi_per_unit: 34_150.0,
            min_sendable: 1,
            max_sendable: 10_000_000,
        }
    }

    /// Sample satoshi currency.
    pub fn sat_currency() -> Currency {
        Currency {
            code: "SAT".to_string(),
            name: "Satoshi".to_string(),
            symbol: "sat".to_string(),
            millisatoshi_per_unit: 1_000.0,
            min_sendable: 1,
            max_sendable: 100_000_000,
        }
    }
}

/// A VASP with freshly generated signing and encryption keys.
pub struct TestVasp {
    /// Domain the VASP serves.
    pub domain: String,
    /// Key used to sign exchange messages.
    pub signing: UmaKeyPair,
    /// Key travel-rule data is encrypted to.
    pub encryption: UmaKeyPair,
}

impl TestVasp {
    /// Generate a VASP for `domain`.
    ///
    /// # Panics
    ///
    /// Panics if key generation fails.
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            signing: UmaKeyPair::generate().expect("signing key generation"),
            encryption: UmaKeyPair::generate().expect("encryption key generation"),
        }
    }

    /// The VASP's published public keys, without expiration.
    pub fn pubkey_response(&self) -> PubkeyResponse {
        PubkeyResponse::from_keys(&self.signing, &self.encryption, None)
    }

    /// A UMA address for `user` at this VASP.
    pub fn address(&self, user: &str) -> String {
        format!("${}@{}", user, self.domain)
    }
}
