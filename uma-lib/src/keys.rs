//! secp256k1 key material.
//!
//! VASPs hold two keypairs: one for signing exchange messages and one for
//! receiving encrypted travel-rule data. Both use the same encodings:
//!
//! - Private keys: PKCS#8 DER, or a raw 32-byte scalar
//! - Public keys: SubjectPublicKeyInfo DER, or SEC1 (compressed or uncompressed)

use k256::ecdsa::{SigningKey, VerifyingKey};
use k256::pkcs8::{DecodePrivateKey, DecodePublicKey, EncodePrivateKey, EncodePublicKey};
use k256::{PublicKey, SecretKey};
use rand::rngs::OsRng;
use zeroize::Zeroize;

use crate::{Result, UmaError};

/// A freshly generated keypair in wire encodings.
///
/// The private key is cleared from memory when the pair is dropped.
#[derive(Clone)]
pub struct UmaKeyPair {
    /// PKCS#8 DER private key.
    pub private_key: Vec<u8>,
    /// SubjectPublicKeyInfo DER public key.
    pub public_key: Vec<u8>,
}

impl UmaKeyPair {
    /// Generate a random secp256k1 keypair.
    pub fn generate() -> Result<Self> {
        let signing_key = SigningKey::random(&mut OsRng);
        let private_key = signing_key
            .to_pkcs8_der()
            .map_err(|e| UmaError::InvalidKey(format!("PKCS#8 encoding failed: {}", e)))?
            .as_bytes()
            .to_vec();
        let public_key = signing_key
            .verifying_key()
            .to_public_key_der()
            .map_err(|e| UmaError::InvalidKey(format!("SPKI encoding failed: {}", e)))?
            .as_bytes()
            .to_vec();

        Ok(Self {
            private_key,
            public_key,
        })
    }

    /// Hex of the private key. SENSITIVE.
    pub fn private_key_hex(&self) -> String {
        hex::encode(&self.private_key)
    }

    /// Hex of the public key, as published in a [`crate::protocol::PubkeyResponse`].
    pub fn public_key_hex(&self) -> String {
        hex::encode(&self.public_key)
    }
}

impl std::fmt::Debug for UmaKeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UmaKeyPair")
            .field("public_key", &self.public_key_hex())
            .finish_non_exhaustive()
    }
}

impl Drop for UmaKeyPair {
    fn drop(&mut self) {
        self.private_key.zeroize();
    }
}

pub(crate) fn signing_key_from_bytes(bytes: &[u8]) -> Result<SigningKey> {
    SigningKey::from_pkcs8_der(bytes)
        .or_else(|_| SigningKey::from_slice(bytes))
        .map_err(|_| UmaError::InvalidKey("unable to load signing private key".to_string()))
}

pub(crate) fn verifying_key_from_bytes(bytes: &[u8]) -> Result<VerifyingKey> {
    VerifyingKey::from_public_key_der(bytes)
        .or_else(|_| VerifyingKey::from_sec1_bytes(bytes))
        .map_err(|_| UmaError::InvalidKey("unable to load signing public key".to_string()))
}

pub(crate) fn secret_key_from_bytes(bytes: &[u8]) -> Result<SecretKey> {
    SecretKey::from_pkcs8_der(bytes)
        .or_else(|_| SecretKey::from_slice(bytes))
        .map_err(|_| UmaError::InvalidKey("unable to load encryption private key".to_string()))
}

pub(crate) fn public_key_from_bytes(bytes: &[u8]) -> Result<PublicKey> {
    PublicKey::from_public_key_der(bytes)
        .or_else(|_| PublicKey::from_sec1_bytes(bytes))
        .map_err(|_| UmaError::InvalidKey("unable to load encryption public key".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use k256::elliptic_curve::sec1::ToEncodedPoint;

    #[test]
    fn generated_keys_load_back() {
        let pair = UmaKeyPair::generate().unwrap();
        let signing = signing_key_from_bytes(&pair.private_key).unwrap();
        let verifying = verifying_key_from_bytes(&pair.public_key).unwrap();
        assert_eq!(signing.verifying_key(), &verifying);

        let secret = secret_key_from_bytes(&pair.private_key).unwrap();
        let public = public_key_from_bytes(&pair.public_key).unwrap();
        assert_eq!(secret.public_key(), public);
    }

    #[test]
    fn raw_encodings_are_accepted() {
        let pair = UmaKeyPair::generate().unwrap();
        let secret = secret_key_from_bytes(&pair.private_key).unwrap();
        let raw_secret = secret.to_bytes();
        let sec1 = secret.public_key().to_encoded_point(true);

        assert!(signing_key_from_bytes(raw_secret.as_slice()).is_ok());
        assert!(verifying_key_from_bytes(sec1.as_bytes()).is_ok());
        assert!(public_key_from_bytes(sec1.as_bytes()).is_ok());
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(matches!(
            signing_key_from_bytes(b"not a key"),
            Err(UmaError::InvalidKey(_))
        ));
        assert!(verifying_key_from_bytes(&[0u8; 10]).is_err());
    }

    #[test]
    fn debug_hides_private_key() {
        let pair = UmaKeyPair::generate().unwrap();
        let debug = format!("{:?}", pair);
        assert!(!debug.contains(&pair.private_key_hex()));
        assert!(debug.contains(&pair.public_key_hex()));
    }
}
