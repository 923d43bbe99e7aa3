//! ECIES encryption for travel-rule data.
//!
//! The sender encrypts free-text travel-rule information to the receiver's
//! published encryption key so that only the receiving VASP can read it.
//!
//! # Scheme
//!
//! - Ephemeral secp256k1 keypair per message
//! - Shared secret: uncompressed ECDH point
//! - Key: HKDF-SHA256 over `ephemeral_pubkey || shared_point`, 32 bytes
//! - Cipher: AES-256-GCM with a 16-byte random nonce
//!
//! # Wire Format
//!
//! ```text
//! [65 bytes ephemeral pubkey][16 bytes nonce][16 bytes tag][N bytes ciphertext]
//! ```
//!
//! This is the layout used by the common secp256k1 ECIES libraries, so
//! counterparties can decrypt with any of them.

use aes_gcm::aead::consts::U16;
use aes_gcm::aead::generic_array::GenericArray;
use aes_gcm::aead::{AeadInPlace, KeyInit};
use aes_gcm::aes::Aes256;
use aes_gcm::AesGcm;
use hkdf::Hkdf;
use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::{AffinePoint, PublicKey, SecretKey};
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::Sha256;
use zeroize::Zeroizing;

use crate::keys::{public_key_from_bytes, secret_key_from_bytes};
use crate::{Result, UmaError};

type Aes256Gcm16 = AesGcm<Aes256, U16>;

/// Size of an uncompressed SEC1 public key.
const EPHEMERAL_KEY_SIZE: usize = 65;

/// Size of the AES-GCM nonce in bytes.
const NONCE_SIZE: usize = 16;

/// Size of the authentication tag in bytes.
const TAG_SIZE: usize = 16;

/// ECIES failures.
#[derive(Debug, thiserror::Error)]
pub enum EncryptionError {
    #[error("Encryption failed: {0}")]
    EncryptFailed(String),
    #[error("Decryption failed: {0}")]
    DecryptFailed(String),
    #[error("Invalid ciphertext format")]
    InvalidFormat,
    #[error("Key derivation failed: {0}")]
    KeyDerivation(String),
    #[error("Plaintext is not valid UTF-8")]
    InvalidUtf8,
}

impl From<EncryptionError> for UmaError {
    fn from(err: EncryptionError) -> Self {
        UmaError::Encryption(err.to_string())
    }
}

type EncryptionResult<T> = std::result::Result<T, EncryptionError>;

fn shared_point(secret: &SecretKey, peer: &PublicKey) -> Zeroizing<Vec<u8>> {
    let point = AffinePoint::from(peer.to_projective() * *secret.to_nonzero_scalar());
    Zeroizing::new(point.to_encoded_point(false).as_bytes().to_vec())
}

fn derive_key(ephemeral_pubkey: &[u8], shared: &[u8]) -> EncryptionResult<Zeroizing<[u8; 32]>> {
    let mut ikm = Zeroizing::new(Vec::with_capacity(ephemeral_pubkey.len() + shared.len()));
    ikm.extend_from_slice(ephemeral_pubkey);
    ikm.extend_from_slice(shared);

    let hk = Hkdf::<Sha256>::new(None, &ikm);
    let mut key = Zeroizing::new([0u8; 32]);
    hk.expand(&[], &mut key[..])
        .map_err(|e| EncryptionError::KeyDerivation(e.to_string()))?;
    Ok(key)
}

fn seal(receiver: &PublicKey, plaintext: &[u8]) -> EncryptionResult<Vec<u8>> {
    let ephemeral = SecretKey::random(&mut OsRng);
    let ephemeral_pubkey = ephemeral.public_key().to_encoded_point(false);
    let shared = shared_point(&ephemeral, receiver);
    let key = derive_key(ephemeral_pubkey.as_bytes(), &shared)?;

    let cipher = Aes256Gcm16::new_from_slice(&key[..])
        .map_err(|e| EncryptionError::EncryptFailed(e.to_string()))?;

    let mut nonce = [0u8; NONCE_SIZE];
    OsRng.fill_bytes(&mut nonce);

    let mut buffer = plaintext.to_vec();
    let tag = cipher
        .encrypt_in_place_detached(GenericArray::from_slice(&nonce), &[], &mut buffer)
        .map_err(|e| EncryptionError::EncryptFailed(e.to_string()))?;

    let mut sealed =
        Vec::with_capacity(EPHEMERAL_KEY_SIZE + NONCE_SIZE + TAG_SIZE + buffer.len());
    sealed.extend_from_slice(ephemeral_pubkey.as_bytes());
    sealed.extend_from_slice(&nonce);
    sealed.extend_from_slice(&tag);
    sealed.extend_from_slice(&buffer);
    Ok(sealed)
}

fn open(secret: &SecretKey, sealed: &[u8]) -> EncryptionResult<Vec<u8>> {
    if sealed.len() < EPHEMERAL_KEY_SIZE + NONCE_SIZE + TAG_SIZE {
        return Err(EncryptionError::InvalidFormat);
    }

    let (ephemeral_pubkey, rest) = sealed.split_at(EPHEMERAL_KEY_SIZE);
    let (nonce, rest) = rest.split_at(NONCE_SIZE);
    let (tag, ciphertext) = rest.split_at(TAG_SIZE);

    let ephemeral =
        PublicKey::from_sec1_bytes(ephemeral_pubkey).map_err(|_| EncryptionError::InvalidFormat)?;
    let shared = shared_point(secret, &ephemeral);
    let key = derive_key(ephemeral_pubkey, &shared)?;

    let cipher = Aes256Gcm16::new_from_slice(&key[..])
        .map_err(|e| EncryptionError::DecryptFailed(e.to_string()))?;

    let mut buffer = ciphertext.to_vec();
    cipher
        .decrypt_in_place_detached(
            GenericArray::from_slice(nonce),
            &[],
            &mut buffer,
            GenericArray::from_slice(tag),
        )
        .map_err(|_| EncryptionError::DecryptFailed("Authentication failed".to_string()))?;
    Ok(buffer)
}

/// Encrypt `plaintext` to a receiver's encryption public key (SPKI DER or SEC1).
pub fn encrypt(receiver_public_key: &[u8], plaintext: &[u8]) -> Result<Vec<u8>> {
    let receiver = public_key_from_bytes(receiver_public_key)?;
    Ok(seal(&receiver, plaintext)?)
}

/// Decrypt an ECIES blob with the receiver's encryption private key.
pub fn decrypt(private_key: &[u8], sealed: &[u8]) -> Result<Vec<u8>> {
    let secret = secret_key_from_bytes(private_key)?;
    Ok(open(&secret, sealed)?)
}

/// Encrypt travel-rule text for the receiving VASP, returning lowercase hex.
pub fn encrypt_travel_rule_info(travel_rule_info: &str, receiver_public_key: &[u8]) -> Result<String> {
    encrypt(receiver_public_key, travel_rule_info.as_bytes()).map(hex::encode)
}

/// Recover travel-rule text from its hex ciphertext.
///
/// # Errors
///
/// - [`UmaError::InvalidKey`] if the private key cannot be loaded
/// - [`UmaError::Encryption`] if the input is not hex, is truncated, was
///   encrypted to another key, or does not decode to UTF-8
pub fn decrypt_travel_rule_info(encrypted_hex: &str, private_key: &[u8]) -> Result<String> {
    let sealed = hex::decode(encrypted_hex).map_err(|_| EncryptionError::InvalidFormat)?;
    let plaintext = decrypt(private_key, &sealed)?;
    String::from_utf8(plaintext).map_err(|_| EncryptionError::InvalidUtf8.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::UmaKeyPair;

    #[test]
    fn test_encrypt_decrypt() {
        let receiver = UmaKeyPair::generate().unwrap();
        let info = r#"{"originator":"Alice","account":"12345"}"#;

        let encrypted = encrypt_travel_rule_info(info, &receiver.public_key).unwrap();
        assert_ne!(encrypted, hex::encode(info));
        assert_eq!(
            decrypt_travel_rule_info(&encrypted, &receiver.private_key).unwrap(),
            info
        );
    }

    #[test]
    fn test_layout() {
        let receiver = UmaKeyPair::generate().unwrap();
        let sealed = encrypt(&receiver.public_key, b"hello").unwrap();

        assert_eq!(sealed.len(), EPHEMERAL_KEY_SIZE + NONCE_SIZE + TAG_SIZE + 5);
        assert_eq!(sealed[0], 0x04);
    }

    #[test]
    fn test_ciphertexts_are_randomized() {
        let receiver = UmaKeyPair::generate().unwrap();
        let a = encrypt(&receiver.public_key, b"same").unwrap();
        let b = encrypt(&receiver.public_key, b"same").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_wrong_key_fails() {
        let receiver = UmaKeyPair::generate().unwrap();
        let other = UmaKeyPair::generate().unwrap();
        let encrypted = encrypt_travel_rule_info("secret", &receiver.public_key).unwrap();

        assert!(matches!(
            decrypt_travel_rule_info(&encrypted, &other.private_key),
            Err(UmaError::Encryption(_))
        ));
    }

    #[test]
    fn test_tampering_detected() {
        let receiver = UmaKeyPair::generate().unwrap();
        let mut sealed = encrypt(&receiver.public_key, b"secret").unwrap();
        let last = sealed.len() - 1;
        sealed[last] ^= 0xff;

        assert!(decrypt(&receiver.private_key, &sealed).is_err());
    }

    #[test]
    fn test_truncated_and_non_hex_input() {
        let receiver = UmaKeyPair::generate().unwrap();
        assert!(matches!(
            decrypt(&receiver.private_key, &[0x04; 20]),
            Err(UmaError::Encryption(_))
        ));
        assert!(matches!(
            decrypt_travel_rule_info("not hex", &receiver.private_key),
            Err(UmaError::Encryption(_))
        ));
    }

    #[test]
    fn test_bad_receiver_key() {
        assert!(matches!(
            encrypt(b"junk", b"data"),
            Err(UmaError::InvalidKey(_))
        ));
    }
}
