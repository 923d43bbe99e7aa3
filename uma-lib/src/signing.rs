//! # Message Signatures
//!
//! ## Security Model
//!
//! Every signed UMA message is reduced to a canonical byte string, its
//! *signable payload*, and signed with ECDSA over SHA-256 on secp256k1.
//! The payloads are pipe-joined UTF-8 fields:
//!
//! | Message                | Payload                                              |
//! |------------------------|------------------------------------------------------|
//! | discovery request      | `receiver_address|nonce|unix_seconds`                |
//! | discovery response     | `receiver_identifier|signature_nonce|signature_timestamp` |
//! | pay request            | `identifier[|signature_nonce|signature_timestamp]`   |
//!
//! Signer and verifier must produce these bytes identically, field order and
//! delimiter included.
//!
//! Signatures travel as lowercase hex of the DER encoding. Verification also
//! accepts the 64-byte fixed-width form and normalizes high-S values.
//!
//! Replay protection comes from the nonce and timestamp inside each payload.
//! Nonces are 32-bit; callers needing stronger guarantees must track them.

use k256::ecdsa::signature::{Signer, Verifier};
use k256::ecdsa::Signature;
use rand::Rng;

use crate::keys::{signing_key_from_bytes, verifying_key_from_bytes};
use crate::{Result, UmaError};

/// A message with a canonical signable payload.
pub trait Signable {
    /// The exact bytes that are signed and verified.
    fn signable_payload(&self) -> Vec<u8>;
}

/// Sign `payload` with a PKCS#8 DER (or raw 32-byte) secp256k1 private key.
///
/// Returns the lowercase hex of the DER-encoded signature.
///
/// # Errors
///
/// Returns [`UmaError::InvalidKey`] if the private key cannot be loaded.
pub fn sign_payload(payload: &[u8], private_key: &[u8]) -> Result<String> {
    let signing_key = signing_key_from_bytes(private_key)?;
    let signature: Signature = signing_key.sign(payload);
    Ok(hex::encode(signature.to_der().as_bytes()))
}

/// Verify a hex signature over `payload` against a DER SPKI (or SEC1) public key.
///
/// # Errors
///
/// Every failure, including a malformed key or signature, is reported as
/// [`UmaError::InvalidSignature`].
pub fn verify_payload(payload: &[u8], signature_hex: &str, public_key: &[u8]) -> Result<()> {
    let verifying_key =
        verifying_key_from_bytes(public_key).map_err(|_| UmaError::InvalidSignature)?;
    let bytes = hex::decode(signature_hex).map_err(|_| UmaError::InvalidSignature)?;
    let signature = Signature::from_der(&bytes)
        .or_else(|_| Signature::from_slice(&bytes))
        .map_err(|_| UmaError::InvalidSignature)?;
    let signature = signature.normalize_s().unwrap_or(signature);

    verifying_key
        .verify(payload, &signature)
        .map_err(|_| UmaError::InvalidSignature)
}

/// Sign a message's canonical payload.
pub fn sign_message<M: Signable + ?Sized>(message: &M, private_key: &[u8]) -> Result<String> {
    sign_payload(&message.signable_payload(), private_key)
}

/// Verify a signature over a message's canonical payload.
pub fn verify_message<M: Signable + ?Sized>(
    message: &M,
    signature_hex: &str,
    public_key: &[u8],
) -> Result<()> {
    verify_payload(&message.signable_payload(), signature_hex, public_key)
}

/// A fresh nonce: the decimal form of a uniformly random `u32`.
pub fn generate_nonce() -> String {
    rand::thread_rng().gen::<u32>().to_string()
}
