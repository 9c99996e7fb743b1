//! Ed25519 verification of inbound webhook requests.
//!
//! The platform signs `timestamp ++ body` with the application's private key
//! and sends the hex signature and the timestamp as request headers.

use ed25519_dalek::{PUBLIC_KEY_LENGTH, Signature, Verifier, VerifyingKey};
use thiserror::Error;

/// Errors raised when loading the application public key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PublicKeyError {
    /// The key is not valid hex.
    #[error("public key is not valid hex: {0}")]
    InvalidHex(String),

    /// The key has the wrong number of bytes.
    #[error("public key must be {PUBLIC_KEY_LENGTH} bytes, got {0}")]
    InvalidLength(usize),

    /// The bytes are not a valid curve point.
    #[error("public key is not a valid Ed25519 key: {0}")]
    InvalidKey(String),
}

/// A request signature did not verify.
///
/// Malformed hex, a wrong length and a cryptographic mismatch are reported
/// alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("request signature did not verify")]
pub struct BadSignature;

/// Verifies request signatures against the application public key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureVerifier {
    key: VerifyingKey,
}

impl SignatureVerifier {
    /// Loads the verifier from a hex-encoded public key.
    ///
    /// # Errors
    ///
    /// Returns [`PublicKeyError`] when the key is not 32 bytes of valid hex
    /// or is not a valid Ed25519 point.
    pub fn from_hex(public_key_hex: &str) -> Result<Self, PublicKeyError> {
        let bytes = hex::decode(public_key_hex.trim())
            .map_err(|err| PublicKeyError::InvalidHex(err.to_string()))?;
        let key_bytes = <[u8; PUBLIC_KEY_LENGTH]>::try_from(bytes.as_slice())
            .map_err(|_| PublicKeyError::InvalidLength(bytes.len()))?;
        Self::from_bytes(&key_bytes)
    }

    /// Loads the verifier from raw public key bytes.
    ///
    /// # Errors
    ///
    /// Returns [`PublicKeyError::InvalidKey`] when the bytes are not a valid
    /// Ed25519 point.
    pub fn from_bytes(bytes: &[u8; PUBLIC_KEY_LENGTH]) -> Result<Self, PublicKeyError> {
        VerifyingKey::from_bytes(bytes)
            .map(|key| Self { key })
            .map_err(|err| PublicKeyError::InvalidKey(err.to_string()))
    }

    /// Returns the underlying key.
    #[must_use]
    pub const fn key(&self) -> &VerifyingKey {
        &self.key
    }

    /// Checks `signature_hex` over `timestamp ++ body`.
    ///
    /// # Errors
    ///
    /// Returns [`BadSignature`] when the signature is malformed or does not
    /// match.
    pub fn verify(
        &self,
        body: &[u8],
        timestamp: &str,
        signature_hex: &str,
    ) -> Result<(), BadSignature> {
        let raw = hex::decode(signature_hex).map_err(|_| BadSignature)?;
        let signature = Signature::from_slice(&raw).map_err(|_| BadSignature)?;

        let mut message = Vec::with_capacity(timestamp.len() + body.len());
        message.extend_from_slice(timestamp.as_bytes());
        message.extend_from_slice(body);

        self.key
            .verify(&message, &signature)
            .map_err(|_| BadSignature)
    }
}
