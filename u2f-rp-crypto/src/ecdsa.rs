//! P-256 ECDSA (ES256) signatures over U2F messages
//!
//! U2F security keys sign with:
//! - Curve: P-256 (secp256r1 / prime256v1)
//! - Hash: SHA-256
//! - Signature format: ASN.1 DER (`SEQUENCE { r INTEGER, s INTEGER }`)
//!
//! Public keys travel as 65-byte uncompressed SEC1 points (0x04 || x || y).
//! Only verification lives here; signing is the device's job.

use crate::error::{CryptoError, Result};

use p256::ecdsa::{signature::Verifier, Signature, VerifyingKey};

/// Length of an uncompressed SEC1 P-256 point
pub const PUBLIC_KEY_LENGTH: usize = 65;

/// Leading byte of an uncompressed SEC1 point
pub const UNCOMPRESSED_POINT_TAG: u8 = 0x04;

/// Parse a 65-byte uncompressed SEC1 point into a verifying key
///
/// Fails with [`CryptoError::InvalidKeyLength`] on a wrong length and with
/// [`CryptoError::InvalidPublicKey`] when the bytes are not a point on P-256.
pub fn verifying_key(public_key: &[u8]) -> Result<VerifyingKey> {
    if public_key.len() != PUBLIC_KEY_LENGTH {
        return Err(CryptoError::InvalidKeyLength {
            expected: PUBLIC_KEY_LENGTH,
            actual: public_key.len(),
        });
    }
    if public_key[0] != UNCOMPRESSED_POINT_TAG {
        return Err(CryptoError::InvalidPublicKey);
    }

    VerifyingKey::from_sec1_bytes(public_key).map_err(|_| CryptoError::InvalidPublicKey)
}

/// Verify an ES256 signature
///
/// Verifies a DER-encoded signature over `data` with an uncompressed
/// P-256 public key. A signature that fails to parse is reported the same
/// way as one that does not verify.
///
/// # Examples
///
/// ```
/// use p256::ecdsa::{signature::Signer, Signature, SigningKey};
/// use rand::rngs::OsRng;
/// use u2f_rp_crypto::ecdsa;
///
/// let device_key = SigningKey::random(&mut OsRng);
/// let public_key = device_key.verifying_key().to_encoded_point(false);
/// let signature: Signature = device_key.sign(b"payload");
/// let der = signature.to_der();
///
/// assert!(ecdsa::verify(public_key.as_bytes(), b"payload", der.as_bytes()).is_ok());
/// assert!(ecdsa::verify(public_key.as_bytes(), b"tampered", der.as_bytes()).is_err());
/// ```
pub fn verify(public_key: &[u8], data: &[u8], signature: &[u8]) -> Result<()> {
    let key = verifying_key(public_key)?;
    verify_with_key(&key, data, signature)
}

/// Verify an ES256 signature with an already parsed key
pub fn verify_with_key(key: &VerifyingKey, data: &[u8], signature: &[u8]) -> Result<()> {
    let sig = Signature::from_der(signature).map_err(|_| CryptoError::InvalidSignature)?;

    key.verify(data, &sig)
        .map_err(|_| CryptoError::InvalidSignature)
}
