//! PEM encoding of raw P-256 public keys
//!
//! Security keys report their public key as a bare uncompressed point.
//! Wrapping it in a SubjectPublicKeyInfo (RFC 5480) only needs a constant
//! DER prefix because every field except the point itself is fixed for
//! `id-ecPublicKey` on `secp256r1`.

use crate::ecdsa::{PUBLIC_KEY_LENGTH, UNCOMPRESSED_POINT_TAG};
use crate::error::{CryptoError, Result};

use base64::prelude::*;

/// DER header of a P-256 SubjectPublicKeyInfo, up to the BIT STRING contents
///
/// ```text
/// SEQUENCE (89) {
///   SEQUENCE (19) {
///     OBJECT IDENTIFIER 1.2.840.10045.2.1     -- id-ecPublicKey
///     OBJECT IDENTIFIER 1.2.840.10045.3.1.7   -- secp256r1
///   }
///   BIT STRING (66, 0 unused bits) <point>
/// }
/// ```
pub const P256_SPKI_PREFIX: [u8; 26] = [
    0x30, 0x59, 0x30, 0x13, 0x06, 0x07, 0x2a, 0x86, 0x48, 0xce, 0x3d, 0x02, 0x01, 0x06, 0x08, 0x2a,
    0x86, 0x48, 0xce, 0x3d, 0x03, 0x01, 0x07, 0x03, 0x42, 0x00,
];

const PEM_HEADER: &str = "-----BEGIN PUBLIC KEY-----";
const PEM_FOOTER: &str = "-----END PUBLIC KEY-----";
const PEM_LINE_WIDTH: usize = 64;
const PEM_LINE_ENDING: &str = "\r\n";

/// Build the DER SubjectPublicKeyInfo for a raw uncompressed P-256 point
///
/// Only the shape of the point is checked (65 bytes, leading 0x04); whether
/// it lies on the curve is left to signature verification.
pub fn public_key_der(point: &[u8]) -> Result<Vec<u8>> {
    if point.len() != PUBLIC_KEY_LENGTH {
        return Err(CryptoError::InvalidKeyLength {
            expected: PUBLIC_KEY_LENGTH,
            actual: point.len(),
        });
    }
    if point[0] != UNCOMPRESSED_POINT_TAG {
        return Err(CryptoError::InvalidPublicKey);
    }

    let mut der = Vec::with_capacity(P256_SPKI_PREFIX.len() + PUBLIC_KEY_LENGTH);
    der.extend_from_slice(&P256_SPKI_PREFIX);
    der.extend_from_slice(point);
    Ok(der)
}

/// Encode a raw uncompressed P-256 point as a PEM public key
///
/// Output uses 64-column base64 lines and CRLF line endings, with no
/// trailing line break after the footer.
///
/// # Examples
///
/// ```
/// use p256::ecdsa::SigningKey;
/// use rand::rngs::OsRng;
/// use u2f_rp_crypto::pem;
///
/// let device_key = SigningKey::random(&mut OsRng);
/// let point = device_key.verifying_key().to_encoded_point(false);
/// let pem = pem::public_key_pem(point.as_bytes()).unwrap();
///
/// assert!(pem.starts_with("-----BEGIN PUBLIC KEY-----\r\n"));
/// assert!(pem.ends_with("\r\n-----END PUBLIC KEY-----"));
/// ```
pub fn public_key_pem(point: &[u8]) -> Result<String> {
    let encoded = BASE64_STANDARD.encode(public_key_der(point)?);

    let mut pem = String::with_capacity(encoded.len() + 64);
    pem.push_str(PEM_HEADER);
    pem.push_str(PEM_LINE_ENDING);
    // base64 output is ASCII, so any byte offset is a char boundary
    let mut rest = encoded.as_str();
    while !rest.is_empty() {
        let (line, tail) = rest.split_at(rest.len().min(PEM_LINE_WIDTH));
        pem.push_str(line);
        pem.push_str(PEM_LINE_ENDING);
        rest = tail;
    }
    pem.push_str(PEM_FOOTER);
    Ok(pem)
}
