//! X.509 attestation certificates
//!
//! The attestation signature of a U2F registration is made with the key
//! certified by the device's attestation certificate. Only the subject
//! public key is needed to check it; chain building and trust anchors are
//! not handled here.

use crate::ecdsa;
use crate::error::{CryptoError, Result};

use p256::ecdsa::VerifyingKey;
use x509_parser::parse_x509_certificate;

/// Extract the raw subject public key bits from a DER certificate
///
/// For EC keys this is the SEC1 encoded point.
pub fn subject_public_key(certificate_der: &[u8]) -> Result<Vec<u8>> {
    let (_, certificate) =
        parse_x509_certificate(certificate_der).map_err(|_| CryptoError::InvalidCertificate)?;

    Ok(certificate
        .public_key()
        .subject_public_key
        .data
        .to_vec())
}

/// Parse the P-256 verifying key certified by a DER certificate
///
/// Fails with [`CryptoError::InvalidCertificate`] if the certificate cannot
/// be parsed and with a key error if it certifies anything other than an
/// uncompressed P-256 point.
pub fn verifying_key(certificate_der: &[u8]) -> Result<VerifyingKey> {
    let point = subject_public_key(certificate_der)?;
    ecdsa::verifying_key(&point)
}

/// Verify an ES256 signature with the key certified by `certificate_der`
pub fn verify(certificate_der: &[u8], data: &[u8], signature: &[u8]) -> Result<()> {
    let key = verifying_key(certificate_der)?;
    ecdsa::verify_with_key(&key, data, signature)
}
