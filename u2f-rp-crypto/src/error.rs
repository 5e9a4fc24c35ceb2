//! Error types for cryptographic operations

use thiserror::Error;

/// Cryptographic operation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CryptoError {
    /// Public key is not a valid P-256 point
    #[error("Invalid public key")]
    InvalidPublicKey,

    /// Signature is malformed or does not verify
    #[error("Invalid signature")]
    InvalidSignature,

    /// Certificate is not a parseable X.509 DER structure
    #[error("Invalid certificate")]
    InvalidCertificate,

    /// Invalid key length
    #[error("Invalid key length: expected {expected}, got {actual}")]
    InvalidKeyLength { expected: usize, actual: usize },
}

/// Result type alias for cryptographic operations
pub type Result<T> = core::result::Result<T, CryptoError>;
