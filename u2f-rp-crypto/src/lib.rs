//! Pure Rust cryptographic primitives for U2F relying parties
//!
//! This crate provides the cryptographic operations a U2F server needs to
//! check what a security key signed:
//!
//! - **Digest**: SHA-256, the only digest used by the U2F raw message formats
//! - **ECDSA**: P-256 (ES256) signature verification over DER signatures
//! - **PEM**: SubjectPublicKeyInfo encoding of raw uncompressed P-256 points
//! - **Certificate**: subject public key extraction from X.509 attestation certificates
//!
//! Message formats follow the FIDO U2F raw message specification:
//! <https://fidoalliance.org/specs/fido-u2f-v1.2-ps-20170411/fido-u2f-raw-message-formats-v1.2-ps-20170411.html>

pub mod certificate;
pub mod digest;
pub mod ecdsa;
pub mod error;
pub mod pem;

// Re-export commonly used types
pub use error::{CryptoError, Result};
