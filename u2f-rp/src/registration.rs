//! Registered security key record
//!
//! The relying party owns storage of these records; the engine only creates
//! them on registration and reads them on authentication.

use serde::{Deserialize, Serialize};

/// A registered security key
///
/// Serializes with the key handle as URL-safe base64 and the public key and
/// certificate as standard base64, so records can be stored as JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    /// Key handle, URL-safe base64 without padding
    pub key_handle: String,
    /// User public key, 65-byte uncompressed P-256 point
    #[serde(with = "base64_bytes")]
    pub public_key: Vec<u8>,
    /// Attestation certificate, DER encoded
    #[serde(with = "base64_bytes")]
    pub certificate: Vec<u8>,
    /// Last accepted signature counter
    #[serde(default)]
    pub counter: u32,
}

impl Registration {
    /// Create a freshly registered key with a zero counter
    pub fn new(key_handle: impl Into<String>, public_key: Vec<u8>, certificate: Vec<u8>) -> Self {
        Self {
            key_handle: key_handle.into(),
            public_key,
            certificate,
            counter: 0,
        }
    }

    /// Copy of this registration with an advanced counter
    pub fn with_counter(&self, counter: u32) -> Self {
        Self {
            counter,
            ..self.clone()
        }
    }
}

mod base64_bytes {
    use base64::prelude::*;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&BASE64_STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        BASE64_STANDARD
            .decode(encoded)
            .map_err(serde::de::Error::custom)
    }
}
