//! Requests sent from the relying party to the security key
//!
//! Both request types serialize to the JSON objects expected by the U2F
//! JavaScript API; a `Vec` of them serializes to a JSON array.

use serde::{Deserialize, Serialize};

/// U2F protocol version
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProtocolVersion {
    /// Raw message formats v1.0 and later
    #[default]
    #[serde(rename = "U2F_V2")]
    U2fV2,
}

impl ProtocolVersion {
    /// Wire string of the version
    pub fn as_str(&self) -> &'static str {
        match self {
            ProtocolVersion::U2fV2 => "U2F_V2",
        }
    }
}

/// Request to register a new security key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRequest {
    pub(crate) version: ProtocolVersion,
    pub(crate) challenge: String,
    pub(crate) app_id: String,
}

impl RegistrationRequest {
    /// Create a new RegistrationRequest
    ///
    /// # Arguments
    ///
    /// * `version` - Protocol version the device should speak
    /// * `challenge` - Single-use URL-safe base64 challenge
    /// * `app_id` - Application identifier of the relying party
    pub fn new(
        version: ProtocolVersion,
        challenge: impl Into<String>,
        app_id: impl Into<String>,
    ) -> Self {
        Self {
            version,
            challenge: challenge.into(),
            app_id: app_id.into(),
        }
    }

    /// Get the protocol version
    pub fn version(&self) -> ProtocolVersion {
        self.version
    }

    /// Get the challenge
    pub fn challenge(&self) -> &str {
        &self.challenge
    }

    /// Get the application identifier
    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    /// Serialize to the JSON object sent to the client
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Request to authenticate with one previously registered security key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticationRequest {
    pub(crate) version: ProtocolVersion,
    pub(crate) challenge: String,
    pub(crate) app_id: String,
    pub(crate) key_handle: String,
}

impl AuthenticationRequest {
    /// Create a new AuthenticationRequest
    ///
    /// # Arguments
    ///
    /// * `version` - Protocol version the device should speak
    /// * `challenge` - Single-use URL-safe base64 challenge
    /// * `app_id` - Application identifier of the relying party
    /// * `key_handle` - URL-safe base64 key handle of the registered key
    pub fn new(
        version: ProtocolVersion,
        challenge: impl Into<String>,
        app_id: impl Into<String>,
        key_handle: impl Into<String>,
    ) -> Self {
        Self {
            version,
            challenge: challenge.into(),
            app_id: app_id.into(),
            key_handle: key_handle.into(),
        }
    }

    /// Get the protocol version
    pub fn version(&self) -> ProtocolVersion {
        self.version
    }

    /// Get the challenge
    pub fn challenge(&self) -> &str {
        &self.challenge
    }

    /// Get the application identifier
    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    /// Get the key handle
    pub fn key_handle(&self) -> &str {
        &self.key_handle
    }

    /// Serialize to the JSON object sent to the client
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
