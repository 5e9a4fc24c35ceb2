//! Results returned by the security key, as relayed by the client
//!
//! Fully decoded, validated result structures. Parsing fails up front on
//! bad JSON, bad base64 or a truncated binary payload, so the accessors
//! below never fail.

use crate::client_data::ClientData;
use crate::encoding::{urlsafe_decode, urlsafe_encode};
use crate::error::{DeviceErrorCode, Error, Result};
use crate::registration_data::RegistrationData;
use crate::signature_data::SignatureData;

use serde::Deserialize;

/// Wire shape of a registration result
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRegistrationResult {
    error_code: Option<u64>,
    client_data: Option<String>,
    registration_data: Option<String>,
}

/// Wire shape of an authentication result
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAuthenticationResult {
    error_code: Option<u64>,
    client_data: Option<String>,
    key_handle: Option<String>,
    signature_data: Option<String>,
}

/// Fail with the device's error code if it sent one
fn check_error_code(error_code: Option<u64>) -> Result<()> {
    match error_code {
        Some(code) if code > 0 => Err(Error::DeviceError(DeviceErrorCode::from(code))),
        _ => Ok(()),
    }
}

fn required(field: Option<String>, name: &str) -> Result<String> {
    field.ok_or_else(|| Error::MalformedResult(format!("missing {name}")))
}

/// Response to a [`RegistrationRequest`](crate::RegistrationRequest)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationResult {
    client_data_json: Vec<u8>,
    client_data: ClientData,
    registration_data: RegistrationData,
}

impl RegistrationResult {
    /// Parse from the client's JSON
    ///
    /// Expected format:
    /// ```json
    /// {
    ///   "clientData": "<URL-safe base64 client data JSON>",
    ///   "registrationData": "<URL-safe base64 registration message>"
    /// }
    /// ```
    ///
    /// # Errors
    ///
    /// - [`Error::DeviceError`] if the client relayed a positive `errorCode`
    /// - [`Error::MalformedResult`] on invalid JSON or a missing key
    /// - [`Error::Encoding`] on invalid base64
    /// - [`Error::MalformedClientData`] on invalid client data
    /// - [`Error::AttestationDecode`] on a truncated registration message
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawRegistrationResult =
            serde_json::from_str(json).map_err(|e| Error::MalformedResult(e.to_string()))?;
        check_error_code(raw.error_code)?;

        let client_data = required(raw.client_data, "clientData")?;
        let registration_data = required(raw.registration_data, "registrationData")?;

        Self::new(
            urlsafe_decode(&client_data)?,
            urlsafe_decode(&registration_data)?,
        )
    }

    /// Build from already decoded client data JSON and registration message
    pub fn new(client_data_json: Vec<u8>, registration_data: Vec<u8>) -> Result<Self> {
        let client_data = ClientData::from_json(&client_data_json)?;
        let registration_data = RegistrationData::parse(registration_data)?;

        Ok(Self {
            client_data_json,
            client_data,
            registration_data,
        })
    }

    /// Parsed client data
    pub fn client_data(&self) -> &ClientData {
        &self.client_data
    }

    /// Client data exactly as signed
    pub fn client_data_json(&self) -> &[u8] {
        &self.client_data_json
    }

    /// Binary registration message
    pub fn registration_data(&self) -> &RegistrationData {
        &self.registration_data
    }

    /// User public key, 65 bytes
    pub fn public_key_raw(&self) -> &[u8] {
        self.registration_data.public_key_raw()
    }

    /// Raw key handle
    pub fn key_handle_raw(&self) -> &[u8] {
        self.registration_data.key_handle_raw()
    }

    /// Key handle as URL-safe base64, the form used in requests
    pub fn key_handle(&self) -> String {
        urlsafe_encode(self.key_handle_raw())
    }

    /// Attestation certificate, DER encoded
    pub fn certificate_raw(&self) -> &[u8] {
        self.registration_data.certificate_raw()
    }

    /// Attestation signature
    pub fn signature(&self) -> &[u8] {
        self.registration_data.signature()
    }

    /// Bytes the attestation signature must cover for `app_id`
    pub fn signed_data(&self, app_id: &str) -> Vec<u8> {
        self.registration_data
            .signed_data(app_id, &self.client_data_json)
    }
}

/// Response to an [`AuthenticationRequest`](crate::AuthenticationRequest)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticationResult {
    client_data_json: Vec<u8>,
    client_data: ClientData,
    key_handle: String,
    signature_data: SignatureData,
}

impl AuthenticationResult {
    /// Parse from the client's JSON
    ///
    /// Expected format:
    /// ```json
    /// {
    ///   "clientData": "<URL-safe base64 client data JSON>",
    ///   "keyHandle": "<URL-safe base64 key handle>",
    ///   "signatureData": "<URL-safe base64 authentication message>"
    /// }
    /// ```
    ///
    /// # Errors
    ///
    /// - [`Error::DeviceError`] if the client relayed a positive `errorCode`
    /// - [`Error::MalformedResult`] on invalid JSON, a missing key or a
    ///   signature message too short for its flags and counter
    /// - [`Error::Encoding`] on invalid base64
    /// - [`Error::MalformedClientData`] on invalid client data
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawAuthenticationResult =
            serde_json::from_str(json).map_err(|e| Error::MalformedResult(e.to_string()))?;
        check_error_code(raw.error_code)?;

        let client_data = required(raw.client_data, "clientData")?;
        let key_handle = required(raw.key_handle, "keyHandle")?;
        let signature_data = required(raw.signature_data, "signatureData")?;

        Self::new(
            urlsafe_decode(&client_data)?,
            key_handle,
            urlsafe_decode(&signature_data)?,
        )
    }

    /// Build from already decoded client data JSON and authentication message
    pub fn new(
        client_data_json: Vec<u8>,
        key_handle: impl Into<String>,
        signature_data: Vec<u8>,
    ) -> Result<Self> {
        let client_data = ClientData::from_json(&client_data_json)?;
        let signature_data = SignatureData::parse(signature_data)?;

        Ok(Self {
            client_data_json,
            client_data,
            key_handle: key_handle.into(),
            signature_data,
        })
    }

    /// Parsed client data
    pub fn client_data(&self) -> &ClientData {
        &self.client_data
    }

    /// Client data exactly as signed
    pub fn client_data_json(&self) -> &[u8] {
        &self.client_data_json
    }

    /// Key handle the client says it used, URL-safe base64
    pub fn key_handle(&self) -> &str {
        &self.key_handle
    }

    /// Binary authentication message
    pub fn signature_data(&self) -> &SignatureData {
        &self.signature_data
    }

    /// Raw user presence flags
    pub fn user_presence(&self) -> u8 {
        self.signature_data.user_presence()
    }

    /// Whether the device asserted user presence
    pub fn user_present(&self) -> bool {
        self.signature_data.user_present()
    }

    /// Signature counter reported by the device
    pub fn counter(&self) -> u32 {
        self.signature_data.counter()
    }

    /// Authentication signature
    pub fn signature(&self) -> &[u8] {
        self.signature_data.signature()
    }

    /// Bytes the authentication signature must cover for `app_id`
    pub fn signed_data(&self, app_id: &str) -> Vec<u8> {
        self.signature_data
            .signed_data(app_id, &self.client_data_json)
    }
}
