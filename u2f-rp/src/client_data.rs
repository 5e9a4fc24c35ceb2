//! Client data: what the browser asked the device to sign
//!
//! See chapter 7 of the FIDO U2F raw message formats:
//! <https://fidoalliance.org/specs/fido-u2f-v1.2-ps-20170411/fido-u2f-raw-message-formats-v1.2-ps-20170411.html>

use crate::error::{Error, Result};

use serde::{Deserialize, Serialize};

/// `typ` value of client data produced for a registration
pub const REGISTRATION_TYP: &str = "navigator.id.finishEnrollment";

/// `typ` value of client data produced for an authentication
pub const AUTHENTICATION_TYP: &str = "navigator.id.getAssertion";

/// Operation the client data was produced for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ClientDataType {
    /// `navigator.id.finishEnrollment`
    Registration,
    /// `navigator.id.getAssertion`
    Authentication,
    /// Any other value; kept so the mismatch can be reported as a type error
    Other(String),
}

impl From<String> for ClientDataType {
    fn from(typ: String) -> Self {
        match typ.as_str() {
            REGISTRATION_TYP => Self::Registration,
            AUTHENTICATION_TYP => Self::Authentication,
            _ => Self::Other(typ),
        }
    }
}

impl From<ClientDataType> for String {
    fn from(typ: ClientDataType) -> Self {
        match typ {
            ClientDataType::Registration => REGISTRATION_TYP.to_string(),
            ClientDataType::Authentication => AUTHENTICATION_TYP.to_string(),
            ClientDataType::Other(other) => other,
        }
    }
}

/// Wire shape of client data
///
/// Unknown keys such as `cid_pubkey` are ignored.
#[derive(Deserialize)]
struct RawClientData {
    typ: Option<ClientDataType>,
    #[serde(rename = "type")]
    type_: Option<ClientDataType>,
    challenge: String,
    origin: String,
}

impl TryFrom<RawClientData> for ClientData {
    type Error = &'static str;

    fn try_from(raw: RawClientData) -> core::result::Result<Self, Self::Error> {
        // `typ` wins when a client sends both keys
        let typ = raw.typ.or(raw.type_).ok_or("missing field `typ`")?;
        Ok(Self {
            typ,
            challenge: raw.challenge,
            origin: raw.origin,
        })
    }
}

/// Parsed client data envelope
///
/// All three fields are required; the wire name of the type field is `typ`
/// (`type` is accepted as well).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawClientData")]
pub struct ClientData {
    /// Operation type
    pub typ: ClientDataType,
    /// Challenge echoed back by the client, URL-safe base64
    pub challenge: String,
    /// Facet the request came from
    pub origin: String,
}

impl ClientData {
    /// Create client data for the given operation
    pub fn new(typ: ClientDataType, challenge: impl Into<String>, origin: impl Into<String>) -> Self {
        Self {
            typ,
            challenge: challenge.into(),
            origin: origin.into(),
        }
    }

    /// Parse client data from its JSON bytes
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedClientData`] if the input is not JSON or a
    /// required key is missing.
    pub fn from_json(json: &[u8]) -> Result<Self> {
        serde_json::from_slice(json).map_err(|_| Error::MalformedClientData)
    }

    /// Serialize to JSON bytes
    pub fn to_json(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }

    /// Whether this client data was produced for a registration
    pub fn is_registration(&self) -> bool {
        self.typ == ClientDataType::Registration
    }

    /// Whether this client data was produced for an authentication
    pub fn is_authentication(&self) -> bool {
        self.typ == ClientDataType::Authentication
    }
}
