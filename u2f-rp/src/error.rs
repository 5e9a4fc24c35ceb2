//! Error types for U2F registration and authentication
//!
//! Every variant means "rejected". Callers should answer untrusted clients
//! with a generic failure and keep [`Error::kind`] for server-side logs.

use thiserror::Error;

/// Error code carried by a device result in place of a response
///
/// Values follow the `ErrorCode` enumeration of the U2F JavaScript API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceErrorCode {
    /// An error otherwise not enumerated
    OtherError,
    /// The request cannot be processed
    BadRequest,
    /// Client configuration is not supported
    ConfigurationUnsupported,
    /// The presented device is not eligible for this request
    DeviceIneligible,
    /// Timeout reached before request could be satisfied
    Timeout,
    /// A code outside the documented range
    Unknown(u64),
}

impl From<u64> for DeviceErrorCode {
    fn from(code: u64) -> Self {
        match code {
            1 => Self::OtherError,
            2 => Self::BadRequest,
            3 => Self::ConfigurationUnsupported,
            4 => Self::DeviceIneligible,
            5 => Self::Timeout,
            other => Self::Unknown(other),
        }
    }
}

impl DeviceErrorCode {
    /// Numeric code as reported by the client
    pub fn code(&self) -> u64 {
        match self {
            Self::OtherError => 1,
            Self::BadRequest => 2,
            Self::ConfigurationUnsupported => 3,
            Self::DeviceIneligible => 4,
            Self::Timeout => 5,
            Self::Unknown(code) => *code,
        }
    }
}

/// Error type for U2F operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Registration result answers none of the issued challenges
    #[error("Challenge does not match any issued registration challenge")]
    UnmatchedChallenge,
    /// Client data type does not match the operation
    #[error("Client data has the wrong type for this operation")]
    ClientDataType,
    /// Public key is not a 65-byte uncompressed P-256 point
    #[error("Public key could not be decoded")]
    PublicKeyDecode,
    /// Registration data or its certificate is malformed
    #[error("Attestation data could not be decoded")]
    AttestationDecode,
    /// Attestation signature does not verify
    #[error("Attestation signature is invalid")]
    AttestationSignature,
    /// Authentication result answers none of the issued challenges
    #[error("No authentication request matches the response challenge")]
    NoMatchingRequest,
    /// No stored registration carries the result's key handle
    #[error("No registration matches the response key handle")]
    NoMatchingRegistration,
    /// Counter did not advance past the stored value
    #[error("Counter is too low: stored {stored}, presented {presented}")]
    CounterTooLow { stored: u32, presented: u32 },
    /// Authentication signature does not verify
    #[error("Authentication signature is invalid")]
    AuthenticationFailed,
    /// User presence flag is not set
    #[error("User was not present")]
    UserNotPresent,
    /// Base64 input could not be decoded
    #[error("Invalid base64 encoding")]
    Encoding,
    /// Client data JSON is invalid or incomplete
    #[error("Client data is malformed")]
    MalformedClientData,
    /// Device result JSON is invalid or incomplete
    #[error("Device result is malformed: {0}")]
    MalformedResult(String),
    /// Device reported an error instead of a result
    #[error("Device returned error code {}", .0.code())]
    DeviceError(DeviceErrorCode),
}

impl Error {
    /// Stable name of the error kind, suitable for logs and metrics labels
    pub fn kind(&self) -> &'static str {
        match self {
            Error::UnmatchedChallenge => "unmatched_challenge",
            Error::ClientDataType => "client_data_type",
            Error::PublicKeyDecode => "public_key_decode",
            Error::AttestationDecode => "attestation_decode",
            Error::AttestationSignature => "attestation_signature",
            Error::NoMatchingRequest => "no_matching_request",
            Error::NoMatchingRegistration => "no_matching_registration",
            Error::CounterTooLow { .. } => "counter_too_low",
            Error::AuthenticationFailed => "authentication_failed",
            Error::UserNotPresent => "user_not_present",
            Error::Encoding => "encoding",
            Error::MalformedClientData => "malformed_client_data",
            Error::MalformedResult(_) => "malformed_result",
            Error::DeviceError(_) => "device_error",
        }
    }
}

/// Result type alias for common operations
pub type Result<T> = std::result::Result<T, Error>;
