//! Binary signature data returned by a security key on authentication
//!
//! Layout of a U2F authentication response message (raw message formats §5.4):
//!
//! ```text
//! offset  length     field
//! 0       1          user presence flags (bit 0: user present)
//! 1       4          counter, big-endian
//! 5       remainder  ECDSA signature, DER
//! ```

use crate::error::{Error, Result};

use u2f_rp_crypto::digest::sha256;

/// User presence bit of the flags byte
pub const USER_PRESENT: u8 = 0x01;

const COUNTER_OFFSET: usize = 1;
const SIGNATURE_OFFSET: usize = COUNTER_OFFSET + 4;

/// Signature data with its fixed-size prefix validated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureData {
    raw: Vec<u8>,
}

impl SignatureData {
    /// Validate the layout of a raw authentication message
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedResult`] if the message is too short to
    /// hold the flags and counter.
    pub fn parse(raw: Vec<u8>) -> Result<Self> {
        if raw.len() < SIGNATURE_OFFSET {
            return Err(Error::MalformedResult(format!(
                "signatureData is {} bytes, expected at least {}",
                raw.len(),
                SIGNATURE_OFFSET
            )));
        }
        Ok(Self { raw })
    }

    /// The complete raw message
    pub fn as_bytes(&self) -> &[u8] {
        &self.raw
    }

    /// Raw user presence flags byte
    ///
    /// Bits other than [`USER_PRESENT`] are reserved and left uninterpreted.
    pub fn user_presence(&self) -> u8 {
        self.raw[0]
    }

    /// Whether the device asserted user presence
    pub fn user_present(&self) -> bool {
        self.user_presence() & USER_PRESENT == USER_PRESENT
    }

    /// Signature counter
    pub fn counter(&self) -> u32 {
        let mut counter = [0u8; 4];
        counter.copy_from_slice(&self.raw[COUNTER_OFFSET..SIGNATURE_OFFSET]);
        u32::from_be_bytes(counter)
    }

    /// Authentication signature: everything after the counter
    pub fn signature(&self) -> &[u8] {
        &self.raw[SIGNATURE_OFFSET..]
    }

    /// Bytes covered by the authentication signature
    ///
    /// `SHA-256(app_id) || flags || counter || SHA-256(client_data)`
    pub fn signed_data(&self, app_id: &str, client_data_json: &[u8]) -> Vec<u8> {
        let mut data = Vec::with_capacity(32 + SIGNATURE_OFFSET + 32);
        data.extend_from_slice(&sha256(app_id));
        data.extend_from_slice(&self.raw[..SIGNATURE_OFFSET]);
        data.extend_from_slice(&sha256(client_data_json));
        data
    }
}
