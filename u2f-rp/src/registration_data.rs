//! Binary registration data returned by a security key
//!
//! Layout of a U2F registration response message (raw message formats §4.3):
//!
//! ```text
//! offset  length        field
//! 0       1             reserved byte (0x05 on conforming devices)
//! 1       65            user public key, uncompressed P-256 point
//! 66      1             key handle length L
//! 67      L             key handle
//! 67+L    variable      attestation certificate, X.509 DER
//! ...     remainder     ECDSA signature, DER
//! ```
//!
//! The certificate carries no explicit length; it is taken from its outer
//! DER SEQUENCE header.

use crate::error::{Error, Result};

use u2f_rp_crypto::digest::sha256;
use u2f_rp_crypto::ecdsa::PUBLIC_KEY_LENGTH;

/// Offset of the user public key
pub const PUBLIC_KEY_OFFSET: usize = 1;
/// Offset of the key handle length byte
pub const KEY_HANDLE_LENGTH_OFFSET: usize = PUBLIC_KEY_OFFSET + PUBLIC_KEY_LENGTH;
/// Offset of the key handle
pub const KEY_HANDLE_OFFSET: usize = KEY_HANDLE_LENGTH_OFFSET + 1;

/// DER tag of a constructed SEQUENCE
const DER_SEQUENCE_TAG: u8 = 0x30;
/// Longest long-form length accepted, in bytes
const DER_MAX_LENGTH_OCTETS: usize = 4;

/// Reserved byte of the registration message signature base
const REGISTRATION_SIGNATURE_PREFIX: u8 = 0x00;

/// Header of a DER SEQUENCE (tag and length octets)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DerHeader {
    /// Tag byte plus all length octets
    pub header_length: usize,
    /// Length of the SEQUENCE contents
    pub content_length: usize,
}

impl DerHeader {
    /// Parse the SEQUENCE header at the start of `bytes`
    ///
    /// Short form lengths (high bit clear) are the content length. In long
    /// form the low seven bits count the big-endian length octets that
    /// follow. Indefinite lengths are not DER and are rejected.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AttestationDecode`] if the tag is not SEQUENCE or
    /// the header is truncated.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let (&tag, rest) = bytes.split_first().ok_or(Error::AttestationDecode)?;
        if tag != DER_SEQUENCE_TAG {
            return Err(Error::AttestationDecode);
        }

        let (&length, rest) = rest.split_first().ok_or(Error::AttestationDecode)?;
        if length & 0x80 == 0 {
            return Ok(Self {
                header_length: 2,
                content_length: usize::from(length),
            });
        }

        let octets = usize::from(length & 0x7f);
        if octets == 0 || octets > DER_MAX_LENGTH_OCTETS {
            return Err(Error::AttestationDecode);
        }
        let length_bytes = rest.get(..octets).ok_or(Error::AttestationDecode)?;
        let content_length = length_bytes
            .iter()
            .fold(0usize, |acc, &b| (acc << 8) | usize::from(b));

        Ok(Self {
            header_length: 2 + octets,
            content_length,
        })
    }

    /// Size of the whole TLV: header plus contents
    pub fn total_length(&self) -> Result<usize> {
        self.header_length
            .checked_add(self.content_length)
            .ok_or(Error::AttestationDecode)
    }
}

/// Registration data with its field boundaries validated
///
/// Field values are borrowed from the raw message on access; only the
/// lengths that locate them are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationData {
    raw: Vec<u8>,
    key_handle_length: usize,
    certificate_length: usize,
}

impl RegistrationData {
    /// Validate the layout of a raw registration message
    ///
    /// # Errors
    ///
    /// Returns [`Error::AttestationDecode`] if the message is shorter than
    /// its own length fields claim or the certificate header is malformed.
    pub fn parse(raw: Vec<u8>) -> Result<Self> {
        let key_handle_length = usize::from(
            *raw.get(KEY_HANDLE_LENGTH_OFFSET)
                .ok_or(Error::AttestationDecode)?,
        );

        let certificate_offset = KEY_HANDLE_OFFSET + key_handle_length;
        let certificate = raw
            .get(certificate_offset..)
            .ok_or(Error::AttestationDecode)?;
        let certificate_length = DerHeader::parse(certificate)?.total_length()?;
        if certificate_length > certificate.len() {
            return Err(Error::AttestationDecode);
        }

        Ok(Self {
            raw,
            key_handle_length,
            certificate_length,
        })
    }

    /// The complete raw message
    pub fn as_bytes(&self) -> &[u8] {
        &self.raw
    }

    /// Reserved leading byte
    pub fn reserved_byte(&self) -> u8 {
        self.raw[0]
    }

    /// User public key, always 65 bytes
    pub fn public_key_raw(&self) -> &[u8] {
        &self.raw[PUBLIC_KEY_OFFSET..KEY_HANDLE_LENGTH_OFFSET]
    }

    /// Key handle length as declared by the device
    pub fn key_handle_length(&self) -> usize {
        self.key_handle_length
    }

    /// Raw key handle
    pub fn key_handle_raw(&self) -> &[u8] {
        &self.raw[KEY_HANDLE_OFFSET..self.certificate_offset()]
    }

    /// Attestation certificate, DER encoded
    pub fn certificate_raw(&self) -> &[u8] {
        let offset = self.certificate_offset();
        &self.raw[offset..offset + self.certificate_length]
    }

    /// Attestation signature: everything after the certificate
    pub fn signature(&self) -> &[u8] {
        &self.raw[self.certificate_offset() + self.certificate_length..]
    }

    /// Bytes covered by the attestation signature
    ///
    /// `0x00 || SHA-256(app_id) || SHA-256(client_data) || key handle || public key`
    pub fn signed_data(&self, app_id: &str, client_data_json: &[u8]) -> Vec<u8> {
        let key_handle = self.key_handle_raw();
        let public_key = self.public_key_raw();

        let mut data = Vec::with_capacity(1 + 32 + 32 + key_handle.len() + public_key.len());
        data.push(REGISTRATION_SIGNATURE_PREFIX);
        data.extend_from_slice(&sha256(app_id));
        data.extend_from_slice(&sha256(client_data_json));
        data.extend_from_slice(key_handle);
        data.extend_from_slice(public_key);
        data
    }

    fn certificate_offset(&self) -> usize {
        KEY_HANDLE_OFFSET + self.key_handle_length
    }
}
