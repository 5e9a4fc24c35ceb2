//! URL-safe base64 as used on the U2F wire
//!
//! Challenges, client data, key handles and binary device payloads all
//! travel as URL-safe base64. Padding is stripped when encoding, and
//! restored before decoding since clients are inconsistent about it. Some
//! clients also send the standard `+` and `/` characters, which decode to
//! the same bytes as `-` and `_`.

use crate::error::{Error, Result};

use base64::prelude::*;

/// Encode bytes as URL-safe base64 without `=` padding
pub fn urlsafe_encode(data: impl AsRef<[u8]>) -> String {
    BASE64_URL_SAFE_NO_PAD.encode(data)
}

/// Decode URL-safe base64, with or without `=` padding
///
/// `+` and `/` are read as `-` and `_`. Missing padding is restored to the
/// next multiple of four before decoding. Input that is still invalid fails
/// with [`Error::Encoding`].
pub fn urlsafe_decode(encoded: &str) -> Result<Vec<u8>> {
    let mut padded: String = encoded
        .chars()
        .map(|c| match c {
            '+' => '-',
            '/' => '_',
            c => c,
        })
        .collect();
    while padded.len() % 4 != 0 {
        padded.push('=');
    }

    BASE64_URL_SAFE.decode(padded).map_err(|_| Error::Encoding)
}
