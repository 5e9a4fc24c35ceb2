//! SHA-256 message digest
//!
//! U2F fixes the digest for application parameters, challenge parameters and
//! ECDSA signatures to SHA-256. It is a compile-time choice here rather than
//! a runtime setting.

use sha2::{Digest, Sha256};

/// Digest algorithm used for every U2F hash and signature
pub type MessageDigest = Sha256;

/// Length in bytes of a [`MessageDigest`] output
pub const DIGEST_LENGTH: usize = 32;

/// Hash `data` with [`MessageDigest`]
///
/// # Examples
///
/// ```
/// use u2f_rp_crypto::digest;
///
/// let hash = digest::sha256(b"https://example.com");
/// assert_eq!(hash.len(), digest::DIGEST_LENGTH);
/// ```
pub fn sha256(data: impl AsRef<[u8]>) -> [u8; DIGEST_LENGTH] {
    MessageDigest::digest(data.as_ref()).into()
}
