//! U2F relying party engine
//!
//! Issues challenges and requests, and validates what security keys send
//! back. The engine keeps no state besides its configuration: issued
//! challenges, registrations and counters are stored by the caller and
//! passed in, so one `U2f` can be shared freely between threads.

use crate::config::U2fConfig;
use crate::encoding::urlsafe_encode;
use crate::error::{Error, Result};
use crate::registration::Registration;
use crate::request::{AuthenticationRequest, RegistrationRequest};
use crate::response::{AuthenticationResult, RegistrationResult};

use rand::rngs::OsRng;
use rand::RngCore;
use u2f_rp_crypto::{certificate, ecdsa, pem, CryptoError};

/// Number of random bytes in a challenge
pub const CHALLENGE_LENGTH: usize = 32;

/// U2F relying party
#[derive(Debug, Clone)]
pub struct U2f {
    config: U2fConfig,
}

impl U2f {
    /// Create an engine with the default configuration for `app_id`
    pub fn new(app_id: impl Into<String>) -> Self {
        Self::with_config(U2fConfig::new(app_id))
    }

    /// Create an engine with an explicit configuration
    pub fn with_config(config: U2fConfig) -> Self {
        Self { config }
    }

    /// Application identifier challenges are bound to
    pub fn app_id(&self) -> &str {
        &self.config.app_id
    }

    /// Active configuration
    pub fn config(&self) -> &U2fConfig {
        &self.config
    }

    /// Encode a raw public key as PEM
    ///
    /// # Errors
    ///
    /// Returns [`Error::PublicKeyDecode`] unless `public_key` is 65 bytes
    /// starting with 0x04.
    pub fn public_key_pem(public_key: &[u8]) -> Result<String> {
        pem::public_key_pem(public_key).map_err(|_| Error::PublicKeyDecode)
    }

    /// Generate a fresh challenge
    ///
    /// 32 bytes from the operating system CSPRNG, URL-safe base64 encoded
    /// without padding.
    pub fn challenge(&self) -> String {
        let mut challenge = [0u8; CHALLENGE_LENGTH];
        OsRng.fill_bytes(&mut challenge);
        urlsafe_encode(challenge)
    }

    /// Requests for registering a new security key
    ///
    /// One request per configured protocol version, each with its own
    /// challenge. The caller must keep the challenges for [`U2f::register`].
    pub fn registration_requests(&self) -> Vec<RegistrationRequest> {
        let requests: Vec<RegistrationRequest> = self
            .config
            .versions
            .iter()
            .map(|&version| RegistrationRequest::new(version, self.challenge(), self.app_id()))
            .collect();
        tracing::debug!(count = requests.len(), "Issued registration requests");
        requests
    }

    /// Requests for authenticating with previously registered keys
    ///
    /// One request per key handle, each with its own challenge. A single key
    /// handle can be passed as `[key_handle]` or `Some(key_handle)`.
    pub fn authentication_requests<I, S>(&self, key_handles: I) -> Vec<AuthenticationRequest>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let version = self.config.versions.first().copied().unwrap_or_default();
        let requests: Vec<AuthenticationRequest> = key_handles
            .into_iter()
            .map(|key_handle| {
                AuthenticationRequest::new(version, self.challenge(), self.app_id(), key_handle)
            })
            .collect();
        tracing::debug!(count = requests.len(), "Issued authentication requests");
        requests
    }

    /// Validate a registration result and create the registration record
    ///
    /// Checks, in order: the result answers one of `challenges`, the client
    /// data is a registration, the user public key is a well-formed P-256
    /// point, and the attestation signature verifies with the key from the
    /// attestation certificate.
    ///
    /// The attestation certificate itself is **not** validated against any
    /// trust anchor: any self-signed certificate is accepted. Relying parties
    /// that need to restrict device models must check
    /// [`RegistrationResult::certificate_raw`] themselves.
    ///
    /// The returned registration has a zero counter; storing it is up to the
    /// caller.
    ///
    /// # Errors
    ///
    /// - [`Error::UnmatchedChallenge`] if no challenge matches
    /// - [`Error::ClientDataType`] if the client data is not a registration
    /// - [`Error::PublicKeyDecode`] if the user public key is malformed
    /// - [`Error::AttestationDecode`] if the certificate cannot be parsed
    /// - [`Error::AttestationSignature`] if the signature does not verify
    pub fn register<I, S>(&self, challenges: I, result: &RegistrationResult) -> Result<Registration>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        match self.verify_registration(challenges, result) {
            Ok(registration) => {
                tracing::debug!(key_handle = %registration.key_handle, "Registered security key");
                Ok(registration)
            }
            Err(e) => {
                tracing::warn!(kind = e.kind(), "Registration rejected");
                Err(e)
            }
        }
    }

    fn verify_registration<I, S>(
        &self,
        challenges: I,
        result: &RegistrationResult,
    ) -> Result<Registration>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let client_data = result.client_data();
        if !matches_challenge(challenges, &client_data.challenge) {
            return Err(Error::UnmatchedChallenge);
        }

        if !client_data.is_registration() {
            return Err(Error::ClientDataType);
        }

        pem::public_key_der(result.public_key_raw()).map_err(|_| Error::PublicKeyDecode)?;

        certificate::verify(
            result.certificate_raw(),
            &result.signed_data(self.app_id()),
            result.signature(),
        )
        .map_err(|e| match e {
            CryptoError::InvalidCertificate => Error::AttestationDecode,
            _ => Error::AttestationSignature,
        })?;

        Ok(Registration::new(
            result.key_handle(),
            result.public_key_raw().to_vec(),
            result.certificate_raw().to_vec(),
        ))
    }

    /// Validate an authentication result against a registered public key
    ///
    /// Checks, in order: the result answers one of `challenges`, the client
    /// data is an authentication, the registered public key is well formed,
    /// the signature verifies, the user was present, and the counter moved
    /// forward according to the configured [`CounterPolicy`](crate::CounterPolicy).
    ///
    /// Returns the counter presented by the device. The caller must persist
    /// it and serialize concurrent authentications per key handle.
    ///
    /// # Errors
    ///
    /// - [`Error::NoMatchingRequest`] if no challenge matches
    /// - [`Error::ClientDataType`] if the client data is not an authentication
    /// - [`Error::PublicKeyDecode`] if `public_key` is malformed
    /// - [`Error::AuthenticationFailed`] if the signature does not verify
    /// - [`Error::UserNotPresent`] if the user presence bit is clear
    /// - [`Error::CounterTooLow`] if the counter did not advance
    pub fn authenticate<I, S>(
        &self,
        challenges: I,
        result: &AuthenticationResult,
        public_key: &[u8],
        counter: u32,
    ) -> Result<u32>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        match self.verify_authentication(challenges, result, public_key, counter) {
            Ok(counter) => {
                tracing::debug!(key_handle = result.key_handle(), counter, "Authenticated");
                Ok(counter)
            }
            Err(e) => {
                tracing::warn!(
                    kind = e.kind(),
                    key_handle = result.key_handle(),
                    "Authentication rejected"
                );
                Err(e)
            }
        }
    }

    fn verify_authentication<I, S>(
        &self,
        challenges: I,
        result: &AuthenticationResult,
        public_key: &[u8],
        counter: u32,
    ) -> Result<u32>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let client_data = result.client_data();
        if !matches_challenge(challenges, &client_data.challenge) {
            return Err(Error::NoMatchingRequest);
        }

        if !client_data.is_authentication() {
            return Err(Error::ClientDataType);
        }

        let key = ecdsa::verifying_key(public_key).map_err(|_| Error::PublicKeyDecode)?;

        ecdsa::verify_with_key(&key, &result.signed_data(self.app_id()), result.signature())
            .map_err(|_| Error::AuthenticationFailed)?;

        if !result.user_present() {
            return Err(Error::UserNotPresent);
        }

        let presented = result.counter();
        if !self.config.counter_policy.accepts(counter, presented) {
            return Err(Error::CounterTooLow {
                stored: counter,
                presented,
            });
        }

        Ok(presented)
    }

    /// Validate an authentication result against a set of registrations
    ///
    /// Picks the registration whose key handle the result names, runs
    /// [`U2f::authenticate`] with it, and returns that registration with
    /// the new counter.
    ///
    /// # Errors
    ///
    /// [`Error::NoMatchingRegistration`] if no registration has the result's
    /// key handle, otherwise the errors of [`U2f::authenticate`].
    pub fn authenticate_registration<I, S>(
        &self,
        challenges: I,
        result: &AuthenticationResult,
        registrations: &[Registration],
    ) -> Result<Registration>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let Some(registration) = registrations
            .iter()
            .find(|registration| registration.key_handle == result.key_handle())
        else {
            tracing::warn!(
                kind = Error::NoMatchingRegistration.kind(),
                key_handle = result.key_handle(),
                "Authentication rejected"
            );
            return Err(Error::NoMatchingRegistration);
        };

        let counter = self.authenticate(
            challenges,
            result,
            &registration.public_key,
            registration.counter,
        )?;
        Ok(registration.with_counter(counter))
    }
}

fn matches_challenge<I, S>(challenges: I, challenge: &str) -> bool
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    challenges
        .into_iter()
        .any(|candidate| candidate.as_ref() == challenge)
}
