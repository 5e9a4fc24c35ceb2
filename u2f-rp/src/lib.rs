#![warn(unused_extern_crates)]

//! # u2f-rp
//!
//! Server-side (relying party) verification for FIDO U2F security keys.
//!
//! The crate turns the two U2F ceremonies into plain function calls:
//!
//! - **Registration**: issue [`RegistrationRequest`]s, parse the device's
//!   [`RegistrationResult`], verify its attestation signature and get back a
//!   [`Registration`] to store.
//! - **Authentication**: issue [`AuthenticationRequest`]s for stored key
//!   handles, parse the [`AuthenticationResult`], verify its signature, user
//!   presence and counter.
//!
//! Transport, session handling and credential storage stay with the caller.
//! Attestation certificates are not checked against a trust anchor.
//!
//! ## Example
//!
//! ```no_run
//! # fn main() -> Result<(), u2f_rp::Error> {
//! use u2f_rp::{AuthenticationResult, RegistrationResult, U2f};
//!
//! let u2f = U2f::new("https://example.com");
//!
//! // Registration
//! let requests = u2f.registration_requests();
//! let challenges: Vec<String> = requests.iter().map(|r| r.challenge().to_string()).collect();
//! # let response_json = String::new();
//! let result = RegistrationResult::from_json(&response_json)?;
//! let registration = u2f.register(&challenges, &result)?;
//!
//! // Authentication
//! let requests = u2f.authentication_requests([registration.key_handle.clone()]);
//! let challenges: Vec<String> = requests.iter().map(|r| r.challenge().to_string()).collect();
//! # let response_json = String::new();
//! let result = AuthenticationResult::from_json(&response_json)?;
//! let counter = u2f.authenticate(
//!     &challenges,
//!     &result,
//!     &registration.public_key,
//!     registration.counter,
//! )?;
//! # let _ = counter;
//! # Ok(())
//! # }
//! ```

pub mod client_data;
pub mod config;
pub mod encoding;
pub mod error;
pub mod registration;
pub mod registration_data;
pub mod request;
pub mod response;
pub mod signature_data;
pub mod u2f;

// Re-export main types at root level for convenience
pub use client_data::{ClientData, ClientDataType};
pub use config::{CounterPolicy, U2fConfig, U2fConfigBuilder};
pub use encoding::{urlsafe_decode, urlsafe_encode};
pub use error::{DeviceErrorCode, Error, Result};
pub use registration::Registration;
pub use request::{AuthenticationRequest, ProtocolVersion, RegistrationRequest};
pub use response::{AuthenticationResult, RegistrationResult};
pub use u2f::U2f;
