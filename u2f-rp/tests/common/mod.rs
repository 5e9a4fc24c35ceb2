//! Common test utilities for u2f-rp integration tests
//!
//! Provides a software security key that produces real, correctly signed
//! registration and authentication results, and an in-memory registration
//! store standing in for the relying party's database.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use p256::ecdsa::{signature::Signer, Signature, SigningKey};
use p256::pkcs8::DecodePrivateKey;
use rand::rngs::OsRng;
use serde_json::json;
use sha2::{Digest, Sha256};

use u2f_rp::client_data::{AUTHENTICATION_TYP, REGISTRATION_TYP};
use u2f_rp::{urlsafe_encode, Registration};

pub const TEST_APP_ID: &str = "http://demo.example.com";

/// Software U2F device
///
/// Holds one application key pair and a self-signed attestation
/// certificate, and answers requests like a browser relaying a real key.
pub struct FakeDevice {
    pub app_id: String,
    pub counter: u32,
    pub key_handle_raw: Vec<u8>,
    origin_key: SigningKey,
    origin_public_key: Vec<u8>,
    cert_key: SigningKey,
    cert_der: Vec<u8>,
}

impl FakeDevice {
    pub fn new(app_id: &str) -> Self {
        let origin_key = SigningKey::random(&mut OsRng);
        let origin_public_key = origin_key
            .verifying_key()
            .to_encoded_point(false)
            .as_bytes()
            .to_vec();

        let attestation_key = rcgen::KeyPair::generate().unwrap();
        let params = rcgen::CertificateParams::new(vec!["U2FTest".to_string()]).unwrap();
        let cert = params.self_signed(&attestation_key).unwrap();
        let cert_key = SigningKey::from_pkcs8_der(&attestation_key.serialize_der()).unwrap();

        Self {
            app_id: app_id.to_string(),
            counter: 0,
            key_handle_raw: rand::random::<[u8; 32]>().to_vec(),
            origin_key,
            origin_public_key,
            cert_key,
            cert_der: cert.der().to_vec(),
        }
    }

    pub fn with_counter(mut self, counter: u32) -> Self {
        self.counter = counter;
        self
    }

    /// Key handle as it appears in requests and registrations
    pub fn key_handle(&self) -> String {
        urlsafe_encode(&self.key_handle_raw)
    }

    /// Application public key, 65-byte uncompressed point
    pub fn origin_public_key_raw(&self) -> &[u8] {
        &self.origin_public_key
    }

    /// Attestation certificate, DER
    pub fn cert_raw(&self) -> &[u8] {
        &self.cert_der
    }

    pub fn client_data(&self, typ: &str, challenge: &str) -> String {
        json!({
            "challenge": challenge,
            "origin": self.app_id,
            "typ": typ,
        })
        .to_string()
    }

    /// Raw registration message signed over `client_data_json`
    pub fn registration_data(&self, client_data_json: &str) -> Vec<u8> {
        let mut signed = vec![0x00];
        signed.extend_from_slice(&Sha256::digest(self.app_id.as_bytes()));
        signed.extend_from_slice(&Sha256::digest(client_data_json.as_bytes()));
        signed.extend_from_slice(&self.key_handle_raw);
        signed.extend_from_slice(&self.origin_public_key);
        let signature = sign_der(&self.cert_key, &signed);

        let mut data = vec![0x05];
        data.extend_from_slice(&self.origin_public_key);
        data.push(self.key_handle_raw.len() as u8);
        data.extend_from_slice(&self.key_handle_raw);
        data.extend_from_slice(&self.cert_der);
        data.extend_from_slice(&signature);
        data
    }

    /// Registration result JSON for `challenge`
    pub fn register_response(&self, challenge: &str) -> String {
        let client_data_json = self.client_data(REGISTRATION_TYP, challenge);
        self.register_response_from_parts(
            &client_data_json,
            &self.registration_data(&client_data_json),
        )
    }

    pub fn register_response_from_parts(&self, client_data_json: &str, data: &[u8]) -> String {
        json!({
            "registrationData": urlsafe_encode(data),
            "clientData": urlsafe_encode(client_data_json),
        })
        .to_string()
    }

    /// Error envelope as relayed by the browser
    pub fn error_response(code: u64) -> String {
        json!({ "errorCode": code }).to_string()
    }

    /// Raw authentication message signed over `client_data_json`
    pub fn signature_data(&self, client_data_json: &str, flags: u8, counter: u32) -> Vec<u8> {
        let mut signed = Vec::new();
        signed.extend_from_slice(&Sha256::digest(self.app_id.as_bytes()));
        signed.push(flags);
        signed.extend_from_slice(&counter.to_be_bytes());
        signed.extend_from_slice(&Sha256::digest(client_data_json.as_bytes()));
        let signature = sign_der(&self.origin_key, &signed);

        let mut data = vec![flags];
        data.extend_from_slice(&counter.to_be_bytes());
        data.extend_from_slice(&signature);
        data
    }

    /// Authentication result JSON for `challenge`, advancing the counter
    pub fn sign_response(&mut self, challenge: &str) -> String {
        self.counter += 1;
        self.sign_response_with(challenge, 0x01, self.counter)
    }

    /// Authentication result JSON with explicit flags and counter
    pub fn sign_response_with(&self, challenge: &str, flags: u8, counter: u32) -> String {
        let client_data_json = self.client_data(AUTHENTICATION_TYP, challenge);
        json!({
            "clientData": urlsafe_encode(&client_data_json),
            "keyHandle": self.key_handle(),
            "signatureData": urlsafe_encode(self.signature_data(&client_data_json, flags, counter)),
        })
        .to_string()
    }
}

/// ES256 signature in the DER form devices put on the wire
fn sign_der(key: &SigningKey, data: &[u8]) -> Vec<u8> {
    let signature: Signature = key.sign(data);
    signature.to_der().as_bytes().to_vec()
}

/// In-memory registration store keyed by key handle
#[derive(Clone, Default)]
pub struct RegistrationStore {
    registrations: Arc<Mutex<HashMap<String, Registration>>>,
}

impl RegistrationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, registration: Registration) {
        let mut store = self.registrations.lock().unwrap();
        store.insert(registration.key_handle.clone(), registration);
    }

    pub fn get(&self, key_handle: &str) -> Option<Registration> {
        let store = self.registrations.lock().unwrap();
        store.get(key_handle).cloned()
    }

    pub fn all(&self) -> Vec<Registration> {
        let store = self.registrations.lock().unwrap();
        store.values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.registrations.lock().unwrap().len()
    }
}
