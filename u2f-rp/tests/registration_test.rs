//! Registration ceremony tests
//!
//! Registration results come from [`common::FakeDevice`], which signs with
//! a real P-256 key certified by a self-signed attestation certificate.

mod common;

use base64::prelude::*;
use common::{FakeDevice, TEST_APP_ID};

use u2f_rp::client_data::{AUTHENTICATION_TYP, REGISTRATION_TYP};
use u2f_rp::registration_data::KEY_HANDLE_OFFSET;
use u2f_rp::{DeviceErrorCode, Error, RegistrationResult, U2f};

fn setup() -> (U2f, FakeDevice, String) {
    let u2f = U2f::new(TEST_APP_ID);
    let device = FakeDevice::new(TEST_APP_ID);
    let challenge = u2f.challenge();
    (u2f, device, challenge)
}

fn certificate_offset(device: &FakeDevice) -> usize {
    KEY_HANDLE_OFFSET + device.key_handle_raw.len()
}

#[test]
fn test_register_returns_registration() {
    let (u2f, device, challenge) = setup();
    let result = RegistrationResult::from_json(&device.register_response(&challenge)).unwrap();

    let registration = u2f.register([&challenge], &result).unwrap();

    assert_eq!(registration.key_handle, device.key_handle());
    assert_eq!(registration.public_key, device.origin_public_key_raw());
    assert_eq!(registration.certificate, device.cert_raw());
    assert_eq!(registration.counter, 0);
}

#[test]
fn test_register_parses_device_fields() {
    let (_, device, challenge) = setup();
    let result = RegistrationResult::from_json(&device.register_response(&challenge)).unwrap();

    assert_eq!(result.client_data().challenge, challenge);
    assert_eq!(result.client_data().origin, TEST_APP_ID);
    assert_eq!(result.public_key_raw().len(), 65);
    assert_eq!(result.key_handle_raw(), device.key_handle_raw.as_slice());
    assert_eq!(
        result.registration_data().key_handle_length(),
        device.key_handle_raw.len()
    );
    assert_eq!(result.certificate_raw(), device.cert_raw());
    assert!(!result.signature().is_empty());
}

#[test]
fn test_register_accepts_any_matching_challenge() {
    let (u2f, device, challenge) = setup();
    let result = RegistrationResult::from_json(&device.register_response(&challenge)).unwrap();

    let challenges = vec!["another-challenge".to_string(), challenge.clone()];
    assert!(u2f.register(&challenges, &result).is_ok());
}

#[test]
fn test_register_challenge_set_membership() {
    let u2f = U2f::new(TEST_APP_ID);
    let device = FakeDevice::new(TEST_APP_ID);

    let result = RegistrationResult::from_json(&device.register_response("b")).unwrap();
    assert!(u2f.register(["a", "b"], &result).is_ok());

    let result = RegistrationResult::from_json(&device.register_response("c")).unwrap();
    assert_eq!(
        u2f.register(["a", "b"], &result),
        Err(Error::UnmatchedChallenge)
    );
}

#[test]
fn test_register_unknown_challenge() {
    let (u2f, device, challenge) = setup();
    let result = RegistrationResult::from_json(&device.register_response(&challenge)).unwrap();

    assert_eq!(
        u2f.register(["non-matching"], &result),
        Err(Error::UnmatchedChallenge)
    );
}

#[test]
fn test_register_wrong_client_data_type() {
    let (u2f, device, challenge) = setup();
    let client_data_json = device.client_data(AUTHENTICATION_TYP, &challenge);
    let json = device
        .register_response_from_parts(&client_data_json, &device.registration_data(&client_data_json));
    let result = RegistrationResult::from_json(&json).unwrap();

    assert_eq!(u2f.register([&challenge], &result), Err(Error::ClientDataType));
}

#[test]
fn test_register_wrong_app_id() {
    let (_, device, challenge) = setup();
    let result = RegistrationResult::from_json(&device.register_response(&challenge)).unwrap();

    let other = U2f::new("https://other.example.com");
    assert_eq!(
        other.register([&challenge], &result),
        Err(Error::AttestationSignature)
    );
}

#[test]
fn test_register_corrupted_signature() {
    let (u2f, device, challenge) = setup();
    let client_data_json = device.client_data(REGISTRATION_TYP, &challenge);

    let mut data = device.registration_data(&client_data_json);
    let last = data.len() - 1;
    data[last] ^= 0x01;
    let result =
        RegistrationResult::from_json(&device.register_response_from_parts(&client_data_json, &data))
            .unwrap();

    assert_eq!(
        u2f.register([&challenge], &result),
        Err(Error::AttestationSignature)
    );
}

#[test]
fn test_register_garbage_signature() {
    let (u2f, device, challenge) = setup();
    let client_data_json = device.client_data(REGISTRATION_TYP, &challenge);

    let mut data = device.registration_data(&client_data_json);
    data.truncate(certificate_offset(&device) + device.cert_raw().len());
    data.extend_from_slice(b"bad signature");
    let result =
        RegistrationResult::from_json(&device.register_response_from_parts(&client_data_json, &data))
            .unwrap();

    assert_eq!(result.signature(), b"bad signature");
    assert_eq!(
        u2f.register([&challenge], &result),
        Err(Error::AttestationSignature)
    );
}

#[test]
fn test_register_bad_public_key_tag() {
    let (u2f, device, challenge) = setup();
    let client_data_json = device.client_data(REGISTRATION_TYP, &challenge);

    let mut data = device.registration_data(&client_data_json);
    data[1] = 0x03;
    let result =
        RegistrationResult::from_json(&device.register_response_from_parts(&client_data_json, &data))
            .unwrap();

    assert_eq!(u2f.register([&challenge], &result), Err(Error::PublicKeyDecode));
}

#[test]
fn test_register_unparseable_certificate() {
    let (u2f, device, challenge) = setup();
    let client_data_json = device.client_data(REGISTRATION_TYP, &challenge);

    // Replace the certificate with a well-formed but meaningless SEQUENCE
    let mut data = device.registration_data(&client_data_json);
    let offset = certificate_offset(&device);
    let signature = data.split_off(offset + device.cert_raw().len());
    data.truncate(offset);
    data.extend_from_slice(&[0x30, 0x03, 0x02, 0x01, 0x00]);
    data.extend_from_slice(&signature);
    let result =
        RegistrationResult::from_json(&device.register_response_from_parts(&client_data_json, &data))
            .unwrap();

    assert_eq!(
        u2f.register([&challenge], &result),
        Err(Error::AttestationDecode)
    );
}

#[test]
fn test_register_malformed_certificate_header() {
    let (_, device, challenge) = setup();
    let client_data_json = device.client_data(REGISTRATION_TYP, &challenge);

    let mut data = device.registration_data(&client_data_json);
    let offset = certificate_offset(&device);
    data[offset] = 0x31;

    assert_eq!(
        RegistrationResult::from_json(&device.register_response_from_parts(&client_data_json, &data)),
        Err(Error::AttestationDecode)
    );
}

#[test]
fn test_register_truncated_message() {
    let (_, device, challenge) = setup();
    let client_data_json = device.client_data(REGISTRATION_TYP, &challenge);

    let mut data = device.registration_data(&client_data_json);
    data.truncate(certificate_offset(&device) + 10);

    assert_eq!(
        RegistrationResult::from_json(&device.register_response_from_parts(&client_data_json, &data)),
        Err(Error::AttestationDecode)
    );
}

#[test]
fn test_register_padded_and_unpadded_payloads() {
    let (u2f, device, challenge) = setup();
    let client_data_json = device.client_data(REGISTRATION_TYP, &challenge);
    let data = device.registration_data(&client_data_json);

    let padded = serde_json::json!({
        "registrationData": BASE64_URL_SAFE.encode(&data),
        "clientData": BASE64_URL_SAFE.encode(&client_data_json),
    })
    .to_string();
    let standard = serde_json::json!({
        "registrationData": BASE64_STANDARD.encode(&data),
        "clientData": BASE64_STANDARD.encode(&client_data_json),
    })
    .to_string();
    let unpadded = device.register_response_from_parts(&client_data_json, &data);

    for json in [padded, standard, unpadded] {
        let result = RegistrationResult::from_json(&json).unwrap();
        assert!(u2f.register([&challenge], &result).is_ok());
    }
}

#[test]
fn test_register_error_response() {
    let result = RegistrationResult::from_json(&FakeDevice::error_response(4));
    assert_eq!(
        result,
        Err(Error::DeviceError(DeviceErrorCode::DeviceIneligible))
    );
    if let Err(Error::DeviceError(code)) = result {
        assert_eq!(code.code(), 4);
    }
}
