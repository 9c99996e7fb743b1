//! Unit tests for request signature verification.

use rstest::rstest;

use super::support::{TIMESTAMP, other_signing_key, sign, sign_with, verifier};
use crate::interaction::domain::{BadSignature, PublicKeyError, SignatureVerifier};

const BODY: &[u8] = br#"{"type":1}"#;

fn flip(bytes: &mut [u8], index: usize) {
    if let Some(byte) = bytes.get_mut(index) {
        *byte ^= 0x01;
    }
}

#[rstest]
fn valid_signature_verifies() {
    let signature = sign(BODY);

    assert_eq!(verifier().verify(BODY, TIMESTAMP, &signature), Ok(()));
}

#[rstest]
#[case::first(0)]
#[case::middle(4)]
#[case::last(9)]
fn mutated_body_is_rejected(#[case] index: usize) {
    let signature = sign(BODY);
    let mut body = BODY.to_vec();
    flip(&mut body, index);

    assert_eq!(
        verifier().verify(&body, TIMESTAMP, &signature),
        Err(BadSignature)
    );
}

#[rstest]
fn mutated_timestamp_is_rejected() {
    let signature = sign(BODY);

    assert_eq!(
        verifier().verify(BODY, "1700000001", &signature),
        Err(BadSignature)
    );
}

#[rstest]
#[case::first(0)]
#[case::last(63)]
fn mutated_signature_is_rejected(#[case] index: usize) {
    let mut raw = hex::decode(sign(BODY)).expect("signature is hex");
    flip(&mut raw, index);

    assert_eq!(
        verifier().verify(BODY, TIMESTAMP, &hex::encode(raw)),
        Err(BadSignature)
    );
}

#[rstest]
fn signature_from_another_key_is_rejected() {
    let signature = sign_with(&other_signing_key(), TIMESTAMP, BODY);

    assert_eq!(
        verifier().verify(BODY, TIMESTAMP, &signature),
        Err(BadSignature)
    );
}

#[rstest]
#[case::not_hex("zz")]
#[case::too_short("abcd")]
#[case::empty("")]
fn malformed_signature_is_rejected(#[case] signature: &str) {
    assert_eq!(
        verifier().verify(BODY, TIMESTAMP, signature),
        Err(BadSignature)
    );
}

#[rstest]
fn public_key_loads_from_padded_hex() {
    let hex_key = format!(" {} \n", hex::encode(verifier().key().as_bytes()));

    let loaded = SignatureVerifier::from_hex(&hex_key).expect("key should load");

    assert_eq!(loaded, verifier());
}

#[rstest]
fn public_key_rejects_bad_hex() {
    let error = SignatureVerifier::from_hex("not-hex").expect_err("hex is invalid");

    assert!(matches!(error, PublicKeyError::InvalidHex(_)));
}

#[rstest]
fn public_key_rejects_wrong_length() {
    let error = SignatureVerifier::from_hex("abcdef").expect_err("key is too short");

    assert_eq!(error, PublicKeyError::InvalidLength(3));
}
