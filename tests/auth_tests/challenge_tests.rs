//! Tests for the challenge-response digest

use rosapi::auth::challenge_response;
use rosapi::RosError;

#[test]
fn test_known_vector() {
    // MD5(0x00 || "pw" || 01 02 .. 10)
    let response = challenge_response("pw", "0102030405060708090a0b0c0d0e0f10").unwrap();
    assert_eq!(response, "00cfd35aa8db9bce1dac1ef015aace39e2");
}

#[test]
fn test_response_shape() {
    let response = challenge_response("secret", crate::common::CHALLENGE).unwrap();
    assert_eq!(response.len(), 34);
    assert!(response.starts_with("00"));
    assert!(response
        .chars()
        .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
}

#[test]
fn test_uppercase_challenge_is_accepted() {
    let lower = challenge_response("pw", "0102030405060708090a0b0c0d0e0f10").unwrap();
    let upper = challenge_response("pw", "0102030405060708090A0B0C0D0E0F10").unwrap();
    assert_eq!(lower, upper);
}

#[test]
fn test_password_changes_response() {
    let a = challenge_response("pw", crate::common::CHALLENGE).unwrap();
    let b = challenge_response("pw2", crate::common::CHALLENGE).unwrap();
    assert_ne!(a, b);
}

#[test]
fn test_malformed_challenge() {
    let result = challenge_response("pw", "not-hex");
    assert!(matches!(result, Err(RosError::AuthenticationFailed(_))));
}
