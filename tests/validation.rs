//! Validation of raw option objects through the public API

use cryptkit::validation::validate_for_with;
use cryptkit::{validate, validate_for, Operation, Settings};
use serde_json::{json, Value};

const PASSWORD: &str = "aaaaaaaaaaaaaaaaaaaaaaaa";
const SALT: &str = "bbbbbbbbbbbbbbbb";

fn hex_bytes(len: usize) -> String {
    "ab".repeat(len)
}

fn encrypt_with(extra: Value) -> Value {
    let mut raw = json!({"operation": "encrypt", "password": PASSWORD, "salt": SALT});
    if let (Some(map), Some(extra)) = (raw.as_object_mut(), extra.as_object()) {
        for (k, v) in extra {
            map.insert(k.clone(), v.clone());
        }
    }
    raw
}

#[test]
fn test_minimal_options_accepted() {
    let options = validate(&encrypt_with(json!({}))).unwrap();
    assert_eq!(options.operation(), Operation::Encrypt);

    let options = validate_for(
        Operation::Decrypt,
        &json!({"staticKey": hex_bytes(32), "staticKeyEncoding": "hex"}),
    )
    .unwrap();
    assert_eq!(options.operation(), Operation::Decrypt);
}

#[test]
fn test_independent_violations_all_reported() {
    let raw = json!({
        "operation": "encrypt",
        "algorithm": "aes-512-cbc",
        "password": "short",
        "salt": "tiny",
        "staticIV": hex_bytes(4),
        "staticIVEncoding": "hex",
        "encodingOutput": "base32",
        "unexpected": true,
    });
    let errors = validate(&raw).unwrap_err();
    assert!(errors.len() >= 6, "{}", errors);
    for field in [
        "algorithm",
        "password",
        "salt",
        "staticIV",
        "encodingOutput",
        "unexpected",
    ] {
        assert!(errors.has_issue_at(field), "no issue for {}", field);
    }
}

#[test]
fn test_static_iv_must_be_sixteen_bytes() {
    for len in [15, 17] {
        let raw = encrypt_with(json!({"staticIV": hex_bytes(len), "staticIVEncoding": "hex"}));
        let errors = validate(&raw).unwrap_err();
        let message = errors.messages_for("staticIV").next().unwrap().to_string();
        assert!(message.contains(&format!("got {} bytes", len)), "{}", message);
        assert!(message.contains("Example valid IVs"));
    }

    let raw = encrypt_with(json!({"staticIV": hex_bytes(16), "staticIVEncoding": "hex"}));
    assert!(validate(&raw).is_ok());
}

#[test]
fn test_static_iv_requires_encoding() {
    let raw = encrypt_with(json!({"staticIV": hex_bytes(16)}));
    let errors = validate(&raw).unwrap_err();
    assert!(errors.has_issue_at("staticIVEncoding"));
}

#[test]
fn test_static_key_length_checked_against_algorithm() {
    let raw = json!({
        "operation": "encrypt",
        "algorithm": "aes-128-cbc",
        "staticKey": hex_bytes(24),
        "staticKeyEncoding": "hex",
    });
    let errors = validate(&raw).unwrap_err();
    let message = errors.messages_for("staticKey").next().unwrap();
    assert!(message.contains("must be 16 bytes"), "{}", message);
    assert!(message.contains("got 24 bytes"), "{}", message);
}

#[test]
fn test_static_key_length_uses_default_algorithm() {
    let raw = json!({
        "operation": "decrypt",
        "staticKey": hex_bytes(16),
        "staticKeyEncoding": "hex",
    });
    let errors = validate(&raw).unwrap_err();
    assert!(errors
        .messages_for("staticKey")
        .any(|m| m.contains("must be 32 bytes")));
}

#[test]
fn test_password_salt_with_static_key_flags_both() {
    let raw = encrypt_with(json!({"staticKey": hex_bytes(32), "staticKeyEncoding": "hex"}));
    let errors = validate(&raw).unwrap_err();
    assert!(errors
        .messages_for("password")
        .any(|m| m.contains("unnecessary")));
    assert!(errors.messages_for("salt").any(|m| m.contains("unnecessary")));
}

#[test]
fn test_ecb_always_rejected() {
    let variants = [
        encrypt_with(json!({"algorithm": "aes-256-ecb"})),
        json!({"operation": "decrypt", "algorithm": "AES-128-ECB",
               "staticKey": hex_bytes(16), "staticKeyEncoding": "hex"}),
    ];
    for raw in variants {
        let errors = validate(&raw).unwrap_err();
        assert!(errors
            .messages_for("algorithm")
            .any(|m| m.contains("ECB")));
    }
}

#[test]
fn test_password_and_salt_pairing() {
    let errors = validate(&json!({"operation": "encrypt", "password": PASSWORD})).unwrap_err();
    assert!(errors.has_issue_at("salt"));

    let errors = validate(&json!({"operation": "decrypt", "salt": SALT})).unwrap_err();
    assert!(errors.has_issue_at("password"));
}

#[test]
fn test_key_length_must_match_algorithm() {
    let raw = encrypt_with(json!({"algorithm": "aes-192-ctr", "keyLength": 32}));
    let errors = validate(&raw).unwrap_err();
    assert!(errors
        .messages_for("keyLength")
        .any(|m| m.contains("24-byte")));

    let raw = encrypt_with(json!({"algorithm": "aes-192-ctr", "keyLength": 24}));
    assert!(validate(&raw).is_ok());
}

#[test]
fn test_operation_mismatch() {
    let raw = encrypt_with(json!({}));
    let errors = validate_for(Operation::Decrypt, &raw).unwrap_err();
    assert!(errors.has_issue_at("operation"));
    assert_eq!(errors.operation(), Some(Operation::Decrypt));
}

#[test]
fn test_settings_limits_apply() {
    let mut settings = Settings::default();
    settings.validation.min_salt_length = 20;

    let errors = validate_for_with(Operation::Encrypt, &encrypt_with(json!({})), &settings)
        .unwrap_err();
    assert!(errors
        .messages_for("salt")
        .any(|m| m.contains("minimum of 20")));
}

#[test]
fn test_not_an_object() {
    let errors = validate(&json!("encrypt")).unwrap_err();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.issues()[0].message, "Expected object, received string");
    assert!(errors.operation().is_none());
}
