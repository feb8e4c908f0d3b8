//! End-to-end encrypt/decrypt through the public library API

use cryptkit::{
    decrypt, encrypt, CipherFault, CryptError, Cryptor, DecryptOptions, EncryptOptions, Encoding,
    KdfParams, Settings,
};

const PASSWORD: &str = "aaaaaaaaaaaaaaaaaaaaaaaa";
const SALT: &str = "bbbbbbbbbbbbbbbb";

fn fast_settings() -> Settings {
    Settings {
        kdf: KdfParams::new(4, 8, 1),
        ..Settings::default()
    }
}

fn static_key(len: usize) -> String {
    (0..len as u8).map(|b| format!("{:02x}", b)).collect()
}

#[test]
fn test_hello_world_with_default_settings() {
    let options = EncryptOptions::with_password(PASSWORD, SALT);
    let result = encrypt("hello world", &options).unwrap();

    assert_eq!(result.message, "Encrypted successfully");
    // "hello world" pads to a single 16-byte block
    assert_eq!(result.value.len(), 32);
    assert!(result.value.chars().all(|c| c.is_ascii_hexdigit()));
    let iv = result.iv.unwrap();
    assert_eq!(iv.len(), 32);

    let plaintext = decrypt(&result.value, &iv, &DecryptOptions::with_password(PASSWORD, SALT))
        .unwrap();
    assert_eq!(plaintext, "hello world");
}

#[test]
fn test_every_mode_with_password() {
    let settings = fast_settings();
    let cryptor = Cryptor::new(&settings);
    let payload = "The quick brown fox jumps over the lazy dog, twice over.";

    for bits in [128, 192, 256] {
        for mode in ["cbc", "cfb", "cfb8", "ofb", "ctr", "gcm"] {
            let algorithm = format!("aes-{}-{}", bits, mode);
            let options = EncryptOptions::with_password(PASSWORD, SALT).algorithm(&algorithm);

            let result = cryptor.encrypt(payload, &options).unwrap();
            let iv = result.iv.clone().unwrap();
            let plaintext = cryptor
                .decrypt(&result.value, &iv, &DecryptOptions::from(&options))
                .unwrap();
            assert_eq!(plaintext, payload, "{}", algorithm);
        }
    }
}

#[test]
fn test_every_mode_with_static_key() {
    let settings = fast_settings();
    let cryptor = Cryptor::new(&settings);

    for (bits, key_len) in [(128, 16), (192, 24), (256, 32)] {
        for mode in ["cbc", "cfb", "cfb8", "ofb", "ctr", "gcm"] {
            let algorithm = format!("aes-{}-{}", bits, mode);
            let options = EncryptOptions::with_static_key(static_key(key_len), Encoding::Hex)
                .algorithm(&algorithm)
                .encoding_output(Encoding::Base64);

            let result = cryptor.encrypt("static key payload", &options).unwrap();
            let iv = result.iv.clone().unwrap();
            assert_eq!(iv.len(), 24, "base64 of 16 bytes");

            let plaintext = cryptor
                .decrypt(&result.value, &iv, &DecryptOptions::from(&options))
                .unwrap();
            assert_eq!(plaintext, "static key payload", "{}", algorithm);
        }
    }
}

#[test]
fn test_multibyte_payload() {
    let settings = fast_settings();
    let cryptor = Cryptor::new(&settings);
    let options = EncryptOptions::with_password(PASSWORD, SALT).algorithm("aes-128-ctr");
    let payload = "grüße, 世界 🌍";

    let result = cryptor.encrypt(payload, &options).unwrap();
    let plaintext = cryptor
        .decrypt(&result.value, &result.iv.unwrap(), &DecryptOptions::from(&options))
        .unwrap();
    assert_eq!(plaintext, payload);
}

#[test]
fn test_fresh_iv_per_encryption() {
    let settings = fast_settings();
    let cryptor = Cryptor::new(&settings);
    let options = EncryptOptions::with_password(PASSWORD, SALT);

    let first = cryptor.encrypt("same payload", &options).unwrap();
    let second = cryptor.encrypt("same payload", &options).unwrap();
    assert_ne!(first.iv, second.iv);
    assert_ne!(first.value, second.value);
}

#[test]
fn test_static_iv_omits_iv_and_is_deterministic() {
    let settings = fast_settings();
    let cryptor = Cryptor::new(&settings);
    let iv = "AAECAwQFBgcICQoLDA0ODw==";
    let options = EncryptOptions::with_password(PASSWORD, SALT).static_iv(iv, Encoding::Base64);

    let first = cryptor.encrypt("repeat", &options).unwrap();
    let second = cryptor.encrypt("repeat", &options).unwrap();
    assert!(first.iv.is_none());
    assert_eq!(first.value, second.value);

    let json = serde_json::to_value(&first).unwrap();
    assert!(json.get("iv").is_none());

    let decrypt_options =
        DecryptOptions::with_password(PASSWORD, SALT).iv_encoding_input(Encoding::Base64);
    let plaintext = cryptor.decrypt(&first.value, iv, &decrypt_options).unwrap();
    assert_eq!(plaintext, "repeat");
}

#[test]
fn test_include_logs_does_not_change_result() {
    let settings = fast_settings();
    let cryptor = Cryptor::new(&settings);
    let iv = "000102030405060708090a0b0c0d0e0f";
    let quiet =
        EncryptOptions::with_static_key(static_key(32), Encoding::Hex).static_iv(iv, Encoding::Hex);
    let logged = quiet.clone().include_logs(true);

    let without_logs = cryptor.encrypt("observational", &quiet).unwrap();
    let with_logs = cryptor.encrypt("observational", &logged).unwrap();
    assert_eq!(without_logs.value, with_logs.value);
    assert!(without_logs.iv.is_none());
    assert!(with_logs.iv.is_none());

    let decrypt_options = DecryptOptions::from(&logged).include_logs(true);
    let plaintext = cryptor
        .decrypt(&with_logs.value, iv, &decrypt_options)
        .unwrap();
    assert_eq!(plaintext, "observational");
}

#[test]
fn test_iv_encoding_can_differ_from_payload_encoding() {
    let settings = fast_settings();
    let cryptor = Cryptor::new(&settings);
    let options = EncryptOptions::with_password(PASSWORD, SALT);

    let result = cryptor.encrypt("mixed encodings", &options).unwrap();
    let iv_hex = result.iv.unwrap();
    let iv_base64 = Encoding::Base64.encode(&Encoding::Hex.decode(&iv_hex).unwrap());

    let decrypt_options =
        DecryptOptions::with_password(PASSWORD, SALT).iv_encoding_input(Encoding::Base64);
    let plaintext = cryptor
        .decrypt(&result.value, &iv_base64, &decrypt_options)
        .unwrap();
    assert_eq!(plaintext, "mixed encodings");
}

#[test]
fn test_missing_key_source() {
    let err = encrypt("payload", &EncryptOptions::default()).unwrap_err();
    assert!(matches!(err, CryptError::MissingKeySource));

    let err = decrypt("00", "00", &DecryptOptions::default()).unwrap_err();
    assert!(matches!(err, CryptError::MissingKeySource));
}

#[test]
fn test_wrong_password_fails_cbc() {
    let settings = fast_settings();
    let cryptor = Cryptor::new(&settings);
    let options = EncryptOptions::with_password(PASSWORD, SALT);
    let result = cryptor.encrypt("secret message", &options).unwrap();

    let wrong = DecryptOptions::with_password("cccccccccccccccccccccccc", SALT);
    match cryptor.decrypt(&result.value, &result.iv.unwrap(), &wrong) {
        // a wrong key almost always breaks the padding, otherwise the output differs
        Err(err) => assert!(matches!(err, CryptError::Decryption { .. })),
        Ok(plaintext) => assert_ne!(plaintext, "secret message"),
    }
}

#[test]
fn test_tampered_gcm_ciphertext_rejected() {
    let settings = fast_settings();
    let cryptor = Cryptor::new(&settings);
    let options = EncryptOptions::with_password(PASSWORD, SALT).algorithm("aes-256-gcm");
    let result = cryptor.encrypt("authenticated", &options).unwrap();

    let mut bytes = Encoding::Hex.decode(&result.value).unwrap();
    bytes[0] ^= 0x01;
    let tampered = Encoding::Hex.encode(&bytes);

    let err = cryptor
        .decrypt(&tampered, &result.iv.unwrap(), &DecryptOptions::from(&options))
        .unwrap_err();
    assert!(matches!(
        err,
        CryptError::Decryption {
            source: CipherFault::Authentication
        }
    ));
}

#[test]
fn test_undecodable_ciphertext() {
    let settings = fast_settings();
    let cryptor = Cryptor::new(&settings);
    let options = DecryptOptions::with_password(PASSWORD, SALT);

    let err = cryptor
        .decrypt("zz-not-hex", "000102030405060708090a0b0c0d0e0f", &options)
        .unwrap_err();
    assert!(matches!(
        err,
        CryptError::Decryption {
            source: CipherFault::Hex(_)
        }
    ));
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn test_invalid_options_carry_every_issue() {
    let options = EncryptOptions::with_password("short", "tiny")
        .algorithm("aes-256-ecb")
        .static_iv("0011", Encoding::Hex);

    let err = encrypt("payload", &options).unwrap_err();
    let issues = err.validation_errors().unwrap();
    assert!(issues.len() >= 4);
    for field in ["password", "salt", "algorithm", "staticIV"] {
        assert!(issues.has_issue_at(field), "{}", field);
    }
    assert!(err.to_string().starts_with("Invalid encrypt options"));
}
