//! Cryptor service
//!
//! Runs validated encrypt/decrypt operations against a set of [`Settings`].

use tracing::{info, warn};

use crate::config::Settings;
use crate::crypto::{encryption, generate_iv, KeySource};
use crate::error::{CipherFault, CryptError, CryptResult};
use crate::models::{
    Algorithm, CommonOptions, DecryptOptions, EncryptOptions, EncryptionResult, Operation,
};

/// Service for encrypting and decrypting string payloads
pub struct Cryptor<'a> {
    settings: &'a Settings,
}

impl<'a> Cryptor<'a> {
    /// Create a new cryptor bound to `settings`
    pub fn new(settings: &'a Settings) -> Self {
        Self { settings }
    }

    /// Encrypt `payload`
    ///
    /// A fresh IV is generated for every call unless the options carry a
    /// static IV, in which case the result omits `iv`.
    pub fn encrypt(
        &self,
        payload: &str,
        options: &EncryptOptions,
    ) -> CryptResult<EncryptionResult> {
        let options = options.validate(self.settings)?;
        if payload.is_empty() {
            return Err(CryptError::EmptyPayload(Operation::Encrypt));
        }

        let common = &options.common;
        let algorithm = resolve_algorithm(common).map_err(CryptError::encryption)?;
        let key_len = common.resolved_key_length(&algorithm);
        let source = KeySource::resolve(common)?;
        let encoding = options.resolved_encoding_output();

        if common.include_logs {
            info!(
                algorithm = %algorithm,
                key_source = source.kind(),
                key_length = key_len,
                encoding = encoding.as_str(),
                "Encrypting payload"
            );
        }

        let key = source
            .key(key_len, &self.settings.kdf)
            .map_err(CryptError::encryption)?;

        let (iv, static_iv) = match (&options.static_iv, options.static_iv_encoding) {
            (Some(iv), Some(iv_encoding)) => {
                if common.include_logs {
                    warn!("Using a static IV; the IV is reused across encryptions");
                }
                let iv = iv_encoding.decode(iv).map_err(CryptError::encryption)?;
                (iv, true)
            }
            _ => (generate_iv().to_vec(), false),
        };

        let ciphertext = encryption::encrypt(&algorithm, &key, &iv, payload.as_bytes())
            .map_err(CryptError::encryption)?;

        let iv = if static_iv {
            None
        } else {
            Some(encoding.encode(&iv))
        };

        if common.include_logs {
            info!(ciphertext_bytes = ciphertext.len(), "Encrypted successfully");
        }

        Ok(EncryptionResult::new(encoding.encode(&ciphertext), iv))
    }

    /// Decrypt `payload` using the IV produced at encryption time
    ///
    /// Every failure after validation, whether a decoding error, a wrong key
    /// or IV, bad padding, a failed GCM tag or non-UTF-8 output, is reported
    /// as [`CryptError::Decryption`].
    pub fn decrypt(
        &self,
        payload: &str,
        iv: &str,
        options: &DecryptOptions,
    ) -> CryptResult<String> {
        let options = options.validate(self.settings)?;
        if payload.is_empty() {
            return Err(CryptError::EmptyPayload(Operation::Decrypt));
        }

        let common = &options.common;
        let algorithm = resolve_algorithm(common).map_err(CryptError::decryption)?;
        let key_len = common.resolved_key_length(&algorithm);
        let source = KeySource::resolve(common)?;

        if common.include_logs {
            info!(
                algorithm = %algorithm,
                key_source = source.kind(),
                key_length = key_len,
                encoding = options.resolved_encoding_input().as_str(),
                "Decrypting payload"
            );
        }

        let key = source
            .key(key_len, &self.settings.kdf)
            .map_err(CryptError::decryption)?;

        let iv = options
            .resolved_iv_encoding()
            .decode(iv)
            .map_err(CryptError::decryption)?;
        let ciphertext = options
            .resolved_encoding_input()
            .decode(payload)
            .map_err(CryptError::decryption)?;

        let plaintext = encryption::decrypt(&algorithm, &key, &iv, &ciphertext)
            .map_err(CryptError::decryption)?;

        String::from_utf8(plaintext).map_err(CryptError::decryption)
    }
}

// Validated options always carry a parseable algorithm
fn resolve_algorithm(common: &CommonOptions) -> Result<Algorithm, CipherFault> {
    common
        .resolved_algorithm()
        .map_err(|e| CipherFault::Algorithm(e.to_string()))
}
