//! cryptkit - validated AES encryption of string payloads
//!
//! This library encrypts and decrypts UTF-8 strings with AES in CBC, CFB,
//! CFB8, OFB, CTR or GCM mode. Keys are either derived from a password and
//! salt with scrypt, or supplied directly as an encoded static key. Every set
//! of options is validated up front and all problems are reported together.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Settings (validation limits, scrypt cost)
//! - `error`: Custom error types
//! - `models`: Algorithms, encodings, options and results
//! - `validation`: Option validation with accumulated issues
//! - `crypto`: Cipher engine, key derivation and secret handling
//! - `services`: The [`Cryptor`] service running the operations
//! - `cli`: Command handlers for the `cryptkit` binary
//!
//! # Example
//!
//! ```rust,no_run
//! use cryptkit::{decrypt, encrypt, DecryptOptions, EncryptOptions};
//!
//! let options = EncryptOptions::with_password("aaaaaaaaaaaaaaaaaaaaaaaa", "bbbbbbbbbbbbbbbb");
//! let result = encrypt("hello world", &options)?;
//! let iv = result.iv.as_deref().unwrap_or_default();
//! let plaintext = decrypt(&result.value, iv, &DecryptOptions::from(&options))?;
//! assert_eq!(plaintext, "hello world");
//! # Ok::<(), cryptkit::CryptError>(())
//! ```

pub mod cli;
pub mod config;
pub mod crypto;
pub mod error;
pub mod models;
pub mod services;
pub mod validation;

pub use config::Settings;
pub use crypto::{derive_key, generate_iv, generate_key, IvSuggestion, KdfParams, KeySource};
pub use error::{CipherFault, CryptError, CryptResult};
pub use models::{
    Algorithm, CryptographyOptions, DecryptOptions, EncryptOptions, EncryptionResult, Encoding,
    Operation,
};
pub use services::Cryptor;
pub use validation::{
    validate, validate_for, ValidationErrors, ValidationIssue, ValidationResult,
};

/// Encrypt `payload` with default [`Settings`]
pub fn encrypt(payload: &str, options: &EncryptOptions) -> CryptResult<EncryptionResult> {
    Cryptor::new(&Settings::default()).encrypt(payload, options)
}

/// Decrypt `payload` with default [`Settings`]
pub fn decrypt(payload: &str, iv: &str, options: &DecryptOptions) -> CryptResult<String> {
    Cryptor::new(&Settings::default()).decrypt(payload, iv, options)
}
