//! Custom error types for cryptkit
//!
//! Two tiers of failure are modelled here. Option validation produces a list of
//! [`ValidationIssue`](crate::validation::ValidationIssue)s which the cipher
//! operations wrap into [`CryptError::InvalidOptions`]. Everything that goes
//! wrong while actually encrypting or decrypting is a [`CryptError::Encryption`]
//! or [`CryptError::Decryption`] carrying the low-level [`CipherFault`] as its
//! source.

use thiserror::Error;

use crate::models::Operation;
use crate::validation::ValidationErrors;

/// The main error type for cryptkit operations
#[derive(Error, Debug)]
pub enum CryptError {
    /// The supplied options failed validation
    #[error("Invalid {} options: {}", .0.operation_hint(), .0)]
    InvalidOptions(ValidationErrors),

    /// Neither password + salt nor staticKey + staticKeyEncoding were supplied
    #[error(
        "No key source configured: supply password and salt, or staticKey and staticKeyEncoding"
    )]
    MissingKeySource,

    /// Nothing to encrypt or decrypt
    #[error("Payload is required for the {0} process")]
    EmptyPayload(Operation),

    /// Encryption failed after the options were accepted
    #[error("Error encrypting data: {source}")]
    Encryption {
        #[source]
        source: CipherFault,
    },

    /// Decryption failed (wrong key, wrong IV, corrupt or tampered ciphertext)
    #[error("Error decrypting data. Check the salt or password: {source}")]
    Decryption {
        #[source]
        source: CipherFault,
    },

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON/YAML serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl CryptError {
    /// Wrap a cipher-layer failure raised during encryption
    pub fn encryption(source: impl Into<CipherFault>) -> Self {
        Self::Encryption {
            source: source.into(),
        }
    }

    /// Wrap a cipher-layer failure raised during decryption
    pub fn decryption(source: impl Into<CipherFault>) -> Self {
        Self::Decryption {
            source: source.into(),
        }
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidOptions(_))
    }

    /// The validation issues, if this error came from option validation
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            Self::InvalidOptions(errors) => Some(errors),
            _ => None,
        }
    }
}

impl From<ValidationErrors> for CryptError {
    fn from(errors: ValidationErrors) -> Self {
        Self::InvalidOptions(errors)
    }
}

impl From<std::io::Error> for CryptError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for CryptError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for CryptError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Low-level failures from codecs, the KDF and the cipher engine
#[derive(Error, Debug)]
pub enum CipherFault {
    #[error("invalid hex input: {0}")]
    Hex(#[from] hex::FromHexError),

    #[error("invalid base64 input: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("invalid key length for {algorithm}: expected {expected} bytes, got {actual}")]
    KeyLength {
        algorithm: String,
        expected: usize,
        actual: usize,
    },

    #[error("invalid IV length: expected {expected} bytes, got {actual}")]
    IvLength { expected: usize, actual: usize },

    #[error("invalid key or IV length")]
    InvalidLength,

    #[error("bad decrypt: padding check failed")]
    Padding,

    #[error("unable to authenticate data")]
    Authentication,

    #[error("key derivation failed: {0}")]
    Kdf(String),

    #[error("unsupported algorithm: {0}")]
    Algorithm(String),

    #[error("decrypted data is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

impl From<aes::cipher::InvalidLength> for CipherFault {
    fn from(_: aes::cipher::InvalidLength) -> Self {
        Self::InvalidLength
    }
}

/// Result type alias for cryptkit operations
pub type CryptResult<T> = Result<T, CryptError>;
