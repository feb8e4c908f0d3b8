//! Cryptography options
//!
//! Options are a tagged union on [`Operation`]. Both variants share
//! [`CommonOptions`]; the encoding fields differ by direction, so an encrypt
//! configuration can never carry a decrypt-only field and vice versa.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::algorithm::{Algorithm, AlgorithmError, DEFAULT_ALGORITHM};
use super::encoding::{Encoding, TextEncoding};
use crate::crypto::SecureString;

/// Direction of a cipher operation, the discriminant of [`CryptographyOptions`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Encrypt,
    Decrypt,
}

impl Operation {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Encrypt => "encrypt",
            Self::Decrypt => "decrypt",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "encrypt" => Some(Self::Encrypt),
            "decrypt" => Some(Self::Decrypt),
            _ => None,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fields shared by encrypt and decrypt options
#[derive(Debug, Clone, Default)]
pub struct CommonOptions {
    /// `aes-{128|192|256}-{mode}`; defaults to `aes-256-cbc`
    pub algorithm: Option<String>,
    pub password: Option<SecureString>,
    pub salt: Option<SecureString>,
    /// Derived key length in bytes; inferred from the algorithm when absent
    pub key_length: Option<usize>,
    pub static_key: Option<SecureString>,
    pub static_key_encoding: Option<Encoding>,
    /// Emit diagnostic events; never changes the computed values
    pub include_logs: bool,
}

impl CommonOptions {
    /// The configured algorithm, or the default when none is set
    pub fn resolved_algorithm(&self) -> Result<Algorithm, AlgorithmError> {
        match &self.algorithm {
            Some(name) => name.parse(),
            None => Ok(DEFAULT_ALGORITHM),
        }
    }

    /// Key length in bytes: the explicit `key_length`, else the algorithm's
    pub fn resolved_key_length(&self, algorithm: &Algorithm) -> usize {
        self.key_length.unwrap_or_else(|| algorithm.key_len())
    }

    pub fn has_static_key_pair(&self) -> bool {
        self.static_key.is_some() && self.static_key_encoding.is_some()
    }

    /// Trimmed and lower-cased copy, as returned by a successful validation
    pub(crate) fn normalized(&self) -> Self {
        Self {
            algorithm: self
                .algorithm
                .as_ref()
                .map(|a| a.trim().to_ascii_lowercase()),
            password: self.password.as_ref().map(SecureString::trimmed),
            salt: self.salt.as_ref().map(SecureString::trimmed),
            key_length: self.key_length,
            static_key: self.static_key.as_ref().map(SecureString::trimmed),
            static_key_encoding: self.static_key_encoding,
            include_logs: self.include_logs,
        }
    }
}

/// Options for [`encrypt`](crate::encrypt)
#[derive(Debug, Clone, Default)]
pub struct EncryptOptions {
    pub common: CommonOptions,
    /// Plaintext encoding; always UTF-8
    pub encoding_input: Option<TextEncoding>,
    /// Ciphertext and IV encoding; defaults to hex
    pub encoding_output: Option<Encoding>,
    /// Fixed IV. Reusing an IV leaks equality of plaintext blocks, and the
    /// result omits the IV when one is set.
    pub static_iv: Option<String>,
    pub static_iv_encoding: Option<Encoding>,
}

impl EncryptOptions {
    /// Options deriving the key from a password and salt
    pub fn with_password(password: impl Into<SecureString>, salt: impl Into<SecureString>) -> Self {
        Self {
            common: CommonOptions {
                password: Some(password.into()),
                salt: Some(salt.into()),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Options using an encoded static key
    pub fn with_static_key(key: impl Into<SecureString>, encoding: Encoding) -> Self {
        Self {
            common: CommonOptions {
                static_key: Some(key.into()),
                static_key_encoding: Some(encoding),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    pub fn algorithm(mut self, algorithm: impl Into<String>) -> Self {
        self.common.algorithm = Some(algorithm.into());
        self
    }

    pub fn key_length(mut self, key_length: usize) -> Self {
        self.common.key_length = Some(key_length);
        self
    }

    pub fn encoding_output(mut self, encoding: Encoding) -> Self {
        self.encoding_output = Some(encoding);
        self
    }

    pub fn static_iv(mut self, iv: impl Into<String>, encoding: Encoding) -> Self {
        self.static_iv = Some(iv.into());
        self.static_iv_encoding = Some(encoding);
        self
    }

    pub fn include_logs(mut self, include_logs: bool) -> Self {
        self.common.include_logs = include_logs;
        self
    }

    pub fn resolved_encoding_output(&self) -> Encoding {
        self.encoding_output.unwrap_or_default()
    }

    pub(crate) fn normalized(&self) -> Self {
        Self {
            common: self.common.normalized(),
            encoding_input: self.encoding_input,
            encoding_output: self.encoding_output,
            static_iv: self.static_iv.as_ref().map(|iv| iv.trim().to_string()),
            static_iv_encoding: self.static_iv_encoding,
        }
    }
}

/// Options for [`decrypt`](crate::decrypt)
#[derive(Debug, Clone, Default)]
pub struct DecryptOptions {
    pub common: CommonOptions,
    /// Ciphertext encoding; defaults to hex
    pub encoding_input: Option<Encoding>,
    /// IV encoding; falls back to `encoding_input`
    pub iv_encoding_input: Option<Encoding>,
    /// Plaintext encoding; always UTF-8
    pub encoding_output: Option<TextEncoding>,
}

impl DecryptOptions {
    /// Options deriving the key from a password and salt
    pub fn with_password(password: impl Into<SecureString>, salt: impl Into<SecureString>) -> Self {
        Self {
            common: CommonOptions {
                password: Some(password.into()),
                salt: Some(salt.into()),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Options using an encoded static key
    pub fn with_static_key(key: impl Into<SecureString>, encoding: Encoding) -> Self {
        Self {
            common: CommonOptions {
                static_key: Some(key.into()),
                static_key_encoding: Some(encoding),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    pub fn algorithm(mut self, algorithm: impl Into<String>) -> Self {
        self.common.algorithm = Some(algorithm.into());
        self
    }

    pub fn key_length(mut self, key_length: usize) -> Self {
        self.common.key_length = Some(key_length);
        self
    }

    pub fn encoding_input(mut self, encoding: Encoding) -> Self {
        self.encoding_input = Some(encoding);
        self
    }

    pub fn iv_encoding_input(mut self, encoding: Encoding) -> Self {
        self.iv_encoding_input = Some(encoding);
        self
    }

    pub fn include_logs(mut self, include_logs: bool) -> Self {
        self.common.include_logs = include_logs;
        self
    }

    pub fn resolved_encoding_input(&self) -> Encoding {
        self.encoding_input.unwrap_or_default()
    }

    pub fn resolved_iv_encoding(&self) -> Encoding {
        self.iv_encoding_input
            .unwrap_or_else(|| self.resolved_encoding_input())
    }

    pub(crate) fn normalized(&self) -> Self {
        Self {
            common: self.common.normalized(),
            encoding_input: self.encoding_input,
            iv_encoding_input: self.iv_encoding_input,
            encoding_output: self.encoding_output,
        }
    }
}

/// The decrypt-direction counterpart of a set of encrypt options: same key
/// source and algorithm, ciphertext and IV read in the encoding they were
/// written in.
impl From<&EncryptOptions> for DecryptOptions {
    fn from(options: &EncryptOptions) -> Self {
        Self {
            common: options.common.clone(),
            encoding_input: options.encoding_output,
            iv_encoding_input: None,
            encoding_output: None,
        }
    }
}

/// Options tagged with their operation
#[derive(Debug, Clone)]
pub enum CryptographyOptions {
    Encrypt(EncryptOptions),
    Decrypt(DecryptOptions),
}

impl CryptographyOptions {
    pub fn operation(&self) -> Operation {
        match self {
            Self::Encrypt(_) => Operation::Encrypt,
            Self::Decrypt(_) => Operation::Decrypt,
        }
    }

    pub fn common(&self) -> &CommonOptions {
        match self {
            Self::Encrypt(options) => &options.common,
            Self::Decrypt(options) => &options.common,
        }
    }

    pub(crate) fn normalized(&self) -> Self {
        match self {
            Self::Encrypt(options) => Self::Encrypt(options.normalized()),
            Self::Decrypt(options) => Self::Decrypt(options.normalized()),
        }
    }

    pub fn into_encrypt(self) -> Option<EncryptOptions> {
        match self {
            Self::Encrypt(options) => Some(options),
            Self::Decrypt(_) => None,
        }
    }

    pub fn into_decrypt(self) -> Option<DecryptOptions> {
        match self {
            Self::Decrypt(options) => Some(options),
            Self::Encrypt(_) => None,
        }
    }
}

impl From<EncryptOptions> for CryptographyOptions {
    fn from(options: EncryptOptions) -> Self {
        Self::Encrypt(options)
    }
}

impl From<DecryptOptions> for CryptographyOptions {
    fn from(options: DecryptOptions) -> Self {
        Self::Decrypt(options)
    }
}
