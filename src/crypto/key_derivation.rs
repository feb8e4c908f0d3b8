//! Key derivation using scrypt
//!
//! Derives encryption keys from a password and salt with scrypt, a
//! memory-hard key derivation function. Keys can also come straight from an
//! encoded static key; [`KeySource`] captures which of the two a set of
//! options uses.

use scrypt::Params;
use serde::{Deserialize, Serialize};

use super::SecureBytes;
use crate::error::{CipherFault, CryptError, CryptResult};
use crate::models::{CommonOptions, Encoding};

/// Cost parameters for scrypt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KdfParams {
    /// log2 of the CPU/memory cost N (default: 14, i.e. N = 16384)
    #[serde(default = "default_log_n")]
    pub log_n: u8,
    /// Block size (default: 8)
    #[serde(default = "default_r")]
    pub r: u32,
    /// Parallelism (default: 1)
    #[serde(default = "default_p")]
    pub p: u32,
}

fn default_log_n() -> u8 {
    14
}

fn default_r() -> u32 {
    8
}

fn default_p() -> u32 {
    1
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            log_n: default_log_n(),
            r: default_r(),
            p: default_p(),
        }
    }
}

impl KdfParams {
    pub fn new(log_n: u8, r: u32, p: u32) -> Self {
        Self { log_n, r, p }
    }

    fn to_scrypt(self, key_len: usize) -> Result<Params, CipherFault> {
        Params::new(self.log_n, self.r, self.p, key_len)
            .map_err(|e| CipherFault::Kdf(format!("invalid scrypt parameters: {}", e)))
    }

    /// Check the parameters without deriving anything
    pub fn check(&self) -> Result<(), CipherFault> {
        self.to_scrypt(32).map(|_| ())
    }
}

/// Derive a `key_len`-byte key from a password and salt
///
/// The same inputs always produce the same key.
pub fn derive_key(
    password: &str,
    salt: &str,
    key_len: usize,
    params: &KdfParams,
) -> Result<SecureBytes, CipherFault> {
    let scrypt_params = params.to_scrypt(key_len)?;

    let mut key = SecureBytes::zeroed(key_len);
    scrypt::scrypt(
        password.as_bytes(),
        salt.as_bytes(),
        &scrypt_params,
        key.as_bytes_mut(),
    )
    .map_err(|e| CipherFault::Kdf(e.to_string()))?;

    Ok(key)
}

/// Where the key for an operation comes from
#[derive(Debug, Clone, Copy)]
pub enum KeySource<'a> {
    /// Derive with scrypt
    Password { password: &'a str, salt: &'a str },
    /// Decode an encoded static key
    Static { key: &'a str, encoding: Encoding },
}

impl<'a> KeySource<'a> {
    /// Pick the key source configured in `options`
    ///
    /// Password and salt take precedence over a static key. Validated options
    /// never carry both.
    ///
    /// # Errors
    ///
    /// Returns [`CryptError::MissingKeySource`] when neither a complete
    /// password/salt pair nor a static key with its encoding is present.
    pub fn resolve(options: &'a CommonOptions) -> CryptResult<Self> {
        if let (Some(password), Some(salt)) = (&options.password, &options.salt) {
            return Ok(Self::Password {
                password: password.as_str(),
                salt: salt.as_str(),
            });
        }

        if let (Some(key), Some(encoding)) = (&options.static_key, options.static_key_encoding) {
            return Ok(Self::Static {
                key: key.as_str(),
                encoding,
            });
        }

        Err(CryptError::MissingKeySource)
    }

    /// Short label for diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Password { .. } => "scrypt",
            Self::Static { .. } => "static",
        }
    }

    /// Produce the key bytes
    ///
    /// `key_len` applies to derived keys only; a static key is returned at its
    /// decoded length.
    pub fn key(&self, key_len: usize, params: &KdfParams) -> Result<SecureBytes, CipherFault> {
        match *self {
            Self::Password { password, salt } => derive_key(password, salt, key_len, params),
            Self::Static { key, encoding } => decode_static_key(key, encoding),
        }
    }
}

/// Decode a static key; a pure function of the string and its encoding
pub fn decode_static_key(key: &str, encoding: Encoding) -> Result<SecureBytes, CipherFault> {
    encoding.decode(key).map(SecureBytes::from)
}
