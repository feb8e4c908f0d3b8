//! AES algorithm names
//!
//! Algorithms are written `aes-{128|192|256}-{mode}`, the naming used by
//! OpenSSL. The bit size fixes the key length; every supported mode takes a
//! 16-byte IV.

use std::fmt;
use std::str::FromStr;

/// Algorithm used when the options do not name one
pub const DEFAULT_ALGORITHM: Algorithm = Algorithm {
    key_size: KeySize::Aes256,
    mode: CipherMode::Cbc,
};

/// IV (or GCM nonce) length in bytes for every supported mode
pub const IV_LENGTH: usize = 16;

/// AES key size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeySize {
    Aes128,
    Aes192,
    Aes256,
}

impl KeySize {
    /// Size in bits, as written in the algorithm name
    pub fn bits(self) -> u16 {
        match self {
            Self::Aes128 => 128,
            Self::Aes192 => 192,
            Self::Aes256 => 256,
        }
    }

    /// Required key length in bytes
    pub fn key_len(self) -> usize {
        usize::from(self.bits()) / 8
    }

    fn from_bits(bits: &str) -> Option<Self> {
        match bits {
            "128" => Some(Self::Aes128),
            "192" => Some(Self::Aes192),
            "256" => Some(Self::Aes256),
            _ => None,
        }
    }
}

/// Block cipher mode of operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CipherMode {
    /// Cipher block chaining with PKCS#7 padding
    Cbc,
    /// 128-bit cipher feedback
    Cfb,
    /// 8-bit cipher feedback
    Cfb8,
    /// Output feedback
    Ofb,
    /// Counter mode, 128-bit big-endian counter
    Ctr,
    /// Galois/counter mode; the 16-byte tag is appended to the ciphertext
    Gcm,
}

impl CipherMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cbc => "cbc",
            Self::Cfb => "cfb",
            Self::Cfb8 => "cfb8",
            Self::Ofb => "ofb",
            Self::Ctr => "ctr",
            Self::Gcm => "gcm",
        }
    }
}

/// A parsed `aes-{bits}-{mode}` algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Algorithm {
    key_size: KeySize,
    mode: CipherMode,
}

impl Algorithm {
    pub fn new(key_size: KeySize, mode: CipherMode) -> Self {
        Self { key_size, mode }
    }

    pub fn key_size(&self) -> KeySize {
        self.key_size
    }

    pub fn mode(&self) -> CipherMode {
        self.mode
    }

    /// Key length in bytes required by this algorithm
    pub fn key_len(&self) -> usize {
        self.key_size.key_len()
    }

    /// IV length in bytes required by this algorithm
    pub fn iv_len(&self) -> usize {
        IV_LENGTH
    }
}

impl Default for Algorithm {
    fn default() -> Self {
        DEFAULT_ALGORITHM
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "aes-{}-{}", self.key_size.bits(), self.mode.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = AlgorithmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();

        let rest = name
            .strip_prefix("aes-")
            .ok_or_else(|| AlgorithmError::Malformed(s.to_string()))?;
        let (bits, mode) = rest
            .split_once('-')
            .ok_or_else(|| AlgorithmError::Malformed(s.to_string()))?;

        let key_size =
            KeySize::from_bits(bits).ok_or_else(|| AlgorithmError::KeySize(bits.to_string()))?;

        let mode = match mode {
            "cbc" => CipherMode::Cbc,
            "cfb" | "cfb128" => CipherMode::Cfb,
            "cfb8" => CipherMode::Cfb8,
            "ofb" => CipherMode::Ofb,
            "ctr" => CipherMode::Ctr,
            "gcm" => CipherMode::Gcm,
            "ecb" => return Err(AlgorithmError::Ecb),
            other => return Err(AlgorithmError::Mode(other.to_string())),
        };

        Ok(Self { key_size, mode })
    }
}

/// Reasons an algorithm name is rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlgorithmError {
    Malformed(String),
    KeySize(String),
    Mode(String),
    Ecb,
}

impl fmt::Display for AlgorithmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed(name) => write!(
                f,
                "Algorithm '{}' must have the form aes-<128|192|256>-<mode>",
                name
            ),
            Self::KeySize(bits) => write!(
                f,
                "Unsupported AES key size '{}': expected 128, 192 or 256",
                bits
            ),
            Self::Mode(mode) => write!(
                f,
                "Unsupported cipher mode '{}': expected one of cbc, cfb, cfb8, ofb, ctr, gcm",
                mode
            ),
            Self::Ecb => write!(
                f,
                "ECB mode is not allowed: it does not use an IV and leaks plaintext patterns"
            ),
        }
    }
}

impl std::error::Error for AlgorithmError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_default_name() {
        let algorithm: Algorithm = "aes-256-cbc".parse().unwrap();
        assert_eq!(algorithm, DEFAULT_ALGORITHM);
        assert_eq!(algorithm.key_len(), 32);
        assert_eq!(algorithm.to_string(), "aes-256-cbc");
    }

    #[test]
    fn test_key_length_follows_bits() {
        assert_eq!("aes-128-ctr".parse::<Algorithm>().unwrap().key_len(), 16);
        assert_eq!("aes-192-ofb".parse::<Algorithm>().unwrap().key_len(), 24);
        assert_eq!("aes-256-gcm".parse::<Algorithm>().unwrap().key_len(), 32);
    }

    #[test]
    fn test_parse_is_case_and_whitespace_insensitive() {
        let algorithm: Algorithm = "  AES-128-CFB8 ".parse().unwrap();
        assert_eq!(algorithm.mode(), CipherMode::Cfb8);
        assert_eq!(algorithm.key_size(), KeySize::Aes128);
    }

    #[test]
    fn test_ecb_rejected() {
        for bits in ["128", "192", "256"] {
            let name = format!("aes-{}-ecb", bits);
            assert_eq!(name.parse::<Algorithm>(), Err(AlgorithmError::Ecb));
        }
    }

    #[test]
    fn test_unknown_key_size_rejected() {
        assert_eq!(
            "aes-512-cbc".parse::<Algorithm>(),
            Err(AlgorithmError::KeySize("512".into()))
        );
    }

    #[test]
    fn test_unknown_mode_rejected() {
        assert!(matches!(
            "aes-256-xts".parse::<Algorithm>(),
            Err(AlgorithmError::Mode(_))
        ));
    }

    #[test]
    fn test_malformed_rejected() {
        assert!(matches!(
            "des-ede3-cbc".parse::<Algorithm>(),
            Err(AlgorithmError::Malformed(_))
        ));
        assert!(matches!(
            "aes256".parse::<Algorithm>(),
            Err(AlgorithmError::Malformed(_))
        ));
    }
}
