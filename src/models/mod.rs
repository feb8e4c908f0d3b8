//! Core data models for cryptkit
//!
//! This module contains the data structures that describe a cipher operation:
//! algorithm names, encodings, the tagged options union and the encryption
//! result.

pub mod algorithm;
pub mod encoding;
pub mod options;
pub mod result;

pub use algorithm::{Algorithm, AlgorithmError, CipherMode, KeySize, DEFAULT_ALGORITHM, IV_LENGTH};
pub use encoding::{Encoding, TextEncoding};
pub use options::{CommonOptions, CryptographyOptions, DecryptOptions, EncryptOptions, Operation};
pub use result::{EncryptionResult, ENCRYPTED_MESSAGE};
