//! Cryptographic functions for cryptkit
//!
//! AES in six modes of operation, scrypt key derivation and zeroizing
//! containers for secrets. Nothing here knows about option validation.

pub mod encryption;
pub mod key_derivation;
pub mod secure_memory;

pub use encryption::{generate_iv, generate_key, IvSuggestion};
pub use key_derivation::{decode_static_key, derive_key, KdfParams, KeySource};
pub use secure_memory::{SecureBytes, SecureString};
