//! Service layer for cryptkit
//!
//! The service layer ties option validation, key resolution and the cipher
//! engine together into the public encrypt/decrypt operations.

pub mod cryptor;

pub use cryptor::Cryptor;
