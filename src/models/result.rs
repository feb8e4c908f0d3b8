//! Encryption output

use serde::{Deserialize, Serialize};

/// Message returned with every successful encryption
pub const ENCRYPTED_MESSAGE: &str = "Encrypted successfully";

/// Ciphertext and IV produced by [`encrypt`](crate::encrypt)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptionResult {
    pub message: String,
    /// Encoded IV; absent when a static IV was configured
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iv: Option<String>,
    /// Encoded ciphertext (with the GCM tag appended for `gcm` algorithms)
    pub value: String,
}

impl EncryptionResult {
    pub fn new(value: String, iv: Option<String>) -> Self {
        Self {
            message: ENCRYPTED_MESSAGE.to_string(),
            iv,
            value,
        }
    }
}
