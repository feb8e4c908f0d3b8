//! Settings for cryptkit
//!
//! Tunable limits for option validation and the scrypt cost parameters. Every
//! field has a default, so an empty JSON object is a valid settings file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::crypto::KdfParams;
use crate::error::{CryptError, CryptResult};

/// Minimum secret lengths enforced by the validator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationLimits {
    /// Minimum password length in characters, after trimming
    #[serde(default = "default_min_password_length")]
    pub min_password_length: usize,
    /// Minimum salt length in characters, after trimming
    #[serde(default = "default_min_salt_length")]
    pub min_salt_length: usize,
}

fn default_min_password_length() -> usize {
    16
}

fn default_min_salt_length() -> usize {
    8
}

impl Default for ValidationLimits {
    fn default() -> Self {
        Self {
            min_password_length: default_min_password_length(),
            min_salt_length: default_min_salt_length(),
        }
    }
}

/// User settings for cryptkit
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub validation: ValidationLimits,

    /// scrypt cost parameters
    #[serde(default)]
    pub kdf: KdfParams,
}

impl Settings {
    /// Load settings from a JSON file
    pub fn load(path: &Path) -> CryptResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            CryptError::Io(format!(
                "Failed to read settings file {}: {}",
                path.display(),
                e
            ))
        })?;

        let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
            CryptError::Config(format!("Failed to parse settings file: {}", e))
        })?;

        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from `path` when given, defaults otherwise
    pub fn load_or_default(path: Option<&Path>) -> CryptResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Reject limits and KDF parameters that can never work
    pub fn validate(&self) -> CryptResult<()> {
        if self.validation.min_password_length == 0 {
            return Err(CryptError::Config(
                "validation.min_password_length must be > 0".into(),
            ));
        }
        if self.validation.min_salt_length == 0 {
            return Err(CryptError::Config(
                "validation.min_salt_length must be > 0".into(),
            ));
        }
        self.kdf
            .check()
            .map_err(|e| CryptError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.validation.min_password_length, 16);
        assert_eq!(settings.validation.min_salt_length, 8);
        assert_eq!(settings.kdf, KdfParams::new(14, 8, 1));
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_empty_object_uses_defaults() {
        let settings: Settings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_partial_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");
        std::fs::write(
            &path,
            r#"{"validation": {"min_password_length": 24}, "kdf": {"log_n": 10}}"#,
        )
        .unwrap();

        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.validation.min_password_length, 24);
        assert_eq!(settings.validation.min_salt_length, 8);
        assert_eq!(settings.kdf.log_n, 10);
        assert_eq!(settings.kdf.r, 8);
    }

    #[test]
    fn test_zero_limit_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");
        std::fs::write(&path, r#"{"validation": {"min_salt_length": 0}}"#).unwrap();

        assert!(matches!(Settings::load(&path), Err(CryptError::Config(_))));
    }

    #[test]
    fn test_invalid_kdf_rejected() {
        let mut settings = Settings::default();
        settings.kdf.p = 0;
        assert!(matches!(settings.validate(), Err(CryptError::Config(_))));
    }

    #[test]
    fn test_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.json");
        assert!(matches!(Settings::load(&path), Err(CryptError::Io(_))));
        assert!(Settings::load_or_default(None).is_ok());
    }
}
