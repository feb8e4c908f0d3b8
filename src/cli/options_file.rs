//! Options files
//!
//! Reads a cryptography options object from a JSON or YAML file. The format
//! is chosen by extension (`.yaml`/`.yml` for YAML, anything else is JSON).
//! The object is returned raw so that validation sees exactly what the user
//! wrote, unknown keys included.

use std::path::Path;

use serde_json::Value;

use crate::error::{CryptError, CryptResult};

/// File formats accepted for options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionsFormat {
    Json,
    Yaml,
}

impl OptionsFormat {
    /// Pick the format from a path's extension
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("yaml") | Some("yml") => Self::Yaml,
            _ => Self::Json,
        }
    }
}

/// Read a raw options object from `path`
pub fn load_options(path: &Path) -> CryptResult<Value> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        CryptError::Io(format!(
            "Failed to read options file {}: {}",
            path.display(),
            e
        ))
    })?;

    parse_options(&contents, OptionsFormat::from_path(path))
}

/// Parse options text in the given format
pub fn parse_options(contents: &str, format: OptionsFormat) -> CryptResult<Value> {
    let value = match format {
        OptionsFormat::Json => serde_json::from_str(contents)?,
        OptionsFormat::Yaml => serde_yaml::from_str(contents)?,
    };
    Ok(value)
}

/// Fill in `password` when the options object has none
///
/// Returns whether the value was changed. Non-object values are left alone
/// for validation to report.
pub fn insert_password(raw: &mut Value, password: String) -> bool {
    match raw.as_object_mut() {
        Some(map) if !map.contains_key("password") => {
            map.insert("password".into(), Value::String(password));
            true
        }
        _ => false,
    }
}

/// Whether the options object already carries a password
pub fn has_password(raw: &Value) -> bool {
    raw.get("password").is_some()
}
