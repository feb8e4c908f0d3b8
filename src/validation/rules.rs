//! Cross-field validation rules
//!
//! Each rule inspects the options and appends issues; none of them returns
//! early on behalf of the others. Rules run on options that may be partially
//! filled after a structural failure, so a field that already carries an
//! issue is not reported again as missing.

use crate::config::ValidationLimits;
use crate::crypto::{IvSuggestion, SecureBytes, SecureString};
use crate::models::{
    Algorithm, CommonOptions, CryptographyOptions, DecryptOptions, EncryptOptions, IV_LENGTH,
};

use super::Issues;

/// Run every rule that applies to `options`
pub(crate) fn check(options: &CryptographyOptions, limits: &ValidationLimits, issues: &mut Issues) {
    match options {
        CryptographyOptions::Encrypt(options) => check_encrypt(options, limits, issues),
        CryptographyOptions::Decrypt(options) => check_decrypt(options, limits, issues),
    }
}

pub(crate) fn check_encrypt(
    options: &EncryptOptions,
    limits: &ValidationLimits,
    issues: &mut Issues,
) {
    check_common(&options.common, limits, issues);
    check_static_iv(options, issues);
}

pub(crate) fn check_decrypt(
    options: &DecryptOptions,
    limits: &ValidationLimits,
    issues: &mut Issues,
) {
    check_common(&options.common, limits, issues);
}

/// Rules shared by both directions
pub(crate) fn check_common(
    options: &CommonOptions,
    limits: &ValidationLimits,
    issues: &mut Issues,
) {
    check_secret_lengths(options, limits, issues);
    check_password_salt_pairing(options, issues);
    check_static_key_pairing(options, issues);
    check_key_source_exclusivity(options, issues);

    let algorithm = check_algorithm(options, issues);
    check_static_key(options, algorithm.as_ref(), issues);
    check_key_length(options, algorithm.as_ref(), issues);
}

/// Password and salt must reach their minimum lengths once trimmed
pub(crate) fn check_secret_lengths(
    options: &CommonOptions,
    limits: &ValidationLimits,
    issues: &mut Issues,
) {
    if let Some(password) = &options.password {
        check_min_length(
            "password",
            "Password",
            password,
            limits.min_password_length,
            issues,
        );
    }
    if let Some(salt) = &options.salt {
        check_min_length("salt", "salt", salt, limits.min_salt_length, issues);
    }
}

fn check_min_length(
    field: &str,
    label: &str,
    value: &SecureString,
    min: usize,
    issues: &mut Issues,
) {
    let len = value.trimmed().char_len();
    if len == 0 {
        issues.push(field, format!("{} is required", label));
    } else if len < min {
        issues.push(
            field,
            format!("{} must be minimum of {} characters", label, min),
        );
    }
}

/// Without a static key, password and salt come as a pair
pub(crate) fn check_password_salt_pairing(options: &CommonOptions, issues: &mut Issues) {
    if options.static_key.is_some() {
        return;
    }
    match (&options.password, &options.salt) {
        (Some(_), None) if !issues.has_issue_at("salt") => {
            issues.push("salt", "salt is required when password is set");
        }
        (None, Some(_)) if !issues.has_issue_at("password") => {
            issues.push("password", "Password is required when salt is set");
        }
        _ => {}
    }
}

/// A static key is useless without its encoding
pub(crate) fn check_static_key_pairing(options: &CommonOptions, issues: &mut Issues) {
    let Some(key) = &options.static_key else {
        return;
    };
    if key.trim().is_empty() {
        issues.push("staticKey", "staticKey must not be empty");
    }
    if options.static_key_encoding.is_none() && !issues.has_issue_at("staticKeyEncoding") {
        issues.push(
            "staticKeyEncoding",
            "staticKeyEncoding is required when staticKey is set",
        );
    }
}

/// A complete static key makes password and salt redundant
pub(crate) fn check_key_source_exclusivity(options: &CommonOptions, issues: &mut Issues) {
    if !options.has_static_key_pair() {
        return;
    }
    if options.password.is_some() {
        issues.push(
            "password",
            "password is unnecessary when staticKey and staticKeyEncoding are provided",
        );
    }
    if options.salt.is_some() {
        issues.push(
            "salt",
            "salt is unnecessary when staticKey and staticKeyEncoding are provided",
        );
    }
}

/// The algorithm must be `aes-{128|192|256}-{mode}` with a supported mode
///
/// Returns the algorithm the remaining rules should check against: the parsed
/// one, the default when none is set, or `None` when it is invalid.
pub(crate) fn check_algorithm(options: &CommonOptions, issues: &mut Issues) -> Option<Algorithm> {
    match options.resolved_algorithm() {
        Ok(algorithm) => Some(algorithm),
        Err(e) => {
            issues.push("algorithm", e.to_string());
            None
        }
    }
}

/// The static key must decode, and to exactly the algorithm's key size
pub(crate) fn check_static_key(
    options: &CommonOptions,
    algorithm: Option<&Algorithm>,
    issues: &mut Issues,
) {
    let (Some(key), Some(encoding)) = (&options.static_key, options.static_key_encoding) else {
        return;
    };
    if key.trim().is_empty() {
        return;
    }

    let decoded = match encoding.decode(key) {
        Ok(bytes) => SecureBytes::from(bytes),
        Err(e) => {
            issues.push(
                "staticKey",
                format!("staticKey is not valid {}: {}", encoding, e),
            );
            return;
        }
    };

    if let Some(algorithm) = algorithm {
        if decoded.len() != algorithm.key_len() {
            issues.push(
                "staticKey",
                format!(
                    "staticKey must be {} bytes for {}, got {} bytes",
                    algorithm.key_len(),
                    algorithm,
                    decoded.len()
                ),
            );
        }
    }
}

/// An explicit key length must be positive and match the algorithm
pub(crate) fn check_key_length(
    options: &CommonOptions,
    algorithm: Option<&Algorithm>,
    issues: &mut Issues,
) {
    let Some(key_length) = options.key_length else {
        return;
    };
    if key_length == 0 {
        issues.push("keyLength", "keyLength must be a positive integer");
        return;
    }
    if let Some(algorithm) = algorithm {
        if key_length != algorithm.key_len() {
            issues.push(
                "keyLength",
                format!(
                    "keyLength {} does not match {}, which requires a {}-byte key",
                    key_length,
                    algorithm,
                    algorithm.key_len()
                ),
            );
        }
    }
}

/// A static IV needs its encoding and must decode to exactly 16 bytes
pub(crate) fn check_static_iv(options: &EncryptOptions, issues: &mut Issues) {
    let Some(iv) = &options.static_iv else {
        return;
    };
    let Some(encoding) = options.static_iv_encoding else {
        if !issues.has_issue_at("staticIVEncoding") {
            issues.push(
                "staticIVEncoding",
                "staticIVEncoding is required when staticIV is set",
            );
        }
        return;
    };

    match encoding.decode(iv) {
        Ok(bytes) if bytes.len() == IV_LENGTH => {}
        Ok(bytes) => {
            let suggestion = IvSuggestion::generate();
            issues.push(
                "staticIV",
                format!(
                    "staticIV must decode to exactly {} bytes, got {} bytes. \
                     Example valid IVs: hex \"{}\" or base64 \"{}\"",
                    IV_LENGTH,
                    bytes.len(),
                    suggestion.hex,
                    suggestion.base64
                ),
            );
        }
        Err(e) => {
            issues.push(
                "staticIV",
                format!("staticIV is not valid {}: {}", encoding, e),
            );
        }
    }
}
