//! Structural schema for raw options
//!
//! Turns a JSON value into [`CryptographyOptions`]. Fields with the wrong
//! type, unknown keys and a bad discriminant are reported as issues; the
//! fields that did parse are kept so the cross-field rules can still run on
//! them.

use serde_json::{Map, Value};

use super::Issues;
use crate::crypto::SecureString;
use crate::models::{
    CommonOptions, CryptographyOptions, DecryptOptions, EncryptOptions, Encoding, Operation,
    TextEncoding,
};

const COMMON_FIELDS: &[&str] = &[
    "operation",
    "algorithm",
    "password",
    "salt",
    "keyLength",
    "staticKey",
    "staticKeyEncoding",
    "includeLogs",
];

const ENCRYPT_FIELDS: &[&str] = &[
    "encodingInput",
    "encodingOutput",
    "staticIV",
    "staticIVEncoding",
];

const DECRYPT_FIELDS: &[&str] = &["encodingInput", "IVEncodingInput", "encodingOutput"];

/// Parse `raw` into options, recording every structural issue
///
/// Returns `None` only when no variant can be chosen: the value is not an
/// object, or the discriminant is missing or invalid and `expected` is unset.
pub(crate) fn parse(
    expected: Option<Operation>,
    raw: &Value,
    issues: &mut Issues,
) -> Option<CryptographyOptions> {
    let Some(map) = raw.as_object() else {
        issues.push_root(format!("Expected object, received {}", type_name(raw)));
        return None;
    };

    let operation = discriminant(expected, map, issues)?;

    let allowed = match operation {
        Operation::Encrypt => ENCRYPT_FIELDS,
        Operation::Decrypt => DECRYPT_FIELDS,
    };
    for key in map.keys() {
        if !COMMON_FIELDS.contains(&key.as_str()) && !allowed.contains(&key.as_str()) {
            issues.push(key, format!("Unrecognized key \"{}\" for {} options", key, operation));
        }
    }

    let common = parse_common(map, issues);

    let options = match operation {
        Operation::Encrypt => CryptographyOptions::Encrypt(EncryptOptions {
            common,
            encoding_input: text_encoding_field(map, "encodingInput", issues),
            encoding_output: encoding_field(map, "encodingOutput", issues),
            static_iv: string_field(map, "staticIV", issues),
            static_iv_encoding: encoding_field(map, "staticIVEncoding", issues),
        }),
        Operation::Decrypt => CryptographyOptions::Decrypt(DecryptOptions {
            common,
            encoding_input: encoding_field(map, "encodingInput", issues),
            iv_encoding_input: encoding_field(map, "IVEncodingInput", issues),
            encoding_output: text_encoding_field(map, "encodingOutput", issues),
        }),
    };

    Some(options)
}

fn discriminant(
    expected: Option<Operation>,
    map: &Map<String, Value>,
    issues: &mut Issues,
) -> Option<Operation> {
    const INVALID: &str = "Invalid discriminator value. Expected 'encrypt' | 'decrypt'";

    let found = match map.get("operation") {
        None => None,
        Some(Value::String(name)) => match Operation::parse(name) {
            Some(operation) => Some(operation),
            None => {
                issues.push("operation", format!("{}, received '{}'", INVALID, name));
                return expected;
            }
        },
        Some(other) => {
            issues.push(
                "operation",
                format!("{}, received {}", INVALID, type_name(other)),
            );
            return expected;
        }
    };

    match (found, expected) {
        (Some(found), Some(expected)) if found != expected => {
            issues.push(
                "operation",
                format!(
                    "operation '{}' does not match the requested '{}' operation",
                    found, expected
                ),
            );
            Some(expected)
        }
        (Some(found), _) => Some(found),
        (None, Some(expected)) => Some(expected),
        (None, None) => {
            issues.push("operation", INVALID);
            None
        }
    }
}

fn parse_common(map: &Map<String, Value>, issues: &mut Issues) -> CommonOptions {
    CommonOptions {
        algorithm: string_field(map, "algorithm", issues),
        password: secret_field(map, "password", issues),
        salt: secret_field(map, "salt", issues),
        key_length: key_length_field(map, issues),
        static_key: secret_field(map, "staticKey", issues),
        static_key_encoding: encoding_field(map, "staticKeyEncoding", issues),
        include_logs: bool_field(map, "includeLogs", issues).unwrap_or(false),
    }
}

fn string_field(map: &Map<String, Value>, name: &str, issues: &mut Issues) -> Option<String> {
    match map.get(name)? {
        Value::String(s) => Some(s.clone()),
        other => {
            issues.push(name, expected_type("string", other));
            None
        }
    }
}

fn secret_field(map: &Map<String, Value>, name: &str, issues: &mut Issues) -> Option<SecureString> {
    match map.get(name)? {
        Value::String(s) => Some(SecureString::new(s.as_str())),
        other => {
            issues.push(name, expected_type("string", other));
            None
        }
    }
}

fn bool_field(map: &Map<String, Value>, name: &str, issues: &mut Issues) -> Option<bool> {
    match map.get(name)? {
        Value::Bool(b) => Some(*b),
        other => {
            issues.push(name, expected_type("boolean", other));
            None
        }
    }
}

fn key_length_field(map: &Map<String, Value>, issues: &mut Issues) -> Option<usize> {
    match map.get("keyLength")? {
        Value::Number(n) => match n.as_u64().and_then(|n| usize::try_from(n).ok()) {
            Some(n) if n > 0 => Some(n),
            _ => {
                issues.push(
                    "keyLength",
                    format!("keyLength must be a positive integer, received {}", n),
                );
                None
            }
        },
        other => {
            issues.push("keyLength", expected_type("number", other));
            None
        }
    }
}

fn encoding_field(map: &Map<String, Value>, name: &str, issues: &mut Issues) -> Option<Encoding> {
    let value = map.get(name)?;
    let Value::String(s) = value else {
        issues.push(name, expected_type("string", value));
        return None;
    };
    let encoding = Encoding::parse(s);
    if encoding.is_none() {
        issues.push(
            name,
            format!(
                "Invalid enum value. Expected 'hex' | 'base64', received '{}'",
                s
            ),
        );
    }
    encoding
}

fn text_encoding_field(
    map: &Map<String, Value>,
    name: &str,
    issues: &mut Issues,
) -> Option<TextEncoding> {
    let value = map.get(name)?;
    let Value::String(s) = value else {
        issues.push(name, expected_type("string", value));
        return None;
    };
    let encoding = TextEncoding::parse(s);
    if encoding.is_none() {
        issues.push(
            name,
            format!("Invalid literal value, expected \"utf8\", received '{}'", s),
        );
    }
    encoding
}

fn expected_type(expected: &str, value: &Value) -> String {
    format!("Expected {}, received {}", expected, type_name(value))
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
