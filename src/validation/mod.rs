//! Option validation
//!
//! Validation never stops at the first problem. Every rule appends zero or
//! more [`ValidationIssue`]s to a shared accumulator, and the caller gets
//! either fully normalized options or the complete list of issues.
//!
//! Options arrive in one of two shapes:
//!
//! - typed Rust values ([`EncryptOptions`], [`DecryptOptions`]), validated
//!   with their `validate` methods;
//! - raw JSON values (from an options file or an FFI boundary), validated with
//!   [`validate`] / [`validate_for`]. These additionally go through the
//!   structural schema check: discriminant, unknown keys and field
//!   types.

mod rules;
mod schema;

use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::config::Settings;
use crate::models::{CryptographyOptions, DecryptOptions, EncryptOptions, Operation};

/// A single violated rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub message: String,
    /// Field names leading to the offending value; empty for the root object
    pub path: Vec<String>,
}

impl ValidationIssue {
    pub fn new<I, S>(path: I, message: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            message: message.into(),
            path: path.into_iter().map(Into::into).collect(),
        }
    }

    /// The top-level field this issue refers to
    pub fn field(&self) -> Option<&str> {
        self.path.first().map(String::as_str)
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            f.write_str(&self.message)
        } else {
            write!(f, "{}: {}", self.path.join("."), self.message)
        }
    }
}

/// Every issue found while validating one set of options
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationErrors {
    #[serde(skip_serializing_if = "Option::is_none")]
    operation: Option<Operation>,
    #[serde(rename = "errors")]
    issues: Vec<ValidationIssue>,
}

impl ValidationErrors {
    pub fn new(operation: Option<Operation>, issues: Vec<ValidationIssue>) -> Self {
        Self { operation, issues }
    }

    /// The operation being validated, when the discriminant was usable
    pub fn operation(&self) -> Option<Operation> {
        self.operation
    }

    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ValidationIssue> {
        self.issues.iter()
    }

    /// Whether any issue points at `field`
    pub fn has_issue_at(&self, field: &str) -> bool {
        self.issues.iter().any(|issue| issue.field() == Some(field))
    }

    /// Messages of the issues pointing at `field`
    pub fn messages_for<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.issues
            .iter()
            .filter(move |issue| issue.field() == Some(field))
            .map(|issue| issue.message.as_str())
    }

    pub(crate) fn operation_hint(&self) -> &'static str {
        self.operation.map_or("cryptography", Operation::as_str)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, issue) in self.issues.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}", issue)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a ValidationIssue;
    type IntoIter = std::slice::Iter<'a, ValidationIssue>;

    fn into_iter(self) -> Self::IntoIter {
        self.issues.iter()
    }
}

/// Result of validating a set of options
pub type ValidationResult<T> = Result<T, ValidationErrors>;

/// Accumulator threaded through the rule functions
#[derive(Debug, Default)]
pub(crate) struct Issues {
    issues: Vec<ValidationIssue>,
}

impl Issues {
    pub(crate) fn push(&mut self, field: &str, message: impl Into<String>) {
        self.issues.push(ValidationIssue::new([field], message));
    }

    pub(crate) fn push_root(&mut self, message: impl Into<String>) {
        self.issues
            .push(ValidationIssue::new(Vec::<String>::new(), message));
    }

    pub(crate) fn has_issue_at(&self, field: &str) -> bool {
        self.issues.iter().any(|issue| issue.field() == Some(field))
    }

    pub(crate) fn into_errors(self, operation: Option<Operation>) -> ValidationErrors {
        ValidationErrors::new(operation, self.issues)
    }

    pub(crate) fn finish<T>(self, operation: Operation, value: T) -> ValidationResult<T> {
        if self.issues.is_empty() {
            Ok(value)
        } else {
            Err(self.into_errors(Some(operation)))
        }
    }
}

/// Validate a raw options object whose `operation` field names the variant
pub fn validate(raw: &Value) -> ValidationResult<CryptographyOptions> {
    validate_with(raw, &Settings::default())
}

/// [`validate`] with explicit settings
pub fn validate_with(raw: &Value, settings: &Settings) -> ValidationResult<CryptographyOptions> {
    run(None, raw, settings)
}

/// Validate a raw options object for a known operation
///
/// The object may omit `operation`; if it carries one, it must agree.
pub fn validate_for(operation: Operation, raw: &Value) -> ValidationResult<CryptographyOptions> {
    validate_for_with(operation, raw, &Settings::default())
}

/// [`validate_for`] with explicit settings
pub fn validate_for_with(
    operation: Operation,
    raw: &Value,
    settings: &Settings,
) -> ValidationResult<CryptographyOptions> {
    run(Some(operation), raw, settings)
}

fn run(
    expected: Option<Operation>,
    raw: &Value,
    settings: &Settings,
) -> ValidationResult<CryptographyOptions> {
    let mut issues = Issues::default();

    let Some(options) = schema::parse(expected, raw, &mut issues) else {
        return Err(issues.into_errors(expected));
    };

    rules::check(&options, &settings.validation, &mut issues);
    issues.finish(options.operation(), options.normalized())
}

impl EncryptOptions {
    /// Check these options, returning a normalized copy
    pub fn validate(&self, settings: &Settings) -> ValidationResult<EncryptOptions> {
        let mut issues = Issues::default();
        rules::check_encrypt(self, &settings.validation, &mut issues);
        issues.finish(Operation::Encrypt, self.normalized())
    }
}

impl DecryptOptions {
    /// Check these options, returning a normalized copy
    pub fn validate(&self, settings: &Settings) -> ValidationResult<DecryptOptions> {
        let mut issues = Issues::default();
        rules::check_decrypt(self, &settings.validation, &mut issues);
        issues.finish(Operation::Decrypt, self.normalized())
    }
}

impl CryptographyOptions {
    /// Check these options, returning a normalized copy
    pub fn validate(&self, settings: &Settings) -> ValidationResult<CryptographyOptions> {
        let mut issues = Issues::default();
        rules::check(self, &settings.validation, &mut issues);
        issues.finish(self.operation(), self.normalized())
    }

    /// Parse and validate a raw options object
    pub fn from_value(raw: &Value, settings: &Settings) -> ValidationResult<CryptographyOptions> {
        validate_with(raw, settings)
    }
}
