//! Encrypt, decrypt and validate CLI commands
//!
//! Each command reads its options from a JSON or YAML file, validates them
//! for the command's operation and hands them to the [`Cryptor`].

use std::path::{Path, PathBuf};

use clap::Args;
use serde::Serialize;
use tracing::debug;

use super::options_file::{has_password, insert_password, load_options};
use crate::config::Settings;
use crate::error::{CryptError, CryptResult};
use crate::models::{CryptographyOptions, DecryptOptions, EncryptOptions, Operation};
use crate::services::Cryptor;
use crate::validation::{self, ValidationErrors};

/// Arguments for `cryptkit encrypt`
#[derive(Args, Debug)]
pub struct EncryptArgs {
    /// UTF-8 text to encrypt
    pub payload: String,
    /// Options file (JSON, or YAML by .yaml/.yml extension)
    #[arg(short, long)]
    pub options: PathBuf,
    /// Prompt for the password when the options file has none
    #[arg(long)]
    pub prompt_password: bool,
}

/// Arguments for `cryptkit decrypt`
#[derive(Args, Debug)]
pub struct DecryptArgs {
    /// Encoded ciphertext
    pub payload: String,
    /// Encoded IV returned by `encrypt` (or the static IV used)
    #[arg(long)]
    pub iv: String,
    /// Options file (JSON, or YAML by .yaml/.yml extension)
    #[arg(short, long)]
    pub options: PathBuf,
    /// Prompt for the password when the options file has none
    #[arg(long)]
    pub prompt_password: bool,
}

/// Arguments for `cryptkit validate`
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Options file (JSON, or YAML by .yaml/.yml extension)
    #[arg(short, long)]
    pub options: PathBuf,
    /// Validate for this operation instead of the file's `operation` field
    #[arg(long, value_parser = parse_operation)]
    pub operation: Option<Operation>,
}

/// Outcome printed by `cryptkit validate` on failure
#[derive(Debug, Serialize)]
pub struct ValidationReport<'a> {
    pub success: bool,
    #[serde(flatten)]
    pub errors: &'a ValidationErrors,
}

/// Handle `cryptkit encrypt`: prints the result as JSON
pub fn handle_encrypt_command(settings: &Settings, args: EncryptArgs) -> CryptResult<()> {
    let options = read_options(
        &args.options,
        Operation::Encrypt,
        settings,
        args.prompt_password,
    )?;
    let options = expect_encrypt(options)?;

    let result = Cryptor::new(settings).encrypt(&args.payload, &options)?;
    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}

/// Handle `cryptkit decrypt`: prints the plaintext
pub fn handle_decrypt_command(settings: &Settings, args: DecryptArgs) -> CryptResult<()> {
    let options = read_options(
        &args.options,
        Operation::Decrypt,
        settings,
        args.prompt_password,
    )?;
    let options = expect_decrypt(options)?;

    let plaintext = Cryptor::new(settings).decrypt(&args.payload, &args.iv, &options)?;
    println!("{}", plaintext);

    Ok(())
}

/// Handle `cryptkit validate`
///
/// Returns `Ok(false)` when the options are invalid; the issue list has then
/// already been printed.
pub fn handle_validate_command(settings: &Settings, args: ValidateArgs) -> CryptResult<bool> {
    let raw = load_options(&args.options)?;

    let outcome = match args.operation {
        Some(operation) => validation::validate_for_with(operation, &raw, settings),
        None => validation::validate_with(&raw, settings),
    };

    match outcome {
        Ok(options) => {
            println!("OK ({} options)", options.operation());
            Ok(true)
        }
        Err(errors) => {
            let report = ValidationReport {
                success: false,
                errors: &errors,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(false)
        }
    }
}

fn read_options(
    path: &Path,
    operation: Operation,
    settings: &Settings,
    prompt_password: bool,
) -> CryptResult<CryptographyOptions> {
    let mut raw = load_options(path)?;
    debug!(path = %path.display(), %operation, "Loaded options file");

    if prompt_password && !has_password(&raw) {
        let password = rpassword::prompt_password("Password: ")
            .map_err(|e| CryptError::Io(format!("Failed to read password: {}", e)))?;
        insert_password(&mut raw, password);
    }

    Ok(validation::validate_for_with(operation, &raw, settings)?)
}

fn expect_encrypt(options: CryptographyOptions) -> CryptResult<EncryptOptions> {
    options
        .into_encrypt()
        .ok_or_else(|| CryptError::Config("options do not describe an encrypt operation".into()))
}

fn expect_decrypt(options: CryptographyOptions) -> CryptResult<DecryptOptions> {
    options
        .into_decrypt()
        .ok_or_else(|| CryptError::Config("options do not describe a decrypt operation".into()))
}

fn parse_operation(s: &str) -> Result<Operation, String> {
    Operation::parse(&s.to_ascii_lowercase())
        .ok_or_else(|| format!("unknown operation '{}': expected encrypt or decrypt", s))
}
