use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cryptkit::cli::{
    handle_decrypt_command, handle_encrypt_command, handle_generate_iv_command,
    handle_generate_key_command, handle_validate_command, DecryptArgs, EncryptArgs,
    GenerateIvArgs, GenerateKeyArgs, ValidateArgs,
};
use cryptkit::config::Settings;

#[derive(Parser)]
#[command(
    name = "cryptkit",
    author = "Kaylee Beyene",
    version,
    about = "Validated AES encryption of string payloads",
    long_about = "cryptkit encrypts and decrypts text with AES (cbc, cfb, cfb8, ofb, \
                  ctr, gcm). Keys are derived from a password and salt with scrypt, \
                  or given directly as a static key. Options are read from a JSON or \
                  YAML file and validated before anything is encrypted."
)]
struct Cli {
    /// Settings file (JSON) with validation limits and scrypt cost
    #[arg(short, long, global = true, env = "CRYPTKIT_CONFIG")]
    config: Option<PathBuf>,

    /// Log operation details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt a payload and print the ciphertext and IV as JSON
    #[command(alias = "enc")]
    Encrypt(EncryptArgs),

    /// Decrypt a payload and print the plaintext
    #[command(alias = "dec")]
    Decrypt(DecryptArgs),

    /// Check an options file and list every problem found
    Validate(ValidateArgs),

    /// Print a random 16-byte IV
    GenerateIv(GenerateIvArgs),

    /// Print a random static key for an algorithm
    GenerateKey(GenerateKeyArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let settings = Settings::load_or_default(cli.config.as_deref())?;

    match cli.command {
        Commands::Encrypt(args) => handle_encrypt_command(&settings, args)?,
        Commands::Decrypt(args) => handle_decrypt_command(&settings, args)?,
        Commands::Validate(args) => {
            if !handle_validate_command(&settings, args)? {
                std::process::exit(1);
            }
        }
        Commands::GenerateIv(args) => handle_generate_iv_command(args)?,
        Commands::GenerateKey(args) => handle_generate_key_command(args)?,
    }

    Ok(())
}
