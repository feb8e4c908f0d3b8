//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod crypt;
pub mod generate;
pub mod options_file;

pub use crypt::{
    handle_decrypt_command, handle_encrypt_command, handle_validate_command, DecryptArgs,
    EncryptArgs, ValidateArgs,
};
pub use generate::{
    handle_generate_iv_command, handle_generate_key_command, GenerateIvArgs, GenerateKeyArgs,
};
pub use options_file::{load_options, OptionsFormat};
