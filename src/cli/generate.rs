//! Key and IV generation commands

use clap::Args;

use crate::crypto::{generate_key, IvSuggestion};
use crate::error::CryptResult;
use crate::models::{Algorithm, Encoding};

/// Arguments for `cryptkit generate-iv`
#[derive(Args, Debug)]
pub struct GenerateIvArgs {
    /// Print only this encoding (hex or base64)
    #[arg(short, long, value_parser = parse_encoding)]
    pub encoding: Option<Encoding>,
}

/// Arguments for `cryptkit generate-key`
#[derive(Args, Debug)]
pub struct GenerateKeyArgs {
    /// Algorithm the key is sized for
    #[arg(short, long, default_value = "aes-256-cbc")]
    pub algorithm: Algorithm,
    /// Output encoding (hex or base64)
    #[arg(short, long, value_parser = parse_encoding, default_value = "hex")]
    pub encoding: Encoding,
}

/// Print a random 16-byte IV
pub fn handle_generate_iv_command(args: GenerateIvArgs) -> CryptResult<()> {
    let iv = IvSuggestion::generate();
    match args.encoding {
        Some(Encoding::Hex) => println!("{}", iv.hex),
        Some(Encoding::Base64) => println!("{}", iv.base64),
        None => {
            println!("hex:    {}", iv.hex);
            println!("base64: {}", iv.base64);
        }
    }
    Ok(())
}

/// Print a random static key sized for the chosen algorithm
pub fn handle_generate_key_command(args: GenerateKeyArgs) -> CryptResult<()> {
    let key = generate_key(&args.algorithm);
    println!("{}", args.encoding.encode(&key));
    Ok(())
}

fn parse_encoding(s: &str) -> Result<Encoding, String> {
    Encoding::parse(&s.to_ascii_lowercase())
        .ok_or_else(|| format!("unknown encoding '{}': expected hex or base64", s))
}
