//! AES encryption/decryption
//!
//! One-shot AES in CBC, CFB, CFB8, OFB, CTR and GCM modes. The whole payload
//! is processed in a single call. GCM uses a 16-byte nonce so that every
//! mode shares the same IV length, and appends its 16-byte tag to the
//! ciphertext.

use aes::cipher::{
    block_padding::Pkcs7, AsyncStreamCipher, BlockDecryptMut, BlockEncryptMut, KeyIvInit,
    StreamCipher,
};
use aes_gcm::aead::consts::U16;
use aes_gcm::aead::rand_core::RngCore;
use aes_gcm::aead::{Aead, KeyInit, OsRng};
use aes_gcm::{AesGcm, Nonce};

use super::SecureBytes;
use crate::error::CipherFault;
use crate::models::{Algorithm, CipherMode, Encoding, KeySize, IV_LENGTH};

/// Bind `$aes` to the AES block cipher matching `$size` and evaluate `$body`
macro_rules! with_aes {
    ($size:expr, $aes:ident => $body:expr) => {
        match $size {
            KeySize::Aes128 => {
                type $aes = aes::Aes128;
                $body
            }
            KeySize::Aes192 => {
                type $aes = aes::Aes192;
                $body
            }
            KeySize::Aes256 => {
                type $aes = aes::Aes256;
                $body
            }
        }
    };
}

/// Encrypt `plaintext` with `algorithm`
pub fn encrypt(
    algorithm: &Algorithm,
    key: &[u8],
    iv: &[u8],
    plaintext: &[u8],
) -> Result<Vec<u8>, CipherFault> {
    check_lengths(algorithm, key, iv)?;

    match algorithm.mode() {
        CipherMode::Cbc => with_aes!(algorithm.key_size(), Aes => {
            let cipher = cbc::Encryptor::<Aes>::new_from_slices(key, iv)?;
            Ok(cipher.encrypt_padded_vec_mut::<Pkcs7>(plaintext))
        }),
        CipherMode::Cfb => with_aes!(algorithm.key_size(), Aes => {
            let mut buf = plaintext.to_vec();
            cfb_mode::Encryptor::<Aes>::new_from_slices(key, iv)?.encrypt(&mut buf);
            Ok(buf)
        }),
        CipherMode::Cfb8 => with_aes!(algorithm.key_size(), Aes => {
            let mut buf = plaintext.to_vec();
            cfb8::Encryptor::<Aes>::new_from_slices(key, iv)?.encrypt(&mut buf);
            Ok(buf)
        }),
        CipherMode::Ofb | CipherMode::Ctr => apply_keystream(algorithm, key, iv, plaintext),
        CipherMode::Gcm => with_aes!(algorithm.key_size(), Aes => {
            let cipher = AesGcm::<Aes, U16>::new_from_slice(key)?;
            cipher
                .encrypt(Nonce::<U16>::from_slice(iv), plaintext)
                .map_err(|_| CipherFault::Authentication)
        }),
    }
}

/// Decrypt `ciphertext` with `algorithm`
///
/// Wrong keys or IVs show up as padding failures (CBC), authentication
/// failures (GCM) or garbage output (stream modes).
pub fn decrypt(
    algorithm: &Algorithm,
    key: &[u8],
    iv: &[u8],
    ciphertext: &[u8],
) -> Result<Vec<u8>, CipherFault> {
    check_lengths(algorithm, key, iv)?;

    match algorithm.mode() {
        CipherMode::Cbc => with_aes!(algorithm.key_size(), Aes => {
            let cipher = cbc::Decryptor::<Aes>::new_from_slices(key, iv)?;
            cipher
                .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
                .map_err(|_| CipherFault::Padding)
        }),
        CipherMode::Cfb => with_aes!(algorithm.key_size(), Aes => {
            let mut buf = ciphertext.to_vec();
            cfb_mode::Decryptor::<Aes>::new_from_slices(key, iv)?.decrypt(&mut buf);
            Ok(buf)
        }),
        CipherMode::Cfb8 => with_aes!(algorithm.key_size(), Aes => {
            let mut buf = ciphertext.to_vec();
            cfb8::Decryptor::<Aes>::new_from_slices(key, iv)?.decrypt(&mut buf);
            Ok(buf)
        }),
        CipherMode::Ofb | CipherMode::Ctr => apply_keystream(algorithm, key, iv, ciphertext),
        CipherMode::Gcm => with_aes!(algorithm.key_size(), Aes => {
            let cipher = AesGcm::<Aes, U16>::new_from_slice(key)?;
            cipher
                .decrypt(Nonce::<U16>::from_slice(iv), ciphertext)
                .map_err(|_| CipherFault::Authentication)
        }),
    }
}

// OFB and CTR are symmetric: the same keystream encrypts and decrypts.
fn apply_keystream(
    algorithm: &Algorithm,
    key: &[u8],
    iv: &[u8],
    data: &[u8],
) -> Result<Vec<u8>, CipherFault> {
    let mut buf = data.to_vec();
    match algorithm.mode() {
        CipherMode::Ofb => with_aes!(algorithm.key_size(), Aes => {
            ofb::Ofb::<Aes>::new_from_slices(key, iv)?.apply_keystream(&mut buf);
        }),
        CipherMode::Ctr => with_aes!(algorithm.key_size(), Aes => {
            ctr::Ctr128BE::<Aes>::new_from_slices(key, iv)?.apply_keystream(&mut buf);
        }),
        other => {
            return Err(CipherFault::Algorithm(format!(
                "{} is not a stream mode",
                other.as_str()
            )))
        }
    }
    Ok(buf)
}

fn check_lengths(algorithm: &Algorithm, key: &[u8], iv: &[u8]) -> Result<(), CipherFault> {
    if key.len() != algorithm.key_len() {
        return Err(CipherFault::KeyLength {
            algorithm: algorithm.to_string(),
            expected: algorithm.key_len(),
            actual: key.len(),
        });
    }
    if iv.len() != algorithm.iv_len() {
        return Err(CipherFault::IvLength {
            expected: algorithm.iv_len(),
            actual: iv.len(),
        });
    }
    Ok(())
}

/// Generate a random IV from the OS CSPRNG
pub fn generate_iv() -> [u8; IV_LENGTH] {
    let mut iv = [0u8; IV_LENGTH];
    OsRng.fill_bytes(&mut iv);
    iv
}

/// Generate a random static key sized for `algorithm`
pub fn generate_key(algorithm: &Algorithm) -> SecureBytes {
    let mut key = SecureBytes::zeroed(algorithm.key_len());
    OsRng.fill_bytes(key.as_bytes_mut());
    key
}

/// A freshly generated IV rendered in both encodings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IvSuggestion {
    pub hex: String,
    pub base64: String,
}

impl IvSuggestion {
    pub fn generate() -> Self {
        let iv = generate_iv();
        Self {
            hex: Encoding::Hex.encode(&iv),
            base64: Encoding::Base64.encode(&iv),
        }
    }
}
