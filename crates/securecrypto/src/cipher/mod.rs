//! Authenticated encryption with a self-describing container.
//!
//! The only persistent format this library produces:
//!
//! ```text
//! [ header: 8-byte prefix + parameter block ] [ ciphertext || GCM tag ]
//! ```
//!
//! Encrypt draws a fresh 96-bit IV from the OS CSPRNG for every call, so
//! concurrent encryptions under the same key are safe (collision probability
//! is below 2^-32 for 2^48 encryptions). Decrypt validates the header
//! before any cipher state is initialized, then authenticates the body;
//! a wrong key and a tampered body are indistinguishable and both surface
//! as [`Error::AuthFailure`].
//!
//! # Errors
//!
//! - `InvalidArgument` for a key that is not 32 bytes
//! - `InvalidHeader` for any structural defect in the container
//! - `AuthFailure` for a GCM tag mismatch

mod files;
mod format;
mod header;

pub use files::{decrypt_file, encrypt_file, MAX_FILE_SIZE};
pub use format::CipherFormat;
pub use header::{CipherHeader, IV_SIZE};

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};
use zeroize::Zeroize;

use crate::error::{Error, Result};
use crate::random::SecureRandom;

/// Require a 32-byte AES-256 key.
fn validate_key(key: &[u8]) -> Result<()> {
    if key.len() != CipherFormat::AesGcm.key_len() {
        return Err(Error::invalid_argument("Key must be 32 bytes for AES-GCM"));
    }
    Ok(())
}

/// Encrypt `plaintext` under `key`, returning the framed ciphertext.
///
/// Empty plaintext is permitted; the result is then exactly 40 bytes
/// (24-byte header plus 16-byte tag).
///
/// # Errors
///
/// - `InvalidArgument` if `key` is not 32 bytes
/// - `BackendUnavailable` if the IV draw fails
pub fn encrypt_bytes(key: &[u8], plaintext: &[u8]) -> Result<Vec<u8>> {
    validate_key(key)?;

    let rng = SecureRandom::new()?;
    let mut iv = [0u8; IV_SIZE];
    rng.next_secure_bytes(IV_SIZE)?.reveal(|bytes| iv.copy_from_slice(bytes));

    let header = CipherHeader::new(CipherFormat::AesGcm, iv);

    let Ok(cipher) = Aes256Gcm::new_from_slice(key) else {
        unreachable!("key length validated above");
    };
    let Ok(body) = cipher.encrypt(Nonce::from_slice(&iv), plaintext) else {
        unreachable!("AES-GCM encryption cannot fail with valid inputs");
    };

    let mut framed = Vec::with_capacity(header.encoded_len() + body.len());
    header.encode(&mut framed);
    framed.extend_from_slice(&body);
    Ok(framed)
}

/// Decrypt a framed ciphertext under `key`, returning the plaintext.
///
/// # Errors
///
/// - `InvalidArgument` if `key` is not 32 bytes
/// - `InvalidHeader` if the container fails any header-parse step
/// - `AuthFailure` on tag mismatch (wrong key or tampered body)
pub fn decrypt_bytes(key: &[u8], framed: &[u8]) -> Result<Vec<u8>> {
    validate_key(key)?;

    let header = CipherHeader::parse(framed)?;
    let body = &framed[header.encoded_len()..];

    let Ok(cipher) = Aes256Gcm::new_from_slice(key) else {
        unreachable!("key length validated above");
    };

    cipher.decrypt(Nonce::from_slice(header.iv()), body).map_err(|_| Error::AuthFailure)
}

/// Encrypt a string, returning Base64 (standard alphabet, padded, single
/// line) of the framed ciphertext.
///
/// # Errors
///
/// See [`encrypt_bytes`].
pub fn encrypt_string(key: &[u8], plaintext: &str) -> Result<String> {
    let framed = encrypt_bytes(key, plaintext.as_bytes())?;
    Ok(crate::encoding::Base64Variant::Standard.encode(&framed))
}

/// Decrypt the Base64 output of [`encrypt_string`] back to a string.
///
/// # Errors
///
/// - `EncodingFailure` if the input is not valid Base64, or the decrypted
///   plaintext is not valid UTF-8
/// - Everything [`decrypt_bytes`] returns
pub fn decrypt_string(key: &[u8], encoded: &str) -> Result<String> {
    let framed = crate::encoding::Base64Variant::Standard.decode(encoded)?;
    let plaintext = decrypt_bytes(key, &framed)?;

    String::from_utf8(plaintext).map_err(|e| {
        let mut rejected = e.into_bytes();
        rejected.zeroize();
        Error::EncodingFailure { reason: "plaintext is not valid UTF-8".to_string() }
    })
}
