//! Hardened symmetric cryptography for mobile applications.
//!
//! Three interlocking primitives built on one shared abstraction:
//!
//! - **Entropy**: [`SecureRandom`] draws from the OS CSPRNG and carries an
//!   [`EntropyQuality`] label; [`EnhancedRandom`] mixes two independent
//!   draws with a process identity for defense in depth.
//! - **Key derivation**: [`derive_key`] runs HKDF (RFC 5869) over a
//!   structured info string, so keys for different domains are
//!   computationally independent.
//! - **Authenticated encryption**: [`encrypt_bytes`] and friends produce a
//!   self-describing, version-tagged AES-256-GCM container that
//!   [`decrypt_bytes`] only opens after full header validation and tag
//!   verification.
//!
//! [`SecureBuffer`] ties the three together: every buffer holding key
//! material or plaintext is wiped on every exit path.
//!
//! ```text
//! SecureRandom ──── key bytes ───▶ derive_key ──▶ SecureBuffer (derived key)
//!      │
//!      └───────── fresh IV ──────▶ encrypt_bytes ──▶ header ‖ ciphertext‖tag
//!                                       ▲
//!                              32-byte key, plaintext
//! ```
//!
//! # Security
//!
//! - No key or IV reuse: every encryption draws a fresh 96-bit IV from the
//!   OS CSPRNG.
//! - Authenticated-only decryption: a wrong key and a tampered body both
//!   fail with [`Error::AuthFailure`]; structural defects fail earlier with
//!   [`Error::InvalidHeader`] and never touch cipher state.
//! - No plaintext lingering: sensitive intermediates live in
//!   [`SecureBuffer`] or `Zeroizing` wrappers and are wiped before control
//!   returns, including on error and panic paths.
//! - Errors and logs never carry key bytes, plaintext, ciphertext, IVs, or
//!   derived material.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod buffer;
mod cipher;
mod encoding;
mod error;
mod kdf;
mod random;

pub use buffer::SecureBuffer;
pub use cipher::{
    decrypt_bytes, decrypt_file, decrypt_string, encrypt_bytes, encrypt_file, encrypt_string,
    CipherFormat, CipherHeader, IV_SIZE, MAX_FILE_SIZE,
};
pub use encoding::{to_hex, Base64Variant};
pub use error::{Error, Result};
pub use kdf::{derive_key, derive_key_with, HkdfAlgorithm, DEFAULT_KEY_SIZE};
pub use random::{
    generate_base64, generate_bytes, generate_hex, EnhancedRandom, EntropyQuality, SecureRandom,
};
