//! Labelled random byte generation.
//!
//! [`SecureRandom`] wraps the operating system CSPRNG and carries an
//! [`EntropyQuality`] label describing where the bytes come from. The label
//! is a heuristic, never a gate: generation proceeds the same way for both
//! qualities.
//!
//! The module-level `generate_*` functions are the convenience surface for
//! one-shot callers: each creates an ephemeral generator, produces bytes
//! inside a [`SecureBuffer`], and clones the result out so the internal copy
//! is wiped before returning.
//!
//! # Security
//!
//! - Every draw hits the OS source (`getrandom(2)` / `BCryptGenRandom` /
//!   equivalent); there is no userspace PRNG state to compromise.
//! - Construction warms the source with a 64-byte draw that is wiped and
//!   discarded, surfacing backend failure early as `BackendUnavailable`.
//! - A single generator is safe for concurrent use.

mod enhanced;
mod identity;

pub use enhanced::EnhancedRandom;

use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::Zeroize;

use crate::buffer::SecureBuffer;
use crate::encoding::{to_hex, Base64Variant};
use crate::error::{Error, Result};

/// Where a generator's entropy ultimately comes from.
///
/// Attached to every generator instance, never to individual outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntropyQuality {
    /// The OS source is kernel- or TEE-backed
    Hardware,
    /// Software-only source
    Fallback,
}

/// Thread-safe random generator backed by the OS CSPRNG.
#[derive(Debug, Clone, Copy)]
pub struct SecureRandom {
    quality: EntropyQuality,
}

/// Targets where the OS CSPRNG is the kernel source seeded from hardware:
/// `getrandom(2)` on Linux/Android, `BCryptGenRandom` on Windows,
/// `getentropy`/`SecRandomCopyBytes` on Apple platforms and the BSDs.
/// Everything else gets the conservative `Fallback` label.
const fn platform_quality() -> EntropyQuality {
    if cfg!(any(
        target_os = "linux",
        target_os = "android",
        target_os = "windows",
        target_os = "macos",
        target_os = "ios",
        target_os = "freebsd",
        target_os = "openbsd",
        target_os = "netbsd",
    )) {
        EntropyQuality::Hardware
    } else {
        EntropyQuality::Fallback
    }
}

impl SecureRandom {
    /// Create a generator, warming up the OS source.
    ///
    /// Draws and discards 64 bytes so that a dead entropy backend fails
    /// construction instead of the first caller-visible operation. The
    /// warm-up bytes are wiped before being discarded.
    ///
    /// # Errors
    ///
    /// - `BackendUnavailable` if the OS CSPRNG cannot produce bytes
    pub fn new() -> Result<Self> {
        let mut warmup = [0u8; 64];
        let outcome = OsRng.try_fill_bytes(&mut warmup);
        warmup.zeroize();
        outcome.map_err(|e| Error::BackendUnavailable { reason: format!("OS CSPRNG: {e}") })?;

        Ok(Self { quality: platform_quality() })
    }

    /// Fill a fresh buffer of exactly `size` bytes with CSPRNG output.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if `size` is zero
    /// - `BackendUnavailable` if the OS CSPRNG fails mid-draw
    pub fn next_bytes(&self, size: usize) -> Result<Vec<u8>> {
        if size == 0 {
            return Err(Error::invalid_argument("Size must be positive"));
        }

        let mut bytes = vec![0u8; size];
        if let Err(e) = OsRng.try_fill_bytes(&mut bytes) {
            bytes.zeroize();
            return Err(Error::BackendUnavailable { reason: format!("OS CSPRNG: {e}") });
        }
        Ok(bytes)
    }

    /// As [`next_bytes`](Self::next_bytes), wrapped for zeroization.
    pub fn next_secure_bytes(&self, size: usize) -> Result<SecureBuffer> {
        Ok(SecureBuffer::wrap(self.next_bytes(size)?))
    }

    /// Entropy quality label for this generator.
    #[must_use]
    pub fn quality(&self) -> EntropyQuality {
        self.quality
    }
}

/// Generate `size` random bytes with an ephemeral generator.
///
/// The bytes are produced inside a [`SecureBuffer`] and cloned out, so the
/// internal copy is wiped before this returns.
///
/// # Errors
///
/// - `InvalidArgument` if `size` is zero
/// - `BackendUnavailable` if the OS CSPRNG fails
pub fn generate_bytes(size: usize) -> Result<Vec<u8>> {
    let mut buffer = SecureRandom::new()?.next_secure_bytes(size)?;
    Ok(buffer.reveal(|bytes| bytes.to_vec()))
}

/// Generate `size` random bytes formatted as lowercase hex.
///
/// Output length is exactly `2 * size`.
///
/// # Errors
///
/// See [`generate_bytes`].
pub fn generate_hex(size: usize) -> Result<String> {
    let mut buffer = SecureRandom::new()?.next_secure_bytes(size)?;
    Ok(buffer.reveal(|bytes| to_hex(bytes)))
}

/// Generate `size` random bytes formatted as Base64.
///
/// # Errors
///
/// See [`generate_bytes`].
pub fn generate_base64(size: usize, variant: Base64Variant) -> Result<String> {
    let mut buffer = SecureRandom::new()?.next_secure_bytes(size)?;
    Ok(buffer.reveal(|bytes| variant.encode(bytes)))
}
