//! Two-source entropy mixing for defense in depth.
//!
//! [`EnhancedRandom`] combines two independent CSPRNG draws with a base draw
//! and the process identity, compressed through HKDF-SHA512. Mixing does not
//! strengthen entropy beyond the strongest input; it prevents a single
//! compromised source from dominating the output.
//!
//! # Security
//!
//! The mixer is `HKDF-Extract(SHA-512, salt = process identity, ikm =
//! block1 ‖ block2 ‖ base)` followed by `HKDF-Expand` to the requested
//! size. An attacker must control both fresh blocks *and* the base draw to
//! bias the output. All intermediate material is wiped before returning.

use hkdf::Hkdf;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::Sha512;
use zeroize::Zeroizing;

use super::identity::process_identity;
use super::{EntropyQuality, SecureRandom};
use crate::buffer::SecureBuffer;
use crate::error::{Error, Result};

/// Domain label for the mixer's expand step.
const MIX_INFO: &[u8] = b"enhanced-entropy.v1";

/// HKDF-SHA512 can expand at most 255 blocks of 64 bytes.
const MAX_OUTPUT: usize = 255 * 64;

/// Random generator that mixes two independent draws with the process
/// identity.
///
/// Construction requires the process identity; if it cannot be obtained the
/// constructor fails rather than silently downgrading, which is why
/// [`quality`](Self::quality) is always [`EntropyQuality::Hardware`].
#[derive(Debug)]
pub struct EnhancedRandom {
    base: SecureRandom,
}

impl EnhancedRandom {
    /// Create an enhanced generator.
    ///
    /// # Errors
    ///
    /// - `BackendUnavailable` if the process identity cannot be initialized
    ///   or the OS CSPRNG fails its warm-up draw
    pub fn new() -> Result<Self> {
        // Fail construction now, not at first draw
        process_identity()?;
        Ok(Self { base: SecureRandom::new()? })
    }

    /// Fill a fresh buffer of exactly `size` mixed bytes.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if `size` is zero or above the HKDF-SHA512
    ///   expand bound (16320 bytes)
    /// - `BackendUnavailable` if any CSPRNG draw fails
    pub fn next_bytes(&self, size: usize) -> Result<Vec<u8>> {
        if size == 0 {
            return Err(Error::invalid_argument("Size must be positive"));
        }
        if size > MAX_OUTPUT {
            return Err(Error::invalid_argument(format!(
                "Size must not exceed {MAX_OUTPUT} bytes"
            )));
        }

        let base = Zeroizing::new(self.base.next_bytes(size)?);
        mix(&base, size)
    }

    /// As [`next_bytes`](Self::next_bytes), wrapped for zeroization.
    pub fn next_secure_bytes(&self, size: usize) -> Result<SecureBuffer> {
        Ok(SecureBuffer::wrap(self.next_bytes(size)?))
    }

    /// Always [`EntropyQuality::Hardware`]: construction fails when the
    /// identity backend is unavailable instead of downgrading the label.
    #[must_use]
    pub fn quality(&self) -> EntropyQuality {
        EntropyQuality::Hardware
    }
}

/// Mix `base` with two fresh independent draws through HKDF-SHA512.
fn mix(base: &[u8], size: usize) -> Result<Vec<u8>> {
    let identity = process_identity()?;

    let mut ikm = Zeroizing::new(vec![0u8; size * 2 + base.len()]);
    let (blocks, tail) = ikm.split_at_mut(size * 2);
    let (block1, block2) = blocks.split_at_mut(size);
    for block in [block1, block2] {
        OsRng
            .try_fill_bytes(block)
            .map_err(|e| Error::BackendUnavailable { reason: format!("OS CSPRNG: {e}") })?;
    }
    tail.copy_from_slice(base);

    let hk = Hkdf::<Sha512>::new(Some(identity.as_slice()), &ikm);
    let mut output = vec![0u8; size];
    let Ok(()) = hk.expand(MIX_INFO, &mut output) else {
        unreachable!("size <= 255 * 64 is a valid HKDF-SHA512 output length");
    };

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quality_is_always_hardware() {
        let rng = EnhancedRandom::new().unwrap();
        assert_eq!(rng.quality(), EntropyQuality::Hardware);
    }

    #[test]
    fn next_bytes_returns_requested_size() {
        let rng = EnhancedRandom::new().unwrap();
        for size in [1, 32, 64, 65, 4096] {
            assert_eq!(rng.next_bytes(size).unwrap().len(), size);
        }
    }

    #[test]
    fn zero_size_is_rejected() {
        let rng = EnhancedRandom::new().unwrap();
        assert!(matches!(rng.next_bytes(0), Err(Error::InvalidArgument { .. })));
    }

    #[test]
    fn oversized_request_is_rejected() {
        let rng = EnhancedRandom::new().unwrap();
        assert!(matches!(rng.next_bytes(MAX_OUTPUT + 1), Err(Error::InvalidArgument { .. })));
    }

    #[test]
    fn max_output_is_accepted() {
        let rng = EnhancedRandom::new().unwrap();
        assert_eq!(rng.next_bytes(MAX_OUTPUT).unwrap().len(), MAX_OUTPUT);
    }

    #[test]
    fn successive_draws_differ() {
        let rng = EnhancedRandom::new().unwrap();
        let a = rng.next_bytes(32).unwrap();
        let b = rng.next_bytes(32).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn secure_bytes_carry_requested_size() {
        let rng = EnhancedRandom::new().unwrap();
        assert_eq!(rng.next_secure_bytes(24).unwrap().len(), 24);
    }
}
