//! HKDF key derivation with strict domain separation.
//!
//! Derivation follows RFC 5869: Extract with the "salt not provided" case
//! (all-zero salt of hash length), then Expand over a structured info
//! string. The info string binds library identity, caller domain, scheme
//! version, and caller context:
//!
//! ```text
//! info = "com.mavbozo.androidsecurecrypto." || domain || ".v1:" || context
//! ```
//!
//! Keys derived for different domains from the same master key are
//! computationally independent. The `.v1:` version tag is part of the wire
//! contract; changing it is a derivation-scheme version bump.
//!
//! Extract and Expand are driven directly over HMAC rather than through a
//! one-shot KDF object, so every intermediate lives in a buffer this module
//! owns and wipes.
//!
//! # Security
//!
//! - Deterministic: fixed inputs produce bit-identical output across calls
//!   and across implementations.
//! - Derived keys are returned only inside a [`SecureBuffer`].
//! - The salt, the PRK, and every `T(i)` block are zeroized before return
//!   on both success and failure paths; the output key material is written
//!   straight into the buffer the `SecureBuffer` wraps, leaving no loose
//!   copies.

use hmac::digest::KeyInit;
use hmac::{Hmac, Mac};
use sha1::Sha1;
use sha2::{Sha256, Sha512};
use zeroize::{Zeroize, Zeroizing};

use crate::buffer::SecureBuffer;
use crate::error::{Error, Result};

/// Library-identity prefix of every info string.
const INFO_PREFIX: &str = "com.mavbozo.androidsecurecrypto.";

/// Derivation-scheme version tag. Changing this is a breaking change to
/// every derived key.
const INFO_VERSION_TAG: &str = ".v1:";

/// Minimum accepted master key length in bytes.
const MIN_MASTER_KEY_LEN: usize = 16;

/// Default derived key size in bytes.
pub const DEFAULT_KEY_SIZE: usize = 32;

/// HMAC variant driving HKDF.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HkdfAlgorithm {
    /// HMAC-SHA256, 32-byte MAC
    Sha256,
    /// HMAC-SHA512, 64-byte MAC
    Sha512,
    /// HMAC-SHA1, 20-byte MAC. Deprecated; kept for compatibility with
    /// existing derivations only. New callers use [`Self::Sha256`].
    Sha1,
}

impl HkdfAlgorithm {
    /// MAC output length in bytes.
    #[must_use]
    pub const fn hash_len(self) -> usize {
        match self {
            Self::Sha256 => 32,
            Self::Sha512 => 64,
            Self::Sha1 => 20,
        }
    }

    /// JCA-style HMAC algorithm name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sha256 => "HmacSHA256",
            Self::Sha512 => "HmacSHA512",
            Self::Sha1 => "HmacSHA1",
        }
    }

    /// Largest derivable key in bytes (`255 * hash_len`, RFC 5869 §2.3).
    #[must_use]
    pub const fn max_output(self) -> usize {
        255 * self.hash_len()
    }
}

/// Build the info string binding library identity, domain, and context.
fn build_info(domain: &str, context: &str) -> Vec<u8> {
    let mut info = Vec::with_capacity(
        INFO_PREFIX.len() + domain.len() + INFO_VERSION_TAG.len() + context.len(),
    );
    info.extend_from_slice(INFO_PREFIX.as_bytes());
    info.extend_from_slice(domain.as_bytes());
    info.extend_from_slice(INFO_VERSION_TAG.as_bytes());
    info.extend_from_slice(context.as_bytes());
    info
}

/// Single-shot HMAC of `parts` under `key`, written into `out`.
///
/// `out` must be exactly the MAC output size. The MAC digest is wiped after
/// the copy.
fn hmac_into<M: Mac + KeyInit>(key: &[u8], parts: &[&[u8]], out: &mut [u8]) {
    let Ok(mut mac) = <M as KeyInit>::new_from_slice(key) else {
        unreachable!("HMAC accepts any key size");
    };
    for part in parts {
        mac.update(part);
    }

    let mut digest = mac.finalize().into_bytes();
    out.copy_from_slice(digest.as_slice());
    digest.as_mut_slice().zeroize();
}

/// HKDF-Extract then HKDF-Expand (RFC 5869 §2.2, §2.3), filling `okm`.
///
/// The caller has already bounded `okm.len()` by `255 * hash_len`. Salt,
/// PRK, and every `T(i)` block are owned here and wiped on drop.
fn hkdf_into<M: Mac + KeyInit>(master_key: &[u8], info: &[u8], okm: &mut [u8]) {
    let hash_len = M::output_size();

    // Extract: PRK = HMAC(salt, IKM) with the "salt not provided" case,
    // an all-zero salt of hash length.
    let salt = Zeroizing::new(vec![0u8; hash_len]);
    let mut prk = Zeroizing::new(vec![0u8; hash_len]);
    hmac_into::<M>(&salt, &[master_key], &mut prk);

    // Expand: T(i) = HMAC(PRK, T(i-1) || info || i), output T(1)..T(N)
    // truncated to okm.len(). N <= 255, so the counter octet cannot wrap.
    let mut t_prev = Zeroizing::new(vec![0u8; hash_len]);
    let mut t_next = Zeroizing::new(vec![0u8; hash_len]);
    let mut counter = 1u8;
    let mut offset = 0;

    hmac_into::<M>(&prk, &[info, &[counter]], &mut t_next);
    loop {
        let take = (okm.len() - offset).min(hash_len);
        okm[offset..offset + take].copy_from_slice(&t_next[..take]);
        offset += take;
        if offset == okm.len() {
            break;
        }

        std::mem::swap(&mut t_prev, &mut t_next);
        counter += 1;
        hmac_into::<M>(&prk, &[t_prev.as_slice(), info, &[counter]], &mut t_next);
    }
}

/// Derive a 32-byte key with HKDF-SHA256.
///
/// Shorthand for [`derive_key_with`] with the default size and algorithm.
///
/// # Errors
///
/// See [`derive_key_with`].
pub fn derive_key(master_key: &[u8], domain: &str, context: &str) -> Result<SecureBuffer> {
    derive_key_with(master_key, domain, context, DEFAULT_KEY_SIZE, HkdfAlgorithm::Sha256)
}

/// Derive a key of `key_size` bytes with the given HKDF variant.
///
/// For fixed inputs the output is bit-for-bit identical across calls; keys
/// derived under distinct domains or contexts are independent.
///
/// # Errors
///
/// Preconditions are checked in order; the first failure is returned:
///
/// - `InvalidArgument("Key size must be positive")` if `key_size` is zero
/// - `InvalidArgument("Master key too short")` if the master key is under
///   16 bytes
/// - `InvalidArgument("Domain must not be empty")`
/// - `InvalidArgument("Context must not be empty")`
/// - `InvalidArgument` if `key_size` exceeds `255 * hash_len`
pub fn derive_key_with(
    master_key: &[u8],
    domain: &str,
    context: &str,
    key_size: usize,
    algorithm: HkdfAlgorithm,
) -> Result<SecureBuffer> {
    if key_size == 0 {
        return Err(Error::invalid_argument("Key size must be positive"));
    }
    if master_key.len() < MIN_MASTER_KEY_LEN {
        return Err(Error::invalid_argument("Master key too short"));
    }
    if domain.is_empty() {
        return Err(Error::invalid_argument("Domain must not be empty"));
    }
    if context.is_empty() {
        return Err(Error::invalid_argument("Context must not be empty"));
    }
    if key_size > algorithm.max_output() {
        return Err(Error::invalid_argument(format!(
            "Key size must not exceed {} bytes for {}",
            algorithm.max_output(),
            algorithm.name()
        )));
    }

    if algorithm == HkdfAlgorithm::Sha1 {
        tracing::warn!(algorithm = algorithm.name(), "deriving key with deprecated algorithm");
    }

    let info = build_info(domain, context);
    let mut okm = vec![0u8; key_size];

    match algorithm {
        HkdfAlgorithm::Sha256 => hkdf_into::<Hmac<Sha256>>(master_key, &info, &mut okm),
        HkdfAlgorithm::Sha512 => hkdf_into::<Hmac<Sha512>>(master_key, &info, &mut okm),
        HkdfAlgorithm::Sha1 => hkdf_into::<Hmac<Sha1>>(master_key, &info, &mut okm),
    }

    Ok(SecureBuffer::wrap(okm))
}

#[cfg(test)]
mod tests {
    use super::*;

    const MASTER: [u8; 32] = [0xAA; 32];

    fn derived(domain: &str, context: &str) -> Vec<u8> {
        derive_key(&MASTER, domain, context).unwrap().reveal(|k| k.to_vec())
    }

    #[test]
    fn derive_produces_requested_size() {
        let key = derive_key(&MASTER, "myapp.encryption", "user-data-key").unwrap();
        assert_eq!(key.len(), 32);

        let wide =
            derive_key_with(&MASTER, "myapp.encryption", "k", 64, HkdfAlgorithm::Sha512).unwrap();
        assert_eq!(wide.len(), 64);
    }

    #[test]
    fn derive_is_deterministic() {
        let first = derived("myapp.encryption", "user-data-key");
        let second = derived("myapp.encryption", "user-data-key");
        assert_eq!(first, second, "same inputs must produce same output");
    }

    #[test]
    fn matches_reference_hkdf_sha256() {
        // Cross-check the hand-driven Extract/Expand against the hkdf
        // crate, including multi-block and truncated-block output sizes
        let info = build_info("myapp.encryption", "user-data-key");
        for key_size in [1usize, 31, 32, 33, 64, 100] {
            let ours = derive_key_with(
                &MASTER,
                "myapp.encryption",
                "user-data-key",
                key_size,
                HkdfAlgorithm::Sha256,
            )
            .unwrap()
            .reveal(|k| k.to_vec());

            let mut expected = vec![0u8; key_size];
            hkdf::Hkdf::<Sha256>::new(None, &MASTER).expand(&info, &mut expected).unwrap();
            assert_eq!(ours, expected, "mismatch at key_size {key_size}");
        }
    }

    #[test]
    fn matches_reference_hkdf_sha512_and_sha1() {
        let info = build_info("d", "c");

        let ours =
            derive_key_with(&MASTER, "d", "c", 72, HkdfAlgorithm::Sha512).unwrap().reveal(|k| {
                k.to_vec()
            });
        let mut expected = vec![0u8; 72];
        hkdf::Hkdf::<Sha512>::new(None, &MASTER).expand(&info, &mut expected).unwrap();
        assert_eq!(ours, expected);

        let ours = derive_key_with(&MASTER, "d", "c", 25, HkdfAlgorithm::Sha1).unwrap().reveal(
            |k| k.to_vec(),
        );
        let mut expected = vec![0u8; 25];
        hkdf::Hkdf::<Sha1>::new(None, &MASTER).expand(&info, &mut expected).unwrap();
        assert_eq!(ours, expected);
    }

    #[test]
    fn distinct_domains_produce_distinct_keys() {
        let encryption = derived("myapp.encryption", "user-data-key");
        let signing = derived("myapp.signing", "user-data-key");
        assert_ne!(encryption, signing, "domain separation must hold");
    }

    #[test]
    fn distinct_contexts_produce_distinct_keys() {
        let a = derived("myapp.encryption", "user-data-key");
        let b = derived("myapp.encryption", "session-key");
        assert_ne!(a, b, "context separation must hold");
    }

    #[test]
    fn distinct_algorithms_produce_distinct_keys() {
        let sha256 =
            derive_key_with(&MASTER, "d", "c", 20, HkdfAlgorithm::Sha256).unwrap().reveal(|k| {
                k.to_vec()
            });
        let sha1 = derive_key_with(&MASTER, "d", "c", 20, HkdfAlgorithm::Sha1).unwrap().reveal(
            |k| k.to_vec(),
        );
        assert_ne!(sha256, sha1);
    }

    #[test]
    fn precondition_order_key_size_first() {
        // Multiple violations: key_size wins
        let result = derive_key_with(&[0u8; 4], "", "", 0, HkdfAlgorithm::Sha256);
        assert!(
            matches!(result, Err(Error::InvalidArgument { reason }) if reason == "Key size must be positive")
        );
    }

    #[test]
    fn short_master_key_is_rejected() {
        let result = derive_key(&[0u8; 15], "domain", "context");
        assert!(
            matches!(result, Err(Error::InvalidArgument { reason }) if reason == "Master key too short")
        );
    }

    #[test]
    fn sixteen_byte_master_key_is_accepted() {
        assert!(derive_key(&[0u8; 16], "domain", "context").is_ok());
    }

    #[test]
    fn empty_domain_is_rejected() {
        let result = derive_key(&MASTER, "", "context");
        assert!(
            matches!(result, Err(Error::InvalidArgument { reason }) if reason == "Domain must not be empty")
        );
    }

    #[test]
    fn empty_context_is_rejected() {
        let result = derive_key(&MASTER, "domain", "");
        assert!(
            matches!(result, Err(Error::InvalidArgument { reason }) if reason == "Context must not be empty")
        );
    }

    #[test]
    fn oversized_key_is_rejected_per_algorithm() {
        let too_big = HkdfAlgorithm::Sha256.max_output() + 1;
        let result = derive_key_with(&MASTER, "d", "c", too_big, HkdfAlgorithm::Sha256);
        assert!(matches!(result, Err(Error::InvalidArgument { .. })));

        // Same size is fine under SHA-512's larger bound
        assert!(derive_key_with(&MASTER, "d", "c", too_big, HkdfAlgorithm::Sha512).is_ok());
    }

    #[test]
    fn max_output_is_derivable() {
        let size = HkdfAlgorithm::Sha256.max_output();
        let key = derive_key_with(&MASTER, "d", "c", size, HkdfAlgorithm::Sha256).unwrap();
        assert_eq!(key.len(), size);
    }

    #[test]
    fn info_string_layout() {
        let info = build_info("myapp.encryption", "user-data-key");
        assert_eq!(
            info,
            b"com.mavbozo.androidsecurecrypto.myapp.encryption.v1:user-data-key"
        );
    }

    #[test]
    fn algorithm_descriptors() {
        assert_eq!(HkdfAlgorithm::Sha256.hash_len(), 32);
        assert_eq!(HkdfAlgorithm::Sha512.hash_len(), 64);
        assert_eq!(HkdfAlgorithm::Sha1.hash_len(), 20);
        assert_eq!(HkdfAlgorithm::Sha256.name(), "HmacSHA256");
        assert_eq!(HkdfAlgorithm::Sha1.max_output(), 255 * 20);
    }
}
