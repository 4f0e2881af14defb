//! Self-describing ciphertext header.
//!
//! Every framed ciphertext starts with an 8-byte fixed prefix followed by a
//! format-defined parameter block (Big Endian throughout):
//!
//! ```text
//! offset  size  field
//! 0       4     magic = "SECB"
//! 4       1     version = 0x01
//! 5       1     algorithm id
//! 6       2     parameter block length L, big-endian
//! 8       L     parameter block
//! ```
//!
//! For AES-GCM the parameter block is `IV (12) || tag_bits (4)` and the
//! total header length is 24 bytes.
//!
//! # Security
//!
//! - Validation order is cheapest-check-first: length, magic, version,
//!   algorithm, parameter length, parameter content. The first mismatch
//!   fails with a specific sub-reason and no cipher state is touched.
//! - The prefix is cast from untrusted bytes via `zerocopy`; all 8-byte
//!   patterns are valid, so parsing arbitrary input cannot misbehave.
//! - Header validation precedes cipher init, so corruption of a validated
//!   field is always `InvalidHeader`, never `AuthFailure`.

use bytes::BufMut;
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use super::format::CipherFormat;
use crate::error::{Error, Result};

/// AES-GCM IV size in bytes (96-bit nonce per NIST SP 800-38D).
pub const IV_SIZE: usize = 12;

/// Fixed 8-byte header prefix (Big Endian).
#[repr(C)]
#[derive(Clone, Copy, FromBytes, IntoBytes, KnownLayout, Immutable)]
struct HeaderPrefix {
    magic: [u8; 4],
    version: u8,
    algorithm: u8,
    params_len: [u8; 2],
}

/// Parsed ciphertext header.
///
/// Constructed fresh per encryption and parsed fresh per decryption; never
/// persisted separately from the framed ciphertext.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CipherHeader {
    format: CipherFormat,
    iv: [u8; IV_SIZE],
    tag_bits: u32,
}

impl CipherHeader {
    /// Magic bytes identifying a securecrypto container.
    pub const MAGIC: [u8; 4] = *b"SECB";

    /// Current container version.
    pub const VERSION: u8 = 0x01;

    /// Size of the fixed prefix (8 bytes).
    pub const PREFIX_SIZE: usize = std::mem::size_of::<HeaderPrefix>();

    /// GCM authentication tag length in bits. The only accepted value.
    pub const GCM_TAG_BITS: u32 = 128;

    /// Create a header for a fresh encryption under `format`.
    #[must_use]
    pub fn new(format: CipherFormat, iv: [u8; IV_SIZE]) -> Self {
        Self { format, iv, tag_bits: Self::GCM_TAG_BITS }
    }

    /// Cipher format this header describes.
    #[must_use]
    pub fn format(&self) -> CipherFormat {
        self.format
    }

    /// Per-encryption initialization vector.
    #[must_use]
    pub fn iv(&self) -> &[u8; IV_SIZE] {
        &self.iv
    }

    /// Authentication tag length in bits.
    #[must_use]
    pub fn tag_bits(&self) -> u32 {
        self.tag_bits
    }

    /// Total encoded header length: prefix plus parameter block.
    #[must_use]
    pub fn encoded_len(&self) -> usize {
        Self::PREFIX_SIZE + self.format.params_len()
    }

    /// Serialize the header into `dst`.
    pub fn encode(&self, dst: &mut impl BufMut) {
        dst.put_slice(&Self::MAGIC);
        dst.put_u8(Self::VERSION);
        dst.put_u8(self.format.id());
        // params_len fits u16: the largest format block is 16 bytes
        dst.put_u16(self.format.params_len() as u16);
        dst.put_slice(&self.iv);
        dst.put_u32(self.tag_bits);
    }

    /// Parse and validate a header from the front of `bytes`.
    ///
    /// # Errors
    ///
    /// `InvalidHeader` with the sub-reason of the first failing check:
    /// "truncated header", "invalid magic", "unsupported version",
    /// "unsupported algorithm", "invalid params length", "truncated
    /// params", or "unexpected tag length".
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let prefix = HeaderPrefix::ref_from_prefix(bytes)
            .map_err(|_| Error::InvalidHeader { reason: "truncated header" })?
            .0;

        if prefix.magic != Self::MAGIC {
            return Err(Error::InvalidHeader { reason: "invalid magic" });
        }

        if prefix.version != Self::VERSION {
            return Err(Error::InvalidHeader { reason: "unsupported version" });
        }

        let Some(format) = CipherFormat::from_id(prefix.algorithm) else {
            return Err(Error::InvalidHeader { reason: "unsupported algorithm" });
        };

        let params_len = u16::from_be_bytes(prefix.params_len) as usize;
        if params_len == 0 || params_len != format.params_len() {
            return Err(Error::InvalidHeader { reason: "invalid params length" });
        }

        let params = bytes
            .get(Self::PREFIX_SIZE..Self::PREFIX_SIZE + params_len)
            .ok_or(Error::InvalidHeader { reason: "truncated params" })?;

        // AES-GCM parameter block: IV[0..12] || tag_bits_be[12..16]
        let mut iv = [0u8; IV_SIZE];
        iv.copy_from_slice(&params[..IV_SIZE]);

        let mut tag_be = [0u8; 4];
        tag_be.copy_from_slice(&params[IV_SIZE..]);
        let tag_bits = u32::from_be_bytes(tag_be);
        if tag_bits != Self::GCM_TAG_BITS {
            return Err(Error::InvalidHeader { reason: "unexpected tag length" });
        }

        Ok(Self { format, iv, tag_bits })
    }
}
