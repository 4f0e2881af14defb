//! Cipher format descriptors.
//!
//! A closed set of supported formats. Each variant pins the algorithm id
//! byte, the parameter block length, and the key size that the header codec
//! and the cipher driver agree on.

/// Supported authenticated cipher formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CipherFormat {
    /// AES-256 in GCM mode, 96-bit IV, 128-bit tag
    AesGcm,
}

impl CipherFormat {
    /// Algorithm id byte written into the header.
    #[must_use]
    pub const fn id(self) -> u8 {
        match self {
            Self::AesGcm => 0x01,
        }
    }

    /// Length of the format-defined parameter block in bytes.
    ///
    /// For AES-GCM: `IV (12) || tag_bit_length (4, big-endian)`.
    #[must_use]
    pub const fn params_len(self) -> usize {
        match self {
            Self::AesGcm => 16,
        }
    }

    /// Required key size in bytes.
    #[must_use]
    pub const fn key_len(self) -> usize {
        match self {
            Self::AesGcm => 32,
        }
    }

    /// Resolve an algorithm id byte. `None` if unrecognized.
    #[must_use]
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            0x01 => Some(Self::AesGcm),
            _ => None,
        }
    }
}
