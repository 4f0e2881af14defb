//! Hex and Base64 formatting for random output and framed ciphertext.

use base64::engine::{general_purpose, GeneralPurpose};
use base64::Engine as _;

use crate::error::{Error, Result};

/// Format bytes as lowercase hex, two characters per byte, no separators.
#[must_use]
pub fn to_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

/// Base64 output variant.
///
/// All variants emit a single continuous string with no line breaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Base64Variant {
    /// Standard alphabet (`+`, `/`), padded
    Standard,
    /// Standard alphabet, no padding
    StandardNoPad,
    /// URL-safe alphabet (`-`, `_`), padded
    UrlSafe,
    /// URL-safe alphabet, no padding
    UrlSafeNoPad,
}

impl Base64Variant {
    fn engine(self) -> &'static GeneralPurpose {
        match self {
            Self::Standard => &general_purpose::STANDARD,
            Self::StandardNoPad => &general_purpose::STANDARD_NO_PAD,
            Self::UrlSafe => &general_purpose::URL_SAFE,
            Self::UrlSafeNoPad => &general_purpose::URL_SAFE_NO_PAD,
        }
    }

    /// Encode bytes under this variant.
    #[must_use]
    pub fn encode(self, bytes: &[u8]) -> String {
        self.engine().encode(bytes)
    }

    /// Decode a string under this variant.
    ///
    /// # Errors
    ///
    /// - `EncodingFailure` if the input is not valid Base64 for this variant
    pub fn decode(self, input: &str) -> Result<Vec<u8>> {
        self.engine()
            .decode(input)
            .map_err(|e| Error::EncodingFailure { reason: format!("malformed Base64: {e}") })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_is_lowercase_two_chars_per_byte() {
        let encoded = to_hex(&[0x00, 0xAB, 0xFF]);
        assert_eq!(encoded, "00abff");
    }

    #[test]
    fn hex_of_empty_is_empty() {
        assert_eq!(to_hex(&[]), "");
    }

    #[test]
    fn standard_variant_pads() {
        let encoded = Base64Variant::Standard.encode(&[0xFF]);
        assert_eq!(encoded, "/w==");
    }

    #[test]
    fn no_pad_variant_strips_padding() {
        let encoded = Base64Variant::StandardNoPad.encode(&[0xFF]);
        assert_eq!(encoded, "/w");
    }

    #[test]
    fn url_safe_variant_uses_url_alphabet() {
        // 0xFB 0xFF encodes to "+/8=" standard, "-_8=" url-safe
        let encoded = Base64Variant::UrlSafe.encode(&[0xFB, 0xFF]);
        assert_eq!(encoded, "-_8=");
        assert!(!encoded.contains('+'));
        assert!(!encoded.contains('/'));
    }

    #[test]
    fn url_safe_no_pad_variant() {
        let encoded = Base64Variant::UrlSafeNoPad.encode(&[0xFB, 0xFF]);
        assert_eq!(encoded, "-_8");
    }

    #[test]
    fn all_variants_round_trip() {
        let data = b"arbitrary payload bytes \x00\xFF\x80";
        for variant in [
            Base64Variant::Standard,
            Base64Variant::StandardNoPad,
            Base64Variant::UrlSafe,
            Base64Variant::UrlSafeNoPad,
        ] {
            let encoded = variant.encode(data);
            assert!(!encoded.contains('\n'), "output must be a single line");
            let decoded = variant.decode(&encoded).unwrap();
            assert_eq!(decoded, data, "round-trip failed for {variant:?}");
        }
    }

    #[test]
    fn decode_rejects_malformed_input() {
        let result = Base64Variant::Standard.decode("not!!valid@@base64");
        assert!(matches!(result, Err(Error::EncodingFailure { .. })));
    }
}
