//! Error types for the securecrypto library.
//!
//! One strongly-typed enum covers every failure the public surface can
//! return. Authentication failure and header mismatch are *expected*
//! non-exceptional outcomes that callers branch on, so they get their own
//! variants rather than being folded into a generic failure.
//!
//! Error messages may carry sizes, algorithm names, and parse sub-reasons.
//! They never carry bytes from keys, plaintext, ciphertext, IVs, or derived
//! material.

use std::io;

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by securecrypto operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A caller-supplied argument failed validation.
    #[error("invalid argument: {reason}")]
    InvalidArgument {
        /// What was wrong with the argument
        reason: String,
    },

    /// A framed ciphertext failed header validation.
    ///
    /// Raised before any cipher state is initialized; a corrupted header is
    /// never reported as an authentication failure.
    #[error("invalid header: {reason}")]
    InvalidHeader {
        /// Which header-parse step rejected the input
        reason: &'static str,
    },

    /// GCM tag verification failed on decrypt.
    ///
    /// Indicates a wrong key or a tampered body. The two cases are
    /// indistinguishable by design.
    #[error("authentication failed")]
    AuthFailure,

    /// The entropy backend or process-identity handle could not be obtained.
    #[error("backend unavailable: {reason}")]
    BackendUnavailable {
        /// Why the backend could not be initialized
        reason: String,
    },

    /// A file read, write, or rename failed.
    #[error("i/o failure: {source}")]
    IoFailure {
        /// The underlying cause
        #[source]
        source: io::Error,
    },

    /// Hex/Base64 decoding received malformed input, or decrypted plaintext
    /// was not valid UTF-8.
    #[error("encoding failure: {reason}")]
    EncodingFailure {
        /// What failed to decode
        reason: String,
    },
}

impl Error {
    /// Returns true if this error may succeed on retry.
    ///
    /// I/O and backend failures are environmental. Everything else is a
    /// contract violation or a cryptographic rejection and will fail the
    /// same way again.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::IoFailure { .. } | Self::BackendUnavailable { .. })
    }

    /// Returns true for a GCM tag mismatch (wrong key or tampered body).
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Self::AuthFailure)
    }

    pub(crate) fn invalid_argument(reason: impl Into<String>) -> Self {
        Self::InvalidArgument { reason: reason.into() }
    }
}

impl From<io::Error> for Error {
    fn from(source: io::Error) -> Self {
        Self::IoFailure { source }
    }
}
