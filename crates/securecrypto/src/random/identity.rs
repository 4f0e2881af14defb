//! Process-scoped identity bytes for the enhanced mixer.
//!
//! The identity is an opaque 32-byte token drawn once per process and used
//! as a domain-separation salt. It is stable for the process lifetime, is
//! not secret, and is never counted as an entropy source.

use std::sync::OnceLock;

use rand::rngs::OsRng;
use rand::RngCore;

use crate::error::{Error, Result};

/// Length of the identity token in bytes.
pub(crate) const IDENTITY_LEN: usize = 32;

/// Initialization outcome, latched on first use. A failed draw stays failed
/// for the process lifetime so callers see a consistent answer.
static PROCESS_IDENTITY: OnceLock<std::result::Result<[u8; IDENTITY_LEN], String>> =
    OnceLock::new();

/// Process-stable identity bytes, initialized lazily on first use.
///
/// # Errors
///
/// - `BackendUnavailable` if the one-shot initialization draw failed; the
///   failure is latched and re-returned on every subsequent call
pub(crate) fn process_identity() -> Result<&'static [u8; IDENTITY_LEN]> {
    let slot = PROCESS_IDENTITY.get_or_init(|| {
        let mut identity = [0u8; IDENTITY_LEN];
        OsRng
            .try_fill_bytes(&mut identity)
            .map_err(|e| format!("process identity draw: {e}"))?;
        Ok(identity)
    });

    match slot {
        Ok(identity) => Ok(identity),
        Err(reason) => Err(Error::BackendUnavailable { reason: reason.clone() }),
    }
}
