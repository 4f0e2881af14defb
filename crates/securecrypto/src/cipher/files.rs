//! Whole-file encryption and decryption.
//!
//! Files are read fully into memory, transformed, and written through a
//! temp file in the destination directory that is renamed into place on
//! success. A readable destination therefore always holds a complete,
//! authenticated result, even if the task is cancelled mid-write.
//!
//! Sources above 10 MiB are rejected up front; this surface is for small
//! mobile payloads, not streaming archives.

use std::io::Write;
use std::path::{Path, PathBuf};

use zeroize::Zeroizing;

use super::{decrypt_bytes, encrypt_bytes};
use crate::error::{Error, Result};

/// Largest accepted source file, in bytes (10 MiB).
pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Encrypt `src` into `dst` as a framed ciphertext file.
///
/// The plaintext buffer is wiped on every exit path. The destination is
/// replaced atomically: the framed output lands in a temp file next to
/// `dst` and is renamed over it only after a complete write.
///
/// # Errors
///
/// - `InvalidArgument` if `key` is not 32 bytes or the source exceeds
///   [`MAX_FILE_SIZE`]
/// - `IoFailure` if reading, writing, or renaming fails
pub async fn encrypt_file(key: &[u8], src: &Path, dst: &Path) -> Result<()> {
    let size = checked_source_size(src).await?;
    tracing::debug!(size, "encrypting file");

    let plaintext = Zeroizing::new(tokio::fs::read(src).await?);
    let key = Zeroizing::new(key.to_vec());
    let dst = dst.to_path_buf();

    run_blocking(move || {
        let framed = encrypt_bytes(&key, &plaintext)?;
        write_atomically(&dst, &framed)
    })
    .await
}

/// Decrypt the framed ciphertext file `src` into `dst`.
///
/// Authentication failure leaves `dst` untouched; the plaintext reaches
/// disk only after the GCM tag verifies.
///
/// # Errors
///
/// - `InvalidArgument` if `key` is not 32 bytes or the source exceeds
///   [`MAX_FILE_SIZE`]
/// - `InvalidHeader` / `AuthFailure` as for [`decrypt_bytes`]
/// - `IoFailure` if reading, writing, or renaming fails
pub async fn decrypt_file(key: &[u8], src: &Path, dst: &Path) -> Result<()> {
    let size = checked_source_size(src).await?;
    tracing::debug!(size, "decrypting file");

    let framed = tokio::fs::read(src).await?;
    let key = Zeroizing::new(key.to_vec());
    let dst = dst.to_path_buf();

    run_blocking(move || {
        let plaintext = Zeroizing::new(decrypt_bytes(&key, &framed)?);
        write_atomically(&dst, &plaintext)
    })
    .await
}

/// Source size after the cap check.
async fn checked_source_size(src: &Path) -> Result<u64> {
    let metadata = tokio::fs::metadata(src).await?;
    if metadata.len() > MAX_FILE_SIZE {
        return Err(Error::invalid_argument("File exceeds maximum allowed size"));
    }
    Ok(metadata.len())
}

/// Run CPU-bound work plus the final write on the blocking pool.
async fn run_blocking(work: impl FnOnce() -> Result<()> + Send + 'static) -> Result<()> {
    match tokio::task::spawn_blocking(work).await {
        Ok(outcome) => outcome,
        Err(join_error) => {
            Err(Error::from(std::io::Error::new(std::io::ErrorKind::Other, join_error)))
        },
    }
}

/// Write `contents` to a temp file beside `dst`, then rename into place.
fn write_atomically(dst: &Path, contents: &[u8]) -> Result<()> {
    let parent = match dst.parent() {
        Some(parent) if parent != Path::new("") => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    let mut tmp = tempfile::NamedTempFile::new_in(parent)?;
    tmp.write_all(contents)?;
    tmp.flush()?;
    tmp.persist(dst).map_err(|e| Error::from(e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_file_size_is_ten_mebibytes() {
        assert_eq!(MAX_FILE_SIZE, 10 * 1024 * 1024);
    }
}
