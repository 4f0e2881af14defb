//! Zeroizing byte container for key material and plaintext.
//!
//! Every sensitive buffer in this crate lives inside a [`SecureBuffer`].
//! Contents are only reachable through a scoped borrow that wipes the whole
//! region before control returns to the caller, on every exit path: normal
//! return, propagated error, or panic.
//!
//! # Security
//!
//! - The wipe uses `zeroize`, whose writes the compiler cannot elide.
//! - A panic inside the scoped closure still wipes (drop guard) before the
//!   panic propagates.
//! - Dropping a buffer that was never revealed wipes it too.
//! - After the first reveal the region stays allocated but all-zero; a
//!   second reveal observes zeros. This is an observable contract that
//!   callers may test against.

use zeroize::Zeroize;

/// Heap-allocated byte region that is wiped on every exit path.
pub struct SecureBuffer {
    bytes: Vec<u8>,
}

/// Wipes the borrowed region when dropped, including during unwinding.
struct WipeGuard<'a> {
    bytes: &'a mut [u8],
}

impl Drop for WipeGuard<'_> {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

impl SecureBuffer {
    /// Take ownership of a buffer produced upstream.
    ///
    /// Wrapping never fails and never copies.
    #[must_use]
    pub fn wrap(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Length of the owned region in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// True if the owned region is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Run `scope` with a mutable view of the bytes, then wipe the region.
    ///
    /// The wipe happens after `scope` produces its value and before `reveal`
    /// returns, whether `scope` returns normally or panics. A second call
    /// observes an all-zero region of the same length.
    pub fn reveal<T>(&mut self, scope: impl FnOnce(&mut [u8]) -> T) -> T {
        let guard = WipeGuard { bytes: &mut self.bytes };
        scope(&mut *guard.bytes)
        // guard drops here: region wiped before the value escapes
    }
}

impl Drop for SecureBuffer {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

impl std::fmt::Debug for SecureBuffer {
    // Never prints contents
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecureBuffer").field("len", &self.bytes.len()).finish_non_exhaustive()
    }
}
