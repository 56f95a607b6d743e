//! Cache key derivation.

use std::fmt::Write;

use sha2::{Digest, Sha256};

/// Number of digest bytes kept in a key (32 hex characters).
const KEY_BYTES: usize = 16;

/// Durable storage identifier for a logical page path.
///
/// The key is the lowercase hex encoding of the first 16 bytes of the
/// SHA-256 digest of the path. It contains only `[0-9a-f]`, so it is safe to
/// use as a file name stem whatever the input looked like.
///
/// ```rust
/// use docfetch_core::CacheKey;
///
/// let a = CacheKey::derive("chart-types/line-chart");
/// let b = CacheKey::derive("chart-types/line-chart");
/// assert_eq!(a, b);
/// assert_eq!(a.as_str().len(), 32);
/// assert_ne!(a, CacheKey::derive("chart-types/bar-chart"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Derive the key for `path`. Total and deterministic for every input.
    #[must_use]
    pub fn derive(path: &str) -> Self {
        let digest = Sha256::digest(path.as_bytes());
        let hex = digest
            .iter()
            .take(KEY_BYTES)
            .fold(String::with_capacity(KEY_BYTES * 2), |mut acc, b| {
                // write! to String is infallible
                let _ = write!(acc, "{b:02x}");
                acc
            });
        Self(hex)
    }

    /// Get the hex representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
