//! Time-bounded page cache on the local filesystem.
//!
//! Each logical path maps to one JSON file named after its [`CacheKey`]:
//!
//! ```text
//! <cache_dir>/
//!   3f1c0d9a6b2e4f7081a2b3c4d5e6f708.json
//!   9e8d7c6b5a4f3e2d1c0b9a8f7e6d5c4b.json
//! ```
//!
//! The cache is strictly best-effort. Reads collapse every failure (missing
//! directory, unreadable file, corrupt JSON, stale record) into a miss, and
//! writes report failure through `tracing` and a `false` return value
//! instead of an error. Stale records are not deleted; the next write for the
//! same path overwrites them.
//!
//! ## Example
//!
//! ```rust,no_run
//! use docfetch_core::{CacheStore, Page};
//!
//! let store = CacheStore::new(".cache", 3600);
//! let page = Page::new("Bar Chart", "https://docs.example.com/chart-types/bar-chart", "...");
//! store.write("chart-types/bar-chart", &page);
//! assert_eq!(store.read("chart-types/bar-chart"), Some(page));
//! ```

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::{debug, warn};

use crate::key::CacheKey;
use crate::types::{CacheRecord, Page};
use crate::{Error, Result};

/// File extension used for cache records.
const RECORD_EXTENSION: &str = "json";

/// Filesystem-backed page cache with a process-wide TTL.
///
/// ## Concurrency
///
/// No locking is performed. Writes go through a uniquely named temp file in
/// the cache directory and are renamed into place, so a concurrent reader
/// sees either the previous record or the new one, never a torn file.
/// Concurrent writers for the same path race and the last rename wins.
#[derive(Debug, Clone)]
pub struct CacheStore {
    dir: PathBuf,
    ttl_secs: i64,
}

impl CacheStore {
    /// Create a store rooted at `dir` with a TTL of `ttl_secs` seconds.
    ///
    /// A TTL of zero or less disables the cache: reads always miss and
    /// writes do nothing. The directory is created lazily on first write.
    #[must_use]
    pub fn new(dir: impl AsRef<Path>, ttl_secs: i64) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            ttl_secs,
        }
    }

    /// Whether caching is active.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.ttl_secs > 0
    }

    /// Directory holding the cache records.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Configured TTL in seconds.
    #[must_use]
    pub const fn ttl_secs(&self) -> i64 {
        self.ttl_secs
    }

    /// Location of the record for a logical path.
    #[must_use]
    pub fn record_path(&self, path: &str) -> PathBuf {
        let key = CacheKey::derive(path);
        self.dir.join(format!("{key}.{RECORD_EXTENSION}"))
    }

    /// Look up a fresh page for `path`.
    ///
    /// Returns `None` when caching is disabled, when no readable record
    /// exists, or when the record has outlived the TTL.
    pub fn read(&self, path: &str) -> Option<Page> {
        if !self.is_enabled() {
            return None;
        }

        let record = match self.load_record(path) {
            Ok(record) => record?,
            Err(e) => {
                warn!(path, error = %e, "ignoring unreadable cache record");
                return None;
            },
        };

        let now = Utc::now().timestamp_millis();
        if record.is_fresh_at(now, self.ttl_secs) {
            debug!(path, "cache hit");
            Some(record.page)
        } else {
            debug!(path, cached_at = record.cached_at, "cache record is stale");
            None
        }
    }

    /// Persist `page` for `path`, stamped with the current time.
    ///
    /// Returns whether the record was written. Failures are logged and
    /// swallowed; a disabled cache returns `false` without touching storage.
    pub fn write(&self, path: &str, page: &Page) -> bool {
        if !self.is_enabled() {
            return false;
        }

        let record = CacheRecord::new(page.clone(), Utc::now().timestamp_millis());
        match self.write_record(path, &record) {
            Ok(()) => {
                debug!(path, "cached page");
                true
            },
            Err(e) => {
                warn!(path, error = %e, "failed to write cache record");
                false
            },
        }
    }

    /// Write a record verbatim, overwriting any existing one.
    ///
    /// Unlike [`write`](Self::write) this propagates errors and ignores the
    /// TTL, which makes it the primitive for tests and tooling that need to
    /// plant records with a specific timestamp.
    pub fn write_record(&self, path: &str, record: &CacheRecord) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .map_err(|e| Error::Storage(format!("Failed to create cache directory: {e}")))?;

        let json = serde_json::to_vec(record)?;

        let mut tmp = tempfile::NamedTempFile::new_in(&self.dir)
            .map_err(|e| Error::Storage(format!("Failed to create temp record: {e}")))?;
        tmp.write_all(&json)
            .map_err(|e| Error::Storage(format!("Failed to write temp record: {e}")))?;

        let target = self.record_path(path);
        tmp.persist(&target)
            .map_err(|e| Error::Storage(format!("Failed to commit cache record: {e}")))?;
        Ok(())
    }

    /// Load the raw record for `path` regardless of age.
    ///
    /// `Ok(None)` means no record exists.
    fn load_record(&self, path: &str) -> Result<Option<CacheRecord>> {
        let file = self.record_path(path);
        let bytes = match fs::read(&file) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(Error::Storage(format!(
                    "Failed to read {}: {e}",
                    file.display()
                )));
            },
        };
        let record = serde_json::from_slice(&bytes)?;
        Ok(Some(record))
    }
}
