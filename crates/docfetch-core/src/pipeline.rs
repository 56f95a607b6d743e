//! Cache-backed page retrieval.
//!
//! [`FetchPipeline::get`] is the single entry point callers use:
//!
//! ```text
//! get(path) ──► CacheStore::read ──hit──► Page
//!                    │
//!                   miss
//!                    ▼
//!              Fetcher::fetch(base_url/path)
//!                    ▼
//!              PageExtractor::extract
//!                    ▼
//!              CacheStore::write (best-effort) ──► Page
//! ```
//!
//! A cache hit never touches the network. A miss issues one request (more
//! only if a [`RetryPolicy`] asks for it) and at most one cache write. Nothing
//! coordinates concurrent misses for the same path: both fetch, both write,
//! and the last write wins.

use std::time::Duration;

use tracing::{debug, warn};

use crate::cache::CacheStore;
use crate::config::Config;
use crate::extract::PageExtractor;
use crate::fetcher::Fetcher;
use crate::types::Page;
use crate::Result;

/// How many times a failed remote retrieval is attempted.
///
/// The default is a single attempt: failures surface to the caller
/// immediately. With more attempts, only errors for which
/// [`Error::is_recoverable`](crate::Error::is_recoverable) holds are retried,
/// sleeping `initial_backoff`, then twice that, and so on between attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first. Values below 1 behave as 1.
    pub max_attempts: u32,
    /// Delay before the second attempt.
    pub initial_backoff: Duration,
}

impl RetryPolicy {
    /// One attempt, no retry.
    pub const NONE: Self = Self {
        max_attempts: 1,
        initial_backoff: Duration::ZERO,
    };

    /// Retry recoverable failures up to `max_attempts` in total.
    #[must_use]
    pub const fn new(max_attempts: u32, initial_backoff: Duration) -> Self {
        Self {
            max_attempts,
            initial_backoff,
        }
    }

    /// Delay before attempt number `attempt` (1-based, so attempt 2 is the
    /// first retry).
    fn backoff_before(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(2).min(16);
        self.initial_backoff.saturating_mul(1 << exponent)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::NONE
    }
}

/// Orchestrates cache lookup, remote retrieval, extraction and cache fill.
#[derive(Debug, Clone)]
pub struct FetchPipeline {
    base_url: String,
    fetcher: Fetcher,
    extractor: PageExtractor,
    cache: CacheStore,
    retry: RetryPolicy,
}

impl FetchPipeline {
    /// Assemble a pipeline from its parts.
    #[must_use]
    pub fn new(
        base_url: impl Into<String>,
        fetcher: Fetcher,
        extractor: PageExtractor,
        cache: CacheStore,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            fetcher,
            extractor,
            cache,
            retry: RetryPolicy::NONE,
        }
    }

    /// Build a pipeline from resolved configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(
            config.base_url.clone(),
            Fetcher::new()?,
            PageExtractor::new(config.max_content_size, &config.site_name),
            CacheStore::new(&config.cache_dir, config.cache_ttl_secs),
        ))
    }

    /// Replace the retry policy.
    #[must_use]
    pub const fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// The cache this pipeline reads and fills.
    #[must_use]
    pub const fn cache(&self) -> &CacheStore {
        &self.cache
    }

    /// Origin logical paths are resolved against.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for a logical path.
    ///
    /// Joins with exactly one `/`; the path is not escaped.
    ///
    /// ```rust
    /// use docfetch_core::{CacheStore, FetchPipeline, Fetcher, PageExtractor};
    ///
    /// let pipeline = FetchPipeline::new(
    ///     "https://docs.example.com/",
    ///     Fetcher::new().unwrap(),
    ///     PageExtractor::default(),
    ///     CacheStore::new(".cache", 0),
    /// );
    /// assert_eq!(
    ///     pipeline.resolve_url("/chart-types/line-chart"),
    ///     "https://docs.example.com/chart-types/line-chart"
    /// );
    /// ```
    #[must_use]
    pub fn resolve_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Return the page for `path`, from cache when fresh, otherwise from the
    /// remote origin.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::RemoteFetch`](crate::Error::RemoteFetch) when the
    /// origin is unreachable or answers with a non-success status. Cache
    /// failures never produce an error.
    pub async fn get(&self, path: &str) -> Result<Page> {
        if let Some(page) = self.cache.read(path) {
            return Ok(page);
        }
        debug!(path, "cache miss");

        let page = self.fetch_remote(path).await?;
        self.cache.write(path, &page);
        Ok(page)
    }

    /// Retrieve and extract `path` from the origin, bypassing the cache
    /// entirely (no read, no write).
    pub async fn fetch_remote(&self, path: &str) -> Result<Page> {
        let url = self.resolve_url(path);
        let html = self.fetch_with_retry(&url).await?;
        Ok(self.extractor.extract(&html, &url))
    }

    async fn fetch_with_retry(&self, url: &str) -> Result<String> {
        let max_attempts = self.retry.max_attempts.max(1);
        let mut attempt = 1;
        loop {
            match self.fetcher.fetch(url).await {
                Ok(body) => return Ok(body),
                Err(e) if attempt < max_attempts && e.is_recoverable() => {
                    attempt += 1;
                    let delay = self.retry.backoff_before(attempt);
                    warn!(url, attempt, error = %e, "retrying remote fetch");
                    tokio::time::sleep(delay).await;
                },
                Err(e) => return Err(e),
            }
        }
    }
}
