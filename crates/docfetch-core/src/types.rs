//! Core data types: the page value object and its persisted form.

use serde::{Deserialize, Serialize};

/// A documentation page ready to hand to a caller.
///
/// Produced by [`PageExtractor`](crate::PageExtractor) or reconstructed from a
/// cache record. `content` never exceeds the configured size cap and an empty
/// `title` is a legitimate value (the source document had neither a heading
/// nor a title element).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    /// Page title.
    pub title: String,
    /// Absolute URL the page was retrieved from.
    pub source_url: String,
    /// Cleaned, normalized text body.
    pub content: String,
}

impl Page {
    /// Create a page from its parts.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        source_url: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            source_url: source_url.into(),
            content: content.into(),
        }
    }
}

/// On-disk representation of a cached [`Page`].
///
/// The page fields are stored flat next to `cachedAt`, the creation instant in
/// epoch milliseconds:
///
/// ```json
/// {"title":"Line Chart","sourceUrl":"https://...","content":"...","cachedAt":1760000000000}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheRecord {
    /// The cached page.
    #[serde(flatten)]
    pub page: Page,
    /// When the record was written, in milliseconds since the Unix epoch.
    pub cached_at: i64,
}

impl CacheRecord {
    /// Wrap `page` with the given creation timestamp.
    #[must_use]
    pub const fn new(page: Page, cached_at: i64) -> Self {
        Self { page, cached_at }
    }

    /// Whether the record is still valid at `now_ms` under a TTL of
    /// `ttl_secs` seconds.
    ///
    /// Valid iff `now - cachedAt < TTL`. A non-positive TTL means nothing is
    /// ever valid. Records stamped in the future (clock skew) count as fresh.
    #[must_use]
    pub const fn is_fresh_at(&self, now_ms: i64, ttl_secs: i64) -> bool {
        if ttl_secs <= 0 {
            return false;
        }
        let age_ms = now_ms.saturating_sub(self.cached_at);
        age_ms < ttl_secs.saturating_mul(1000)
    }
}
