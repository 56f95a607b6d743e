//! # docfetch-core
//!
//! Cache-backed retrieval of documentation pages.
//!
//! Given a logical page path such as `chart-types/line-chart`, the
//! [`FetchPipeline`] returns a [`Page`] (title, source URL, cleaned text),
//! either from a local time-bounded [`CacheStore`] or by fetching the HTML
//! from the documentation origin and running it through the
//! [`PageExtractor`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use docfetch_core::{CatalogIndex, Config, FetchPipeline};
//!
//! # async fn example() -> docfetch_core::Result<()> {
//! let config = Config::default().with_env_overrides()?;
//! let pipeline = FetchPipeline::from_config(&config)?;
//!
//! let catalog = CatalogIndex::builtin();
//! if let Some(path) = catalog.resolve("line-chart") {
//!     let page = pipeline.get(&path).await?;
//!     println!("{}: {} chars", page.title, page.content.chars().count());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`key`]: deterministic cache keys for logical paths
//! - [`cache`]: best-effort filesystem cache with TTL
//! - [`extract`]: HTML to [`Page`] extraction
//! - [`fetcher`]: single-request HTTP retrieval
//! - [`pipeline`]: cache-then-fetch orchestration
//! - [`catalog`]: static section/page registry
//! - [`config`]: defaults, TOML file and environment overrides

/// Filesystem page cache with time-based expiry
pub mod cache;
/// Static registry of documentation sections and pages
pub mod catalog;
/// Configuration loading
pub mod config;
/// Error types and result aliases
pub mod error;
/// HTML to page extraction
pub mod extract;
/// HTTP retrieval of raw documents
pub mod fetcher;
/// Cache key derivation
pub mod key;
/// Cache-backed fetch orchestration
pub mod pipeline;
/// Core data types
pub mod types;

pub use cache::CacheStore;
pub use catalog::{CatalogIndex, CatalogSection};
pub use config::Config;
pub use error::{Error, Result};
pub use extract::PageExtractor;
pub use fetcher::Fetcher;
pub use key::CacheKey;
pub use pipeline::{FetchPipeline, RetryPolicy};
pub use types::{CacheRecord, Page};
