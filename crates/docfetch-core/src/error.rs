//! Error types and handling for docfetch-core operations.
//!
//! Only failures that a caller can act on are represented here. Cache storage
//! problems never reach this type: [`CacheStore`](crate::CacheStore) absorbs
//! them and reports a miss instead.
//!
//! ## Error Categories
//!
//! - **Network Errors**: the HTTP client could not be constructed
//! - **Remote Fetch Errors**: the outbound request failed, either in transport
//!   (no status) or with a non-success status
//! - **Storage / Serialization Errors**: used internally by the cache layer
//! - **Configuration Errors**: invalid settings files or environment values
//!
//! ## Recovery Hints
//!
//! ```rust
//! use docfetch_core::Error;
//!
//! let err = Error::RemoteFetch {
//!     url: "https://example.com/docs/x".to_string(),
//!     status: Some(503),
//!     status_text: "Service Unavailable".to_string(),
//! };
//! assert!(err.is_recoverable());
//! assert_eq!(err.category(), "remote_fetch");
//! ```

use thiserror::Error;

/// The main error type for docfetch-core operations.
#[derive(Error, Debug)]
pub enum Error {
    /// The HTTP client could not be set up.
    #[error("Network error: {0}")]
    Network(reqwest::Error),

    /// The single outbound request for a page failed.
    ///
    /// `status` is `None` when no response arrived (connection refused, DNS
    /// failure, TLS error, timeout) or the body could not be read.
    #[error("remote fetch failed: {url} ({status_text})")]
    RemoteFetch {
        /// Absolute URL that was requested.
        url: String,
        /// Numeric HTTP status, when one was received.
        status: Option<u16>,
        /// Reason phrase for the status (or the numeric code when it has no
        /// canonical reason), or the transport error message.
        status_text: String,
    },

    /// Cache storage operation failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization or deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration is invalid or inaccessible.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(format!("Failed to parse config: {err}"))
    }
}

impl Error {
    /// Check if the error might be recoverable through retry logic.
    ///
    /// Transport failures (no status), server-side (5xx) and 429 statuses
    /// are considered transient. Client errors such as 404 are permanent.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::RemoteFetch { status, .. } => {
                status.is_none_or(|code| code >= 500 || code == 429)
            },
            _ => false,
        }
    }

    /// Get the error category as a string identifier for logging.
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self {
            Self::Network(_) => "network",
            Self::RemoteFetch { .. } => "remote_fetch",
            Self::Storage(_) => "storage",
            Self::Serialization(_) => "serialization",
            Self::Config(_) => "config",
        }
    }
}

/// Convenience type alias for `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
