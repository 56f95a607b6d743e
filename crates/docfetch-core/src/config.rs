//! Configuration for the fetch pipeline.
//!
//! Settings are resolved once at startup from three layers, later layers
//! winning:
//!
//! 1. **Built-in defaults** ([`Config::default`])
//! 2. **Optional TOML file** ([`Config::load`])
//! 3. **Environment variables** with the `DOCFETCH_` prefix
//!    ([`Config::with_env_overrides`])
//!
//! ## Example Configuration File
//!
//! ```toml
//! base_url = "https://charts.example.dev/docs"
//! site_name = "Chart Docs"
//! max_content_size = 15000
//! cache_dir = ".cache"
//! cache_ttl_secs = 3600
//! ```
//!
//! ## Environment Variables
//!
//! | variable | field |
//! |---|---|
//! | `DOCFETCH_BASE_URL` | `base_url` |
//! | `DOCFETCH_SITE_NAME` | `site_name` |
//! | `DOCFETCH_MAX_CONTENT_SIZE` | `max_content_size` |
//! | `DOCFETCH_CACHE_DIR` | `cache_dir` |
//! | `DOCFETCH_CACHE_TTL` | `cache_ttl_secs` (`<= 0` disables caching) |

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::extract::DEFAULT_MAX_CONTENT_SIZE;
use crate::{Error, Result};

/// Default documentation origin.
pub const DEFAULT_BASE_URL: &str = "https://charts.example.dev/docs";
/// Default site name stripped from `<title>` suffixes.
pub const DEFAULT_SITE_NAME: &str = "Chart Docs";
/// Default cache directory, relative to the working directory.
pub const DEFAULT_CACHE_DIR: &str = ".cache";
/// Default cache TTL in seconds.
pub const DEFAULT_CACHE_TTL_SECS: i64 = 3600;

/// Environment variable for [`Config::base_url`].
pub const ENV_BASE_URL: &str = "DOCFETCH_BASE_URL";
/// Environment variable for [`Config::site_name`].
pub const ENV_SITE_NAME: &str = "DOCFETCH_SITE_NAME";
/// Environment variable for [`Config::max_content_size`].
pub const ENV_MAX_CONTENT_SIZE: &str = "DOCFETCH_MAX_CONTENT_SIZE";
/// Environment variable for [`Config::cache_dir`].
pub const ENV_CACHE_DIR: &str = "DOCFETCH_CACHE_DIR";
/// Environment variable for [`Config::cache_ttl_secs`].
pub const ENV_CACHE_TTL: &str = "DOCFETCH_CACHE_TTL";

/// Process-wide settings for the fetch pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Origin that logical paths are resolved against.
    pub base_url: String,

    /// Site name used in page titles (`"<page> - <site_name>"`).
    pub site_name: String,

    /// Maximum length of extracted content, in characters.
    pub max_content_size: usize,

    /// Directory holding cache records.
    pub cache_dir: PathBuf,

    /// Cache time-to-live in seconds. Zero or negative disables caching.
    pub cache_ttl_secs: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            site_name: DEFAULT_SITE_NAME.to_string(),
            max_content_size: DEFAULT_MAX_CONTENT_SIZE,
            cache_dir: PathBuf::from(DEFAULT_CACHE_DIR),
            cache_ttl_secs: DEFAULT_CACHE_TTL_SECS,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    ///
    /// Fields missing from the file keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML for
    /// this structure.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read config {}: {e}", path.display()))
        })?;
        Ok(toml::from_str(&content)?)
    }

    /// Overlay values from the process environment.
    pub fn with_env_overrides(self) -> Result<Self> {
        self.apply_env(|name| std::env::var(name).ok())
    }

    /// Overlay values produced by `lookup`, keyed by environment variable
    /// name. Empty values are ignored.
    ///
    /// ```rust
    /// use docfetch_core::Config;
    ///
    /// let config = Config::default()
    ///     .apply_env(|name| (name == "DOCFETCH_CACHE_TTL").then(|| "0".to_string()))
    ///     .unwrap();
    /// assert_eq!(config.cache_ttl_secs, 0);
    /// ```
    pub fn apply_env<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        if let Some(value) = get(ENV_BASE_URL) {
            self.base_url = value;
        }
        if let Some(value) = get(ENV_SITE_NAME) {
            self.site_name = value;
        }
        if let Some(value) = get(ENV_MAX_CONTENT_SIZE) {
            self.max_content_size = parse_number(ENV_MAX_CONTENT_SIZE, &value)?;
        }
        if let Some(value) = get(ENV_CACHE_DIR) {
            self.cache_dir = PathBuf::from(value);
        }
        if let Some(value) = get(ENV_CACHE_TTL) {
            self.cache_ttl_secs = parse_number(ENV_CACHE_TTL, &value)?;
        }

        Ok(self)
    }
}

fn parse_number<T: std::str::FromStr>(name: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| Error::Config(format!("{name} must be an integer, got '{value}'")))
}
