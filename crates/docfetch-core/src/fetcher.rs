use crate::{Error, Result};
use reqwest::Client;
use tracing::{debug, info};

/// HTTP client for retrieving raw documentation pages
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    /// Creates a new fetcher with the default HTTP client configuration
    ///
    /// No request timeout is set here; the transport defaults apply.
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("docfetch/", env!("CARGO_PKG_VERSION")))
            .gzip(true)
            .brotli(true)
            .build()
            .map_err(Error::Network)?;
        Ok(Self { client })
    }

    /// Wraps an already configured client
    #[must_use]
    pub const fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Fetches `url` once and returns the response body as text
    ///
    /// Every failure becomes [`Error::RemoteFetch`] carrying `url`: with the
    /// status for a non-success response, without one for transport errors.
    pub async fn fetch(&self, url: &str) -> Result<String> {
        debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| transport_error(url, &e))?;
        let status = response.status();

        if !status.is_success() {
            let status_text = status
                .canonical_reason()
                .map_or_else(|| status.as_str().to_string(), str::to_string);
            return Err(Error::RemoteFetch {
                url: url.to_string(),
                status: Some(status.as_u16()),
                status_text,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| transport_error(url, &e))?;
        info!("Fetched {} bytes from {}", body.len(), url);
        Ok(body)
    }
}

fn transport_error(url: &str, err: &reqwest::Error) -> Error {
    Error::RemoteFetch {
        url: url.to_string(),
        status: None,
        status_text: err.to_string(),
    }
}
