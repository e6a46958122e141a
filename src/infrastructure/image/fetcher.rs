//! HTTP image fetcher.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{Client, StatusCode};
use tracing::{debug, warn};

use crate::domain::entities::ImageUrl;
use crate::domain::errors::FetchError;
use crate::domain::ports::ImageFetcherPort;

/// Default `User-Agent` header sent with image requests.
pub const DEFAULT_USER_AGENT: &str = concat!("asyncimage/", env!("CARGO_PKG_VERSION"));

/// Configuration for the HTTP fetcher.
#[derive(Debug, Clone)]
pub struct HttpFetcherConfig {
    /// `User-Agent` header value.
    pub user_agent: String,
    /// Request timeout. `None` leaves the transport default in place.
    pub timeout: Option<Duration>,
}

impl Default for HttpFetcherConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: None,
        }
    }
}

/// Fetches image bytes with a single GET request per call.
#[derive(Debug, Clone)]
pub struct HttpImageFetcher {
    client: Client,
}

impl HttpImageFetcher {
    /// Creates a fetcher with the default configuration.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn new() -> Result<Self, FetchError> {
        Self::with_config(&HttpFetcherConfig::default())
    }

    /// Creates a fetcher with the given configuration.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn with_config(config: &HttpFetcherConfig) -> Result<Self, FetchError> {
        let mut builder = Client::builder().user_agent(config.user_agent.as_str());
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(FetchError::transport)?;

        Ok(Self { client })
    }
}

#[async_trait]
impl ImageFetcherPort for HttpImageFetcher {
    async fn fetch_image(&self, url: &ImageUrl) -> Result<Bytes, FetchError> {
        if !url.is_http() {
            warn!(url = %url, "Refusing to fetch non-HTTP URL");
            return Err(FetchError::invalid_url(Some(url.to_string())));
        }

        debug!(url = %url, "Downloading image from network");

        let response = self
            .client
            .get(url.as_url().clone())
            .send()
            .await
            .map_err(|e| {
                warn!(url = %url, error = %e, "Image request failed");
                FetchError::transport(e)
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!(url = %url, status = %status, "Unexpected image response status");
            return Err(FetchError::invalid_response(Some(status.as_u16())));
        }

        let bytes = response.bytes().await.map_err(|e| {
            warn!(url = %url, error = %e, "Failed to read image body");
            FetchError::transport(e)
        })?;

        debug!(url = %url, bytes = bytes.len(), "Image downloaded");
        Ok(bytes)
    }
}
