//! Port definition for retrieving image bytes over the network.

use async_trait::async_trait;
use bytes::Bytes;

use crate::domain::entities::ImageUrl;
use crate::domain::errors::FetchError;

/// Port for fetching raw image bytes.
#[async_trait]
pub trait ImageFetcherPort: Send + Sync {
    /// Performs exactly one retrieval of `url` and returns the response body
    /// unmodified.
    async fn fetch_image(&self, url: &ImageUrl) -> Result<Bytes, FetchError>;
}

#[cfg(test)]
pub mod mock {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use parking_lot::Mutex;

    use super::*;

    /// Mock fetcher returning a fixed outcome and counting calls.
    pub struct MockImageFetcher {
        outcome: Mutex<Result<Bytes, FetchError>>,
        calls: AtomicUsize,
    }

    impl MockImageFetcher {
        /// Creates mock that answers every request with `data`.
        pub fn with_bytes(data: impl Into<Bytes>) -> Self {
            Self {
                outcome: Mutex::new(Ok(data.into())),
                calls: AtomicUsize::new(0),
            }
        }

        /// Creates mock that fails every request with `error`.
        pub fn failing(error: FetchError) -> Self {
            Self {
                outcome: Mutex::new(Err(error)),
                calls: AtomicUsize::new(0),
            }
        }

        /// Replaces the outcome of subsequent requests.
        pub fn set_outcome(&self, outcome: Result<Bytes, FetchError>) {
            *self.outcome.lock() = outcome;
        }

        /// Number of requests issued.
        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ImageFetcherPort for MockImageFetcher {
        async fn fetch_image(&self, _url: &ImageUrl) -> Result<Bytes, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.outcome.lock().clone()
        }
    }
}
