//! Image fetch use case: cache lookup, network retrieval and decoding.

use std::sync::Arc;

use bytes::Bytes;
use tracing::{debug, trace, warn};

use crate::domain::entities::{CachingPolicy, ImageSource, ImageUrl, LoadedImage};
use crate::domain::errors::FetchError;
use crate::domain::ports::{ImageCachePort, ImageDecoderPort, ImageFetcherPort};

/// Resolves a URL to a decoded image according to a caching policy.
#[derive(Clone)]
pub struct FetchImageUseCase {
    fetcher: Arc<dyn ImageFetcherPort>,
    cache: Arc<dyn ImageCachePort>,
    decoder: Arc<dyn ImageDecoderPort>,
}

impl FetchImageUseCase {
    /// Creates new fetch use case.
    #[must_use]
    pub const fn new(
        fetcher: Arc<dyn ImageFetcherPort>,
        cache: Arc<dyn ImageCachePort>,
        decoder: Arc<dyn ImageDecoderPort>,
    ) -> Self {
        Self {
            fetcher,
            cache,
            decoder,
        }
    }

    /// Fetches the image at `url`.
    ///
    /// A missing or malformed URL fails before the cache or network is touched.
    ///
    /// # Errors
    /// Returns `InvalidUrl` for a missing or malformed URL, otherwise see
    /// [`Self::fetch_image_url`].
    pub async fn fetch_image(
        &self,
        url: Option<&str>,
        policy: CachingPolicy,
    ) -> Result<LoadedImage, FetchError> {
        let Some(raw) = url else {
            warn!("No image URL provided");
            return Err(FetchError::invalid_url(None::<String>));
        };

        let url =
            ImageUrl::parse(raw).inspect_err(|_| warn!(url = raw, "Malformed image URL"))?;

        self.fetch_image_url(&url, policy).await
    }

    /// Fetches the image at an already validated URL.
    ///
    /// With [`CachingPolicy::DuringAppSession`] cached bytes are used when
    /// present, and freshly downloaded bytes are cached once they decode.
    /// With [`CachingPolicy::WithViewCycle`] the cache is never read or written.
    /// Cached bytes that no longer decode fail the request; they are not
    /// treated as a miss.
    ///
    /// # Errors
    /// Propagates fetcher errors unchanged and returns `InvalidData` when the
    /// bytes do not decode.
    pub async fn fetch_image_url(
        &self,
        url: &ImageUrl,
        policy: CachingPolicy,
    ) -> Result<LoadedImage, FetchError> {
        if policy.persists_in_session()
            && let Some(cached) = self.cache.fetch_image_for_url(url)
        {
            debug!(url = %url, bytes = cached.len(), "Using cached image bytes");
            let image = self.decode(cached).await?;
            return Ok(LoadedImage::new(image, ImageSource::SessionCache));
        }

        let data = self.fetcher.fetch_image(url).await?;
        let image = self.decode(data.clone()).await?;

        match policy {
            CachingPolicy::DuringAppSession => self.cache.cache_image(data, url),
            CachingPolicy::WithViewCycle => {
                trace!(url = %url, "View-scoped fetch, skipping session cache");
            }
        }

        debug!(
            url = %url,
            width = image.width(),
            height = image.height(),
            policy = %policy,
            "Image loaded from network"
        );

        Ok(LoadedImage::new(image, ImageSource::Network))
    }

    /// Removes the cached bytes for `url`. No-op if absent.
    pub fn remove_cached_image(&self, url: &ImageUrl) {
        self.cache.remove_cached_image(url);
    }

    /// Clears the session cache.
    pub fn remove_all_cached_images(&self) {
        self.cache.remove_all_cached_images();
    }

    async fn decode(&self, data: Bytes) -> Result<image::DynamicImage, FetchError> {
        let decoder = Arc::clone(&self.decoder);
        let input = data.clone();

        match tokio::task::spawn_blocking(move || decoder.decode(&input)).await {
            Ok(Some(image)) => Ok(image),
            Ok(None) => {
                warn!(bytes = data.len(), "Image bytes did not decode");
                Err(FetchError::invalid_data(data))
            }
            Err(e) => {
                warn!(error = %e, "Decode task failed");
                Err(FetchError::invalid_data(data))
            }
        }
    }
}

impl std::fmt::Debug for FetchImageUseCase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchImageUseCase")
            .field("cached_entries", &self.cache.len())
            .finish_non_exhaustive()
    }
}
