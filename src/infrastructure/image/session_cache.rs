//! Process-wide cache of undecoded image bytes.

use std::sync::{Arc, OnceLock};

use bytes::Bytes;
use tracing::{debug, trace};

use super::memory_cache::{CacheStats, CacheStore};
use crate::domain::entities::ImageUrl;
use crate::domain::ports::ImageCachePort;

/// Session-scoped image cache keyed by the absolute URL string.
///
/// One instance is shared by the whole process through [`SessionImageCache::shared`];
/// it is created on first use and never torn down. Isolated instances can be
/// built with [`SessionImageCache::new`] and injected where a private cache is
/// wanted.
pub struct SessionImageCache {
    store: CacheStore<String, Bytes>,
}

impl SessionImageCache {
    /// Creates an isolated cache.
    #[must_use]
    pub fn new() -> Self {
        Self {
            store: CacheStore::with_default_capacity(),
        }
    }

    /// Returns the process-wide instance.
    #[must_use]
    pub fn shared() -> Arc<Self> {
        static SHARED: OnceLock<Arc<SessionImageCache>> = OnceLock::new();
        Arc::clone(SHARED.get_or_init(|| Arc::new(Self::new())))
    }

    /// Returns lookup statistics.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        self.store.stats()
    }
}

impl Default for SessionImageCache {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SessionImageCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionImageCache")
            .field("len", &self.store.len())
            .finish_non_exhaustive()
    }
}

impl ImageCachePort for SessionImageCache {
    fn fetch_image_for_url(&self, url: &ImageUrl) -> Option<Bytes> {
        let data = self.store.fetch(url.cache_key());
        if data.is_some() {
            trace!(url = %url, "Session cache hit");
        } else {
            trace!(url = %url, "Session cache miss");
        }
        data
    }

    fn cache_image(&self, data: Bytes, url: &ImageUrl) {
        debug!(url = %url, bytes = data.len(), "Storing image in session cache");
        self.store.store(data, url.cache_key().to_string());
    }

    fn remove_cached_image(&self, url: &ImageUrl) {
        debug!(url = %url, "Removing image from session cache");
        self.store.remove(url.cache_key());
    }

    fn remove_all_cached_images(&self) {
        self.store.remove_all();
        debug!("Cleared session image cache");
    }

    fn len(&self) -> usize {
        self.store.len()
    }
}
