//! Port definition for the session image cache.

use bytes::Bytes;

use crate::domain::entities::ImageUrl;

/// Port for caching undecoded image bytes keyed by URL.
/// Implementations must be safe to call from many threads without external
/// locking.
pub trait ImageCachePort: Send + Sync {
    /// Returns the cached bytes for `url`, or `None` if absent or evicted.
    fn fetch_image_for_url(&self, url: &ImageUrl) -> Option<Bytes>;

    /// Stores `data` under `url`, replacing any previous entry.
    fn cache_image(&self, data: Bytes, url: &ImageUrl);

    /// Removes the entry for `url`. No-op if absent.
    fn remove_cached_image(&self, url: &ImageUrl);

    /// Removes every entry.
    fn remove_all_cached_images(&self);

    /// Returns the current number of cached entries.
    fn len(&self) -> usize;

    /// Returns true if the cache is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
