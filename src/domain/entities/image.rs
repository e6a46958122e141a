//! Domain types for decoded images.

use std::sync::Arc;

/// Where a loaded image came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSource {
    /// Decoded from bytes held in the session cache.
    SessionCache,
    /// Decoded from a fresh network response.
    Network,
}

impl std::fmt::Display for ImageSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SessionCache => write!(f, "session cache"),
            Self::Network => write!(f, "network"),
        }
    }
}

/// A decoded image ready for display.
#[derive(Clone)]
pub struct LoadedImage {
    /// The decoded image.
    pub image: Arc<image::DynamicImage>,
    /// Where the image came from.
    pub source: ImageSource,
}

impl LoadedImage {
    /// Wraps a decoded image.
    #[must_use]
    pub fn new(image: image::DynamicImage, source: ImageSource) -> Self {
        Self {
            image: Arc::new(image),
            source,
        }
    }

    /// Image width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Image height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Returns `(width, height)`.
    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    /// Returns true if the image was served from the session cache.
    #[must_use]
    pub const fn is_from_cache(&self) -> bool {
        matches!(self.source, ImageSource::SessionCache)
    }
}

impl std::fmt::Debug for LoadedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedImage")
            .field("width", &self.width())
            .field("height", &self.height())
            .field("source", &self.source)
            .finish()
    }
}
