//! Raster image decoding backed by the `image` crate.

use tracing::trace;

use crate::domain::ports::ImageDecoderPort;

/// Decodes PNG, JPEG and WebP bytes, guessing the format from the content.
#[derive(Debug, Clone, Copy, Default)]
pub struct RasterImageDecoder;

impl RasterImageDecoder {
    /// Creates new decoder.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ImageDecoderPort for RasterImageDecoder {
    fn decode(&self, data: &[u8]) -> Option<image::DynamicImage> {
        match image::load_from_memory(data) {
            Ok(img) => Some(img),
            Err(e) => {
                trace!(error = %e, bytes = data.len(), "Failed to decode image");
                None
            }
        }
    }
}
