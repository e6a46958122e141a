//! Port definition for turning bytes into a displayable image.

/// Port for decoding raw image bytes.
pub trait ImageDecoderPort: Send + Sync {
    /// Decodes `data`, returning `None` for malformed or unsupported input.
    fn decode(&self, data: &[u8]) -> Option<image::DynamicImage>;
}
