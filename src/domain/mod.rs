//! Domain layer with core entities, errors and port definitions.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Port definitions.
pub mod ports;

pub use entities::{CachingPolicy, ImageSource, ImageUrl, LoadedImage, LoadingState};
pub use errors::FetchError;
pub use ports::{ImageCachePort, ImageDecoderPort, ImageFetcherPort};
