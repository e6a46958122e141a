//! Infrastructure layer with adapters for external services.

/// Application configuration.
pub mod config;
/// Image caching, retrieval and decoding.
pub mod image;

pub use config::{AppConfig, CliArgs, ConfigError, ConfigStore, LogLevel};
pub use image::{
    CacheStats, CacheStore, HttpFetcherConfig, HttpImageFetcher, RasterImageDecoder,
    SessionImageCache,
};
