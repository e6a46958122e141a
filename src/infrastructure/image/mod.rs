//! Image handling infrastructure.
//!
//! This module provides:
//! - A generic in-memory LRU store
//! - The process-wide session cache of undecoded bytes
//! - HTTP retrieval of image bytes
//! - Raster decoding

pub mod decoder;
pub mod fetcher;
pub mod memory_cache;
pub mod session_cache;

pub use decoder::RasterImageDecoder;
pub use fetcher::{DEFAULT_USER_AGENT, HttpFetcherConfig, HttpImageFetcher};
pub use memory_cache::{CacheStats, CacheStore, DEFAULT_CAPACITY};
pub use session_cache::SessionImageCache;
