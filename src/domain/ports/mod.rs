mod image_cache_port;
mod image_decoder_port;
mod image_fetcher_port;

pub use image_cache_port::ImageCachePort;
pub use image_decoder_port::ImageDecoderPort;
pub use image_fetcher_port::ImageFetcherPort;
