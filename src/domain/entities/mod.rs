//! Domain entity definitions.

mod caching_policy;
mod image;
mod image_url;
mod loading_state;

pub use caching_policy::CachingPolicy;
pub use image::{ImageSource, LoadedImage};
pub use image_url::ImageUrl;
pub use loading_state::LoadingState;
