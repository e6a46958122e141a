//! Presentation layer: observable loading state for views.

mod image_view_model;

pub use image_view_model::{FetchTask, ImageViewModel};
