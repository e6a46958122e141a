//! asyncimage - fetch remote images through an in-memory session cache.
//!
//! This crate resolves image URLs to decoded images, optionally keeping the
//! downloaded bytes in a process-wide cache, and exposes the progress of each
//! fetch as an observable loading state.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing use cases.
pub mod application;
/// Domain layer containing entities, errors, and port definitions.
pub mod domain;
/// Infrastructure layer containing adapters for external services.
pub mod infrastructure;
/// Presentation layer exposing observable loading state.
pub mod presentation;

/// Current version of the library.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = "asyncimage";
