//! Observable loading state of a single image fetch.

use super::LoadedImage;
use crate::domain::errors::FetchError;

/// Progress of an image fetch as seen by the presentation layer.
///
/// A fetch starts in `Loading` and moves to exactly one of `Success` or
/// `Failure`. Triggering a new fetch resets it to `Loading`.
#[derive(Debug, Clone, Default)]
pub enum LoadingState {
    /// The fetch is in flight.
    #[default]
    Loading,
    /// The image was loaded.
    Success(LoadedImage),
    /// The fetch failed.
    Failure(FetchError),
}

impl LoadingState {
    /// Returns true while the fetch is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Returns true if the image was loaded.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Returns true if the fetch failed.
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failure(_))
    }

    /// Returns true once the fetch has settled.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        !self.is_loading()
    }

    /// Returns the loaded image, if any.
    #[must_use]
    pub const fn image(&self) -> Option<&LoadedImage> {
        match self {
            Self::Success(image) => Some(image),
            _ => None,
        }
    }

    /// Returns the failure, if any.
    #[must_use]
    pub const fn error(&self) -> Option<&FetchError> {
        match self {
            Self::Failure(error) => Some(error),
            _ => None,
        }
    }
}

impl From<Result<LoadedImage, FetchError>> for LoadingState {
    fn from(result: Result<LoadedImage, FetchError>) -> Self {
        match result {
            Ok(image) => Self::Success(image),
            Err(error) => Self::Failure(error),
        }
    }
}
