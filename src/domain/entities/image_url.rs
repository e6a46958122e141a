//! Validated image URL.

use reqwest::Url;

use crate::domain::errors::FetchError;

/// An absolute URL pointing at a remote image.
///
/// Parsing normalises the input (scheme and host case, default ports, dot
/// segments), so every input that resolves to the same absolute string maps to
/// the same cache entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageUrl(Url);

impl ImageUrl {
    /// Parses a raw URL string.
    ///
    /// # Errors
    /// Returns `FetchError::InvalidUrl` carrying the input if it is not an
    /// absolute URL.
    pub fn parse(raw: &str) -> Result<Self, FetchError> {
        Url::parse(raw.trim())
            .map(Self)
            .map_err(|_| FetchError::invalid_url(Some(raw)))
    }

    /// Returns the canonical cache key: the absolute string form of the URL.
    #[must_use]
    pub fn cache_key(&self) -> &str {
        self.0.as_str()
    }

    /// Returns true for `http` and `https` URLs.
    #[must_use]
    pub fn is_http(&self) -> bool {
        matches!(self.0.scheme(), "http" | "https")
    }

    /// Returns the underlying URL.
    #[must_use]
    pub const fn as_url(&self) -> &Url {
        &self.0
    }
}

impl From<Url> for ImageUrl {
    fn from(url: Url) -> Self {
        Self(url)
    }
}

impl std::str::FromStr for ImageUrl {
    type Err = FetchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for ImageUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.cache_key())
    }
}
