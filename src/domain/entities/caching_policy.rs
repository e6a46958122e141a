//! Caching policy for fetched images.

use serde::{Deserialize, Serialize};

/// How long fetched image bytes are retained.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
pub enum CachingPolicy {
    /// Keep the image only for the lifetime of the requesting view.
    ///
    /// The session cache is neither read nor written, so every request goes to
    /// the network even when another view already cached the same URL.
    #[value(name = "view-cycle")]
    #[serde(rename = "view-cycle")]
    WithViewCycle,
    /// Keep the image bytes in the shared session cache until the process exits
    /// or the entry is evicted.
    #[default]
    #[value(name = "app-session")]
    #[serde(rename = "app-session")]
    DuringAppSession,
}

impl CachingPolicy {
    /// Returns true if results are read from and written to the session cache.
    #[must_use]
    pub const fn persists_in_session(self) -> bool {
        match self {
            Self::WithViewCycle => false,
            Self::DuringAppSession => true,
        }
    }
}

impl std::fmt::Display for CachingPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::WithViewCycle => write!(f, "view-cycle"),
            Self::DuringAppSession => write!(f, "app-session"),
        }
    }
}
