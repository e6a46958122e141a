//! Image fetch error types.

use std::sync::Arc;

use bytes::Bytes;
use thiserror::Error;

/// Underlying transport error, shared so that `FetchError` stays cloneable.
pub type TransportSource = Arc<dyn std::error::Error + Send + Sync>;

/// Failures produced anywhere in the fetch pipeline.
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    /// The network exchange could not be completed.
    #[error("transport failure: {source}")]
    Transport {
        /// The error reported by the HTTP client.
        #[source]
        source: TransportSource,
    },

    /// The exchange completed but the server did not answer with success.
    ///
    /// Non-200 statuses are reported here directly, never wrapped in
    /// [`FetchError::Transport`].
    #[error("invalid response{}", describe_status(.status))]
    InvalidResponse {
        /// HTTP status code, if the response carried one.
        status: Option<u16>,
    },

    /// The URL was missing, malformed or uses an unsupported scheme.
    #[error("invalid url: {}", .url.as_deref().unwrap_or("<none>"))]
    InvalidUrl {
        /// The offending URL, if one was given.
        url: Option<String>,
    },

    /// The bytes could not be decoded into an image.
    #[error("invalid image data ({} bytes)", .data.len())]
    InvalidData {
        /// The bytes that failed to decode.
        data: Bytes,
    },
}

#[allow(clippy::ref_option)]
fn describe_status(status: &Option<u16>) -> String {
    status.map(|code| format!(": HTTP {code}")).unwrap_or_default()
}

impl FetchError {
    /// Wraps a transport-layer error.
    #[must_use]
    pub fn transport(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport {
            source: Arc::new(source),
        }
    }

    /// Creates an invalid response error for the given status code.
    #[must_use]
    pub const fn invalid_response(status: Option<u16>) -> Self {
        Self::InvalidResponse { status }
    }

    /// Creates an invalid URL error.
    #[must_use]
    pub fn invalid_url(url: Option<impl Into<String>>) -> Self {
        Self::InvalidUrl {
            url: url.map(Into::into),
        }
    }

    /// Creates an invalid data error carrying the undecodable bytes.
    #[must_use]
    pub fn invalid_data(data: impl Into<Bytes>) -> Self {
        Self::InvalidData { data: data.into() }
    }

    /// Returns whether the error came from the network exchange.
    #[must_use]
    pub const fn is_network_error(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::InvalidResponse { .. })
    }

    /// Returns the HTTP status code, if the failure carried one.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::InvalidResponse { status } => *status,
            _ => None,
        }
    }
}
