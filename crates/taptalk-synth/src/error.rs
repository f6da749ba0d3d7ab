//! Internal error types for the synthesis client.
//!
//! These errors are internal to `taptalk-synth` and are mapped to the core
//! port's `SynthesisError` at the boundary.

use thiserror::Error;

/// Result type alias for synthesis client operations.
pub type SynthApiResult<T> = Result<T, SynthApiError>;

/// Errors from the remote synthesis HTTP layer.
#[derive(Debug, Error)]
pub enum SynthApiError {
    /// The provider answered with an HTTP error status.
    #[error("Synthesis request failed with status {status}: {url}")]
    RequestFailed {
        /// HTTP status code
        status: u16,
        /// The URL that was requested
        url: String,
    },

    /// Network or HTTP client error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid endpoint URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl SynthApiError {
    /// The HTTP status code, if the failure carried one.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::RequestFailed { status, .. } => Some(*status),
            Self::Network(err) => err.status().map(|s| s.as_u16()),
            Self::InvalidUrl(_) => None,
        }
    }
}
