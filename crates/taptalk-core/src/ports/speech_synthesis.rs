//! Speech synthesis provider port definition.
//!
//! The remote provider is an opaque fallible async call: text in, audio
//! bytes out. No wire format is part of this contract; adapters own the
//! protocol, authentication, and retry policy.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for speech synthesis fetches.
#[derive(Clone, Debug, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum SynthesisError {
    /// The provider was unreachable, rejected the request, or timed out.
    #[error("Fetch failed: {message}")]
    FetchFailed {
        /// Detailed error message.
        message: String,
        /// HTTP status code if available.
        #[serde(skip_serializing_if = "Option::is_none")]
        status_code: Option<u16>,
    },
}

impl SynthesisError {
    /// Create a fetch failed error.
    pub fn fetch_failed(message: impl Into<String>) -> Self {
        Self::FetchFailed {
            message: message.into(),
            status_code: None,
        }
    }

    /// Create a fetch failed error with an HTTP status code.
    pub fn fetch_failed_with_status(message: impl Into<String>, status_code: u16) -> Self {
        Self::FetchFailed {
            message: message.into(),
            status_code: Some(status_code),
        }
    }

    /// The HTTP status code, if the failure carried one.
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::FetchFailed { status_code, .. } => *status_code,
        }
    }
}

/// Port for fetching high-quality rendered speech from a remote provider.
#[async_trait]
pub trait SpeechSynthesisPort: Send + Sync {
    /// Fetch a rendered audio clip for the text.
    ///
    /// May take arbitrarily long; callers bound it with their own timeout.
    async fn fetch(&self, text: &str) -> Result<Vec<u8>, SynthesisError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code_accessor() {
        assert_eq!(SynthesisError::fetch_failed("down").status_code(), None);
        assert_eq!(
            SynthesisError::fetch_failed_with_status("busy", 429).status_code(),
            Some(429)
        );
    }

    #[test]
    fn test_serialization_skips_missing_status() {
        let json = serde_json::to_string(&SynthesisError::fetch_failed("down")).unwrap();
        assert!(!json.contains("status_code"));
    }
}
