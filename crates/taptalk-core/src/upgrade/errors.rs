//! Upgrade error types.
//!
//! These errors are designed to be serializable and not depend on external
//! error types like `std::io::Error`. For I/O errors, we capture the kind
//! and message as strings.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for the upgrade pipeline.
///
/// Every variant is absorbed inside the pipeline: the phrase falls back to
/// instant speech and stays retryable. Nothing here crosses the UI boundary
/// as a hard failure.
#[derive(Clone, Debug, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum UpgradeError {
    /// The remote synthesis provider was unreachable, rejected the request,
    /// or timed out.
    #[error("Fetch failed: {message}")]
    Fetch {
        /// Detailed error message.
        message: String,
        /// HTTP status code if available.
        #[serde(skip_serializing_if = "Option::is_none")]
        status_code: Option<u16>,
    },

    /// Writing the fetched clip to the artifact store failed.
    #[error("Persist failed ({kind}): {message}")]
    Persist {
        /// The kind of I/O error (e.g., "`PermissionDenied`").
        kind: String,
        /// Detailed error message.
        message: String,
    },

    /// A previously recorded artifact reference no longer resolves.
    #[error("Artifact no longer resolves: {key}")]
    Verification {
        /// The store key that failed verification.
        key: String,
    },

    /// The upgrade task was cancelled (shutdown path).
    #[error("Upgrade cancelled")]
    Cancelled,

    /// General/uncategorized error.
    #[error("{message}")]
    Other {
        /// Error message.
        message: String,
    },
}

impl UpgradeError {
    /// Create a fetch error.
    pub fn fetch(message: impl Into<String>) -> Self {
        Self::Fetch {
            message: message.into(),
            status_code: None,
        }
    }

    /// Create a fetch error with an HTTP status code.
    pub fn fetch_with_status(message: impl Into<String>, status_code: u16) -> Self {
        Self::Fetch {
            message: message.into(),
            status_code: Some(status_code),
        }
    }

    /// Create a persist error from kind and message strings.
    pub fn persist(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Persist {
            kind: kind.into(),
            message: message.into(),
        }
    }

    /// Create a verification error.
    pub fn verification(key: impl Into<String>) -> Self {
        Self::Verification { key: key.into() }
    }

    /// Create a generic error.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Check if this error is recoverable on a later tap.
    ///
    /// Everything except an explicit cancellation leaves the phrase in a
    /// retryable state; the next playback attempt re-triggers the upgrade.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Cancelled)
    }

    /// Check if this is a cancellation.
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Convert to a user-friendly message.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Fetch {
                message,
                status_code: Some(code),
            } => format!("Speech provider error (HTTP {code}): {message}"),
            Self::Fetch { message, .. } => format!("Speech provider unavailable: {message}"),
            Self::Persist { message, .. } => format!("Could not save audio clip: {message}"),
            Self::Verification { key } => {
                format!("Cached clip '{key}' is missing; it will be re-fetched on the next tap.")
            }
            Self::Cancelled => "Upgrade was cancelled.".to_string(),
            Self::Other { message } => message.clone(),
        }
    }
}

/// Convenience result type for upgrade operations.
pub type UpgradeResult<T> = Result<T, UpgradeError>;
