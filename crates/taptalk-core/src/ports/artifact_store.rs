//! Artifact store port definition.
//!
//! The store is any byte-addressable persistent key→blob backing
//! (local filesystem, platform temp directory, or equivalent). The core
//! depends only on the three operations below, not on any specific
//! storage technology.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::ArtifactRef;

/// Error type for artifact store operations.
///
/// Serializable across process boundaries without depending on
/// `std::io::Error`; I/O failures are captured as kind + message strings.
#[derive(Clone, Debug, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum StoreError {
    /// The reference no longer resolves to a readable payload.
    #[error("No artifact for key: {key}")]
    NotFound {
        /// The key that failed to resolve.
        key: String,
    },

    /// The key contains characters the store refuses (path separators etc.).
    #[error("Invalid artifact key: {key}")]
    InvalidKey {
        /// The rejected key.
        key: String,
    },

    /// I/O error during a store operation.
    #[error("I/O error ({kind}): {message}")]
    Io {
        /// The kind of I/O error (e.g., "`PermissionDenied`").
        kind: String,
        /// Detailed error message.
        message: String,
    },
}

impl StoreError {
    /// Create a not found error.
    pub fn not_found(key: impl Into<String>) -> Self {
        Self::NotFound { key: key.into() }
    }

    /// Create an invalid key error.
    pub fn invalid_key(key: impl Into<String>) -> Self {
        Self::InvalidKey { key: key.into() }
    }

    /// Create an I/O error from kind and message strings.
    pub fn io(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Io {
            kind: kind.into(),
            message: message.into(),
        }
    }

    /// Create an I/O error from a `std::io::Error`.
    #[must_use]
    pub fn from_io_error(err: &std::io::Error) -> Self {
        let kind = err.kind();
        Self::Io {
            kind: format!("{kind:?}"),
            message: err.to_string(),
        }
    }
}

/// Port for persisting and retrieving audio artifacts by key.
#[async_trait]
pub trait ArtifactStorePort: Send + Sync {
    /// Whether a readable artifact exists for the key.
    ///
    /// Never fails: any I/O error maps to `false`, which callers treat as
    /// "not yet upgraded".
    async fn exists(&self, key: &str) -> bool;

    /// Persist the payload under the key and return its reference.
    ///
    /// Must be atomic from a reader's point of view: a concurrent
    /// `exists`/`read` for the same key never observes a partially written
    /// payload. Overwriting an existing key is permitted (idempotent
    /// re-upgrade).
    async fn persist(&self, key: &str, bytes: &[u8]) -> Result<ArtifactRef, StoreError>;

    /// Read an artifact back by reference.
    ///
    /// Fails with [`StoreError::NotFound`] if the reference no longer
    /// resolves.
    async fn read(&self, reference: &ArtifactRef) -> Result<Vec<u8>, StoreError>;
}
