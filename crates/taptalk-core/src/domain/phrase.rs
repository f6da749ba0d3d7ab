//! Phrase domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Unique, stable identifier for a phrase.
///
/// Assigned at creation and immutable for the phrase's lifetime. All
/// upgrade bookkeeping (dedup, repository updates, events) is keyed by
/// this identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhraseId(String);

impl PhraseId {
    /// Generate a fresh random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Wrap an existing identifier string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// View the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PhraseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Reference to a persisted audio artifact.
///
/// The existence guarantee is "as of the last successful write": the
/// payload was readable at `path` when the reference was produced. The
/// file may have been removed since, so callers re-verify through the
/// store before use and treat a failed check as not-yet-upgraded.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactRef {
    /// Store key the artifact was persisted under.
    pub key: String,
    /// Resolved location on the backing store.
    pub path: PathBuf,
}

impl ArtifactRef {
    /// Create a reference from a key and its resolved location.
    pub fn new(key: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            key: key.into(),
            path: path.into(),
        }
    }
}

/// A phrase on the board.
///
/// Mutable state (`artifact`, `upgrade_in_progress`) is owned by the
/// repository; the scheduler routes all changes through
/// `PhraseRepository::update` rather than mutating private copies.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phrase {
    /// Stable identifier.
    pub id: PhraseId,
    /// Display text; immutable after creation.
    pub text: String,
    /// Reference to the high-quality clip, if one has been persisted.
    /// `None` means "not yet upgraded or last upgrade failed".
    pub artifact: Option<ArtifactRef>,
    /// True while exactly one upgrade task for this phrase is running.
    pub upgrade_in_progress: bool,
    /// UTC timestamp of when the phrase was added to the board.
    pub added_at: DateTime<Utc>,
}

impl Phrase {
    /// Create a new phrase with a fresh identifier, no artifact, and no
    /// upgrade in flight.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: PhraseId::generate(),
            text: text.into(),
            artifact: None,
            upgrade_in_progress: false,
            added_at: Utc::now(),
        }
    }

    /// Whether a high-quality clip has been recorded for this phrase.
    #[must_use]
    pub const fn is_upgraded(&self) -> bool {
        self.artifact.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_phrase_starts_idle() {
        let phrase = Phrase::new("Hello!");
        assert_eq!(phrase.text, "Hello!");
        assert!(phrase.artifact.is_none());
        assert!(!phrase.upgrade_in_progress);
        assert!(!phrase.is_upgraded());
    }

    #[test]
    fn generated_ids_are_unique() {
        let a = PhraseId::generate();
        let b = PhraseId::generate();
        assert_ne!(a, b);
    }

    #[test]
    fn phrase_id_serializes_transparently() {
        let id = PhraseId::new("abc-123");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"abc-123\"");

        let parsed: PhraseId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn artifact_ref_roundtrip() {
        let reference = ArtifactRef::new("key-1", "/tmp/key-1.mp3");
        let json = serde_json::to_string(&reference).unwrap();
        let parsed: ArtifactRef = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, reference);
    }
}
