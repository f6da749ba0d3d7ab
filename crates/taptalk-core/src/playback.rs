//! Playback decision logic.
//!
//! Given a phrase snapshot and the store's verdict on its artifact, decide
//! whether the UI plays the cached clip or falls back to instant speech,
//! and whether an upgrade should be requested. The decision is pure and
//! never fails: the user always hears something promptly.

use serde::{Deserialize, Serialize};

use crate::domain::{ArtifactRef, Phrase};

/// What the UI should do in response to a tap.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlaybackOutcome {
    /// Speak the text through the always-available local voice.
    Instant {
        /// The text to speak.
        text: String,
    },
    /// Play the persisted high-quality clip.
    Cached {
        /// Verified reference to the clip.
        reference: ArtifactRef,
    },
}

impl PlaybackOutcome {
    /// Whether this outcome uses the cached clip.
    #[must_use]
    pub const fn is_cached(&self) -> bool {
        matches!(self, Self::Cached { .. })
    }
}

/// Result of deciding how to play a phrase.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlaybackDecision {
    /// What to play right now.
    pub outcome: PlaybackOutcome,
    /// Whether the caller should request an upgrade for this phrase.
    pub wants_upgrade: bool,
}

/// Decide how to play a phrase.
///
/// `artifact_verified` is the store's answer for the phrase's current
/// reference; it is ignored when the phrase has no artifact. A stale
/// reference (recorded but no longer verifiable) is treated exactly like a
/// missing one: instant speech now, plus an upgrade request unless one is
/// already in flight.
#[must_use]
pub fn decide(phrase: &Phrase, artifact_verified: bool) -> PlaybackDecision {
    match &phrase.artifact {
        Some(reference) if artifact_verified => PlaybackDecision {
            outcome: PlaybackOutcome::Cached {
                reference: reference.clone(),
            },
            wants_upgrade: false,
        },
        _ => PlaybackDecision {
            outcome: PlaybackOutcome::Instant {
                text: phrase.text.clone(),
            },
            wants_upgrade: !phrase.upgrade_in_progress,
        },
    }
}
