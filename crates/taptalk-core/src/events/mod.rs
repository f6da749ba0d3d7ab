//! Canonical event union for all cross-adapter events.
//!
//! This module is the single source of truth for events consumed by front
//! ends (terminal UI, future GUI) and emitted by the core services.
//!
//! # Wire Format
//!
//! Events are serialized with a `type` tag:
//!
//! ```json
//! { "type": "phrase_added", "phrase": { "id": "...", "text": "Hello!" } }
//! ```

use serde::{Deserialize, Serialize};

use crate::domain::{Phrase, PhraseId};
use crate::upgrade::UpgradeEvent;

/// UI-safe summary of a phrase, carried in events.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhraseSummary {
    /// Stable identifier.
    pub id: PhraseId,
    /// Display text.
    pub text: String,
    /// Whether a high-quality clip is recorded.
    pub is_upgraded: bool,
    /// Whether an upgrade task is currently running.
    pub in_progress: bool,
}

impl From<&Phrase> for PhraseSummary {
    fn from(phrase: &Phrase) -> Self {
        Self {
            id: phrase.id.clone(),
            text: phrase.text.clone(),
            is_upgraded: phrase.is_upgraded(),
            in_progress: phrase.upgrade_in_progress,
        }
    }
}

/// Canonical event types for all adapters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AppEvent {
    /// A phrase was added to the board.
    PhraseAdded {
        /// Summary of the added phrase.
        phrase: PhraseSummary,
    },

    /// Upgrade lifecycle events.
    ///
    /// Wraps `UpgradeEvent` verbatim so transports see the full detail.
    #[serde(rename = "upgrade")]
    Upgrade {
        /// The upgrade event payload.
        event: UpgradeEvent,
    },
}

impl AppEvent {
    /// Create a phrase added event from a phrase snapshot.
    pub fn phrase_added(phrase: &Phrase) -> Self {
        Self::PhraseAdded {
            phrase: PhraseSummary::from(phrase),
        }
    }

    /// Create an upgrade started event.
    pub const fn upgrade_started(id: PhraseId) -> Self {
        Self::Upgrade {
            event: UpgradeEvent::started(id),
        }
    }

    /// Create an upgrade completed event.
    pub fn upgrade_completed(id: PhraseId, key: impl Into<String>) -> Self {
        Self::Upgrade {
            event: UpgradeEvent::completed(id, key),
        }
    }

    /// Create an upgrade failed event.
    pub fn upgrade_failed(id: PhraseId, error: impl Into<String>) -> Self {
        Self::Upgrade {
            event: UpgradeEvent::failed(id, error),
        }
    }

    /// Create an upgrade cancelled event.
    pub const fn upgrade_cancelled(id: PhraseId) -> Self {
        Self::Upgrade {
            event: UpgradeEvent::cancelled(id),
        }
    }

    /// Get the event name for wire protocols.
    ///
    /// This provides consistent event naming across transports.
    pub const fn event_name(&self) -> &'static str {
        match self {
            Self::PhraseAdded { .. } => "phrase:added",
            Self::Upgrade { event } => event.event_name(),
        }
    }
}
