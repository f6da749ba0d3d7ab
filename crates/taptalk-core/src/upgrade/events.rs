//! Upgrade events - discriminated union for all upgrade state changes.

use crate::domain::PhraseId;
use serde::{Deserialize, Serialize};

/// Single discriminated union for all upgrade lifecycle events.
///
/// Front ends handle this as a discriminated union keyed on `type`:
///
/// ```json
/// { "type": "upgrade_started", "id": "..." }
/// { "type": "upgrade_completed", "id": "...", "key": "..." }
/// { "type": "upgrade_failed", "id": "...", "error": "..." }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UpgradeEvent {
    /// An upgrade task has started for the phrase.
    UpgradeStarted {
        /// Identifier of the phrase being upgraded.
        id: PhraseId,
    },

    /// The upgrade finished and the artifact is persisted.
    UpgradeCompleted {
        /// Identifier of the upgraded phrase.
        id: PhraseId,
        /// Store key the clip was persisted under.
        key: String,
    },

    /// The upgrade failed; the phrase is back in a retryable state.
    UpgradeFailed {
        /// Identifier of the phrase whose upgrade failed.
        id: PhraseId,
        /// Error message describing what went wrong.
        error: String,
    },

    /// The upgrade task was cancelled (shutdown path).
    UpgradeCancelled {
        /// Identifier of the phrase whose upgrade was cancelled.
        id: PhraseId,
    },
}

impl UpgradeEvent {
    /// Create an upgrade started event.
    pub const fn started(id: PhraseId) -> Self {
        Self::UpgradeStarted { id }
    }

    /// Create an upgrade completed event.
    pub fn completed(id: PhraseId, key: impl Into<String>) -> Self {
        Self::UpgradeCompleted {
            id,
            key: key.into(),
        }
    }

    /// Create an upgrade failed event.
    pub fn failed(id: PhraseId, error: impl Into<String>) -> Self {
        Self::UpgradeFailed {
            id,
            error: error.into(),
        }
    }

    /// Create an upgrade cancelled event.
    pub const fn cancelled(id: PhraseId) -> Self {
        Self::UpgradeCancelled { id }
    }

    /// Get the phrase identifier from any event type.
    #[must_use]
    pub const fn id(&self) -> &PhraseId {
        match self {
            Self::UpgradeStarted { id }
            | Self::UpgradeCompleted { id, .. }
            | Self::UpgradeFailed { id, .. }
            | Self::UpgradeCancelled { id } => id,
        }
    }

    /// Get the event name for wire protocols.
    #[must_use]
    pub const fn event_name(&self) -> &'static str {
        match self {
            Self::UpgradeStarted { .. } => "upgrade:started",
            Self::UpgradeCompleted { .. } => "upgrade:completed",
            Self::UpgradeFailed { .. } => "upgrade:failed",
            Self::UpgradeCancelled { .. } => "upgrade:cancelled",
        }
    }
}
