//! Application facade for the taptalk phrase board.
//!
//! `PhraseBoard` composes the repository, upgrade scheduler, artifact
//! store, and instant voice behind the two UI entry points: `add_phrase`
//! and `on_tap`. Adapters (terminal front end, future GUI) receive a
//! `PhraseBoard` built at their composition root with concrete port
//! implementations.

#![deny(unused_crate_dependencies)]

// Silence unused dev-dependency warnings (used by the integration tests)
#[cfg(test)]
use async_trait as _;
#[cfg(test)]
use taptalk_upgrade as _;

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, warn};

use taptalk_core::domain::{Phrase, PhraseId};
use taptalk_core::events::AppEvent;
use taptalk_core::playback::{self, PlaybackOutcome};
use taptalk_core::ports::{
    AppEventEmitter, ArtifactStorePort, InstantVoicePort, UpgradeSchedulerPort,
};
use taptalk_core::repository::PhraseRepository;

/// Dependencies for assembling a phrase board.
///
/// All collaborators are injected explicitly (constructor injection, no
/// ambient singletons).
pub struct PhraseBoardDeps {
    /// The canonical phrase collection.
    pub repository: Arc<PhraseRepository>,
    /// The upgrade pipeline.
    pub scheduler: Arc<dyn UpgradeSchedulerPort>,
    /// Artifact store, used to verify recorded clips before playback.
    pub store: Arc<dyn ArtifactStorePort>,
    /// Always-available local voice.
    pub instant_voice: Arc<dyn InstantVoicePort>,
    /// Sink for board events.
    pub event_emitter: Arc<dyn AppEventEmitter>,
}

/// The phrase board facade.
///
/// Taps never fail and never block on the network: a phrase with no
/// usable clip is spoken instantly and its upgrade is requested on the
/// side.
pub struct PhraseBoard {
    repository: Arc<PhraseRepository>,
    scheduler: Arc<dyn UpgradeSchedulerPort>,
    store: Arc<dyn ArtifactStorePort>,
    instant_voice: Arc<dyn InstantVoicePort>,
    event_emitter: Arc<dyn AppEventEmitter>,
}

impl PhraseBoard {
    /// Assemble a board from its dependencies.
    #[must_use]
    pub fn new(deps: PhraseBoardDeps) -> Self {
        Self {
            repository: deps.repository,
            scheduler: deps.scheduler,
            store: deps.store,
            instant_voice: deps.instant_voice,
            event_emitter: deps.event_emitter,
        }
    }

    /// Add a phrase to the board and kick off its upgrade.
    pub async fn add_phrase(&self, text: impl Into<String>) -> Phrase {
        let phrase = self.repository.add(text).await;
        self.event_emitter.emit(AppEvent::phrase_added(&phrase));
        Arc::clone(&self.scheduler).start(phrase.id.clone()).await;
        phrase
    }

    /// Handle a tap on a phrase tile.
    ///
    /// Returns `None` for an unknown identifier. Otherwise the phrase's
    /// recorded clip is re-verified against the store, the playback
    /// decision is applied (instant speech is spoken here, cached
    /// playback is the caller's job), and a missing or stale clip
    /// triggers at most one new upgrade.
    pub async fn on_tap(&self, id: &PhraseId) -> Option<PlaybackOutcome> {
        let Some(phrase) = self.repository.get(id).await else {
            warn!(target: "taptalk.board", id = %id, "Tap for unknown phrase ignored");
            return None;
        };

        let verified = match &phrase.artifact {
            Some(reference) => {
                let ok = self.store.exists(&reference.key).await;
                if !ok {
                    warn!(
                        target: "taptalk.playback",
                        id = %id,
                        key = %reference.key,
                        "Recorded clip no longer resolves; falling back to instant voice"
                    );
                }
                ok
            }
            None => false,
        };

        let decision = playback::decide(&phrase, verified);
        if let PlaybackOutcome::Instant { text } = &decision.outcome {
            self.instant_voice.speak(text);
        }
        if decision.wants_upgrade {
            Arc::clone(&self.scheduler).start(phrase.id.clone()).await;
        }

        debug!(
            target: "taptalk.playback",
            id = %id,
            cached = decision.outcome.is_cached(),
            upgrade_requested = decision.wants_upgrade,
            "Tap handled"
        );
        Some(decision.outcome)
    }

    /// Snapshot of the current ordered phrase collection.
    pub async fn phrases(&self) -> Vec<Phrase> {
        self.repository.snapshot().await
    }

    /// Subscribe to board changes (last-write-wins snapshots).
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Vec<Phrase>> {
        self.repository.subscribe()
    }

    /// Cancel in-flight upgrades. Safe to call more than once.
    pub async fn shutdown(&self) {
        self.scheduler.cancel_all().await;
    }
}
