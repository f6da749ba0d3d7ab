//! Upgrade scheduler implementation.
//!
//! Orchestrates one upgrade task per phrase identifier: dedup, repository
//! state transitions, worker lifecycle, and event emission.
//!
//! # State machine (per phrase id)
//!
//! `Idle → Upgrading → (Ready | Idle)`
//!
//! A start request while `Upgrading` is a no-op; the in-flight task is
//! neither duplicated nor restarted. A failed task returns the phrase to
//! `Idle` with its artifact field untouched, so a previously recorded clip
//! survives a failed re-upgrade. Retries are demand-driven (next tap), not
//! time-driven.

mod worker;

pub use worker::{UpgradeJob, WorkerDeps, run_job};

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use taptalk_core::domain::PhraseId;
use taptalk_core::events::AppEvent;
use taptalk_core::ports::{
    AppEventEmitter, ArtifactStorePort, SpeechSynthesisPort, UpgradeConfig, UpgradeSchedulerPort,
};
use taptalk_core::repository::PhraseRepository;

/// State for an active upgrade task.
struct ActiveUpgrade {
    /// Cancellation token for this task.
    cancel: CancellationToken,
}

/// Dependencies for creating an upgrade scheduler.
///
/// This struct bundles all the ports and configuration needed to
/// construct an `UpgradeScheduler`. Everything is injected explicitly;
/// the scheduler never reaches for ambient singletons.
pub struct UpgradeSchedulerDeps {
    /// The canonical phrase collection; all mutations route through it.
    pub repository: Arc<PhraseRepository>,
    /// Remote speech provider.
    pub synth: Arc<dyn SpeechSynthesisPort>,
    /// Artifact store for persisted clips.
    pub store: Arc<dyn ArtifactStorePort>,
    /// Sink for upgrade lifecycle events.
    pub event_emitter: Arc<dyn AppEventEmitter>,
    /// Scheduler configuration.
    pub config: UpgradeConfig,
}

/// Build an upgrade scheduler from its dependencies.
///
/// Returns an implementation of `UpgradeSchedulerPort` that can be stored
/// as `Arc<dyn UpgradeSchedulerPort>` in adapters.
#[must_use]
pub fn build_upgrade_scheduler(deps: UpgradeSchedulerDeps) -> Arc<UpgradeScheduler> {
    Arc::new(UpgradeScheduler::new(deps))
}

/// Concrete implementation of the upgrade scheduler.
///
/// Adapters should typically use `Arc<dyn UpgradeSchedulerPort>` instead
/// of depending on this type directly.
pub struct UpgradeScheduler {
    /// The canonical phrase collection.
    repository: Arc<PhraseRepository>,
    /// Dependencies handed to each worker task.
    worker_deps: WorkerDeps,
    /// Event emitter for upgrade lifecycle events.
    event_emitter: Arc<dyn AppEventEmitter>,
    /// Active upgrades keyed by phrase id.
    ///
    /// Checking and inserting under this lock is what guarantees
    /// at-most-one task per id. Entries are removed by each task's
    /// finalizer.
    active: Mutex<HashMap<PhraseId, ActiveUpgrade>>,
}

impl UpgradeScheduler {
    fn new(deps: UpgradeSchedulerDeps) -> Self {
        Self {
            repository: deps.repository,
            worker_deps: WorkerDeps {
                synth: deps.synth,
                store: deps.store,
                fetch_timeout: deps.config.fetch_timeout,
            },
            event_emitter: deps.event_emitter,
            active: Mutex::new(HashMap::new()),
        }
    }

    /// Run a worker job and apply its terminal state.
    ///
    /// The repository update lands before the active entry is removed, so
    /// the in-progress flag is never false while a task could still write.
    async fn run_and_finalize(self: Arc<Self>, job: UpgradeJob) {
        let id = job.id.clone();
        let result = run_job(job, &self.worker_deps).await;

        match result {
            Ok(reference) => {
                let key = reference.key.clone();
                self.repository
                    .update(&id, |phrase| {
                        phrase.artifact = Some(reference);
                        phrase.upgrade_in_progress = false;
                    })
                    .await;
                info!(target: "taptalk.upgrade", id = %id, key = %key, "Upgrade complete");
                self.event_emitter
                    .emit(AppEvent::upgrade_completed(id.clone(), key));
            }
            Err(err) if err.is_cancelled() => {
                self.repository
                    .update(&id, |phrase| phrase.upgrade_in_progress = false)
                    .await;
                debug!(target: "taptalk.upgrade", id = %id, "Upgrade cancelled");
                self.event_emitter
                    .emit(AppEvent::upgrade_cancelled(id.clone()));
            }
            Err(err) => {
                // Artifact field left untouched: `None` stays retryable and
                // an existing clip from an earlier upgrade is preserved.
                self.repository
                    .update(&id, |phrase| phrase.upgrade_in_progress = false)
                    .await;
                warn!(target: "taptalk.upgrade", id = %id, error = %err, "Upgrade failed; will retry on next tap");
                self.event_emitter
                    .emit(AppEvent::upgrade_failed(id.clone(), err.to_string()));
            }
        }

        self.active.lock().await.remove(&id);
    }
}

#[async_trait]
impl UpgradeSchedulerPort for UpgradeScheduler {
    async fn start(self: Arc<Self>, id: PhraseId) {
        let Some(phrase) = self.repository.get(&id).await else {
            warn!(target: "taptalk.upgrade", id = %id, "Upgrade requested for unknown phrase");
            return;
        };

        let cancel = CancellationToken::new();
        {
            let mut active = self.active.lock().await;
            if active.contains_key(&id) {
                debug!(target: "taptalk.upgrade", id = %id, "Upgrade already in flight; ignoring");
                return;
            }
            active.insert(
                id.clone(),
                ActiveUpgrade {
                    cancel: cancel.clone(),
                },
            );
        }

        // The in-progress update must be observable before any terminal
        // update from the task we are about to spawn.
        self.repository
            .update(&id, |phrase| phrase.upgrade_in_progress = true)
            .await;
        self.event_emitter
            .emit(AppEvent::upgrade_started(id.clone()));
        info!(target: "taptalk.upgrade", id = %id, "Upgrade started");

        let job = UpgradeJob {
            id,
            text: phrase.text,
            cancel,
        };
        let scheduler = Arc::clone(&self);
        tokio::spawn(async move {
            scheduler.run_and_finalize(job).await;
        });
    }

    async fn is_upgrading(&self, id: &PhraseId) -> bool {
        self.active.lock().await.contains_key(id)
    }

    async fn active_count(&self) -> usize {
        self.active.lock().await.len()
    }

    async fn cancel_all(&self) {
        let active = self.active.lock().await;
        for (id, task) in active.iter() {
            debug!(target: "taptalk.upgrade", id = %id, "Cancelling in-flight upgrade");
            task.cancel.cancel();
        }
    }
}

// ============================================================================
// Test fakes
// ============================================================================
