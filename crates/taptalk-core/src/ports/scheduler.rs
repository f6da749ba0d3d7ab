//! Upgrade scheduler port definition.
//!
//! This port is the public interface of the upgrade pipeline. It hides all
//! implementation details (cancellation tokens, active-task map, worker
//! tasks) behind a small fire-and-forget API.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::PhraseId;

/// Configuration for the upgrade scheduler.
#[derive(Debug, Clone)]
pub struct UpgradeConfig {
    /// Upper bound on a single remote fetch. Fetches exceeding it are
    /// treated as failed; the exact value is a tunable, not a correctness
    /// requirement.
    pub fetch_timeout: Duration,
}

impl Default for UpgradeConfig {
    fn default() -> Self {
        Self {
            fetch_timeout: Duration::from_secs(20),
        }
    }
}

impl UpgradeConfig {
    /// Set the fetch timeout.
    #[must_use]
    pub const fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }
}

/// Port for the per-phrase upgrade pipeline.
///
/// # Usage
///
/// ```ignore
/// let scheduler: Arc<dyn UpgradeSchedulerPort> = /* ... */;
///
/// // Fire-and-forget; a second call for the same id while the first is
/// // in flight is a no-op.
/// Arc::clone(&scheduler).start(phrase.id.clone()).await;
/// ```
#[async_trait]
pub trait UpgradeSchedulerPort: Send + Sync {
    /// Begin an upgrade for the phrase unless one is already in flight.
    ///
    /// Idempotent while a task for the same identifier is running: the
    /// existing task is neither duplicated nor restarted. Failures are
    /// absorbed and reported through events, never returned to the caller.
    ///
    /// The `self: Arc<Self>` receiver allows implementations to clone the
    /// Arc and spawn the worker task. This is object-safe and works with
    /// `Arc<dyn UpgradeSchedulerPort>`.
    async fn start(self: Arc<Self>, id: PhraseId);

    /// Whether an upgrade task for the id is currently running.
    async fn is_upgrading(&self, id: &PhraseId) -> bool;

    /// Number of in-flight upgrade tasks.
    async fn active_count(&self) -> usize;

    /// Cancel all in-flight upgrades.
    ///
    /// Used during shutdown. Abandoned tasks never publish a partially
    /// written artifact (store writes are atomic) and never block shutdown.
    async fn cancel_all(&self);
}
