//! Upgrade worker pipeline.
//!
//! This module contains the core fetch-and-persist logic, isolated from
//! the scheduler's bookkeeping. The worker operates on a value-type job
//! and cloned Arc dependencies, with no access to the scheduler's active
//! map.
//!
//! # Cancellation
//!
//! Cancellation is checked around the remote fetch via `tokio::select!`.
//! Once the clip has been fetched, the persist is allowed to finish: the
//! store's atomic publish keeps readers safe either way, and abandoning
//! a fully fetched clip would only waste the provider call.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use taptalk_core::domain::{ArtifactRef, PhraseId};
use taptalk_core::ports::{ArtifactStorePort, SpeechSynthesisPort, StoreError, SynthesisError};
use taptalk_core::upgrade::UpgradeError;

/// Dependencies for the upgrade worker.
///
/// Cloned Arc references to ports, letting the worker run independently
/// of the scheduler's state.
#[derive(Clone)]
pub struct WorkerDeps {
    /// Remote speech provider.
    pub synth: Arc<dyn SpeechSynthesisPort>,
    /// Artifact store the clip is persisted to.
    pub store: Arc<dyn ArtifactStorePort>,
    /// Upper bound on the remote fetch.
    pub fetch_timeout: Duration,
}

/// A single upgrade job to be executed by the worker.
///
/// Value type containing everything needed to run one upgrade, with no
/// references back to the scheduler.
pub struct UpgradeJob {
    /// Identifier of the phrase being upgraded.
    pub id: PhraseId,
    /// Text to synthesize.
    pub text: String,
    /// Cancellation token for this job.
    pub cancel: CancellationToken,
}

/// Map a provider error onto the upgrade taxonomy.
fn map_fetch_error(err: &SynthesisError) -> UpgradeError {
    match err.status_code() {
        Some(status) => UpgradeError::fetch_with_status(err.to_string(), status),
        None => UpgradeError::fetch(err.to_string()),
    }
}

/// Map a store error onto the upgrade taxonomy.
fn map_persist_error(err: StoreError) -> UpgradeError {
    match err {
        StoreError::Io { kind, message } => UpgradeError::persist(kind, message),
        other => UpgradeError::persist("Store", other.to_string()),
    }
}

/// Run one fetch-and-persist job to completion.
///
/// Returns the reference of the persisted clip. When cancelled before the
/// fetch resolves, returns [`UpgradeError::Cancelled`]. A fetch exceeding
/// `deps.fetch_timeout` is treated as a fetch failure.
pub async fn run_job(job: UpgradeJob, deps: &WorkerDeps) -> Result<ArtifactRef, UpgradeError> {
    let bytes = tokio::select! {
        biased;

        () = job.cancel.cancelled() => {
            return Err(UpgradeError::Cancelled);
        }

        fetched = tokio::time::timeout(deps.fetch_timeout, deps.synth.fetch(&job.text)) => {
            match fetched {
                Err(_) => {
                    return Err(UpgradeError::fetch(format!(
                        "timed out after {} ms",
                        deps.fetch_timeout.as_millis()
                    )));
                }
                Ok(Err(err)) => return Err(map_fetch_error(&err)),
                Ok(Ok(bytes)) => bytes,
            }
        }
    };

    deps.store
        .persist(job.id.as_str(), &bytes)
        .await
        .map_err(map_persist_error)
}
