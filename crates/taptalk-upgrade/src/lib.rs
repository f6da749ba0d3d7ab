//! Per-phrase audio upgrade pipeline for taptalk.
//!
//! This crate provides the concrete implementation of
//! [`taptalk_core::ports::UpgradeSchedulerPort`]: a worker-per-phrase
//! scheduler that fetches a high-quality clip from the speech provider,
//! persists it through the artifact store, and keeps the phrase
//! repository consistent under concurrent taps and failures.
//!
//! # Architecture
//!
//! - **Scheduler**: per-phrase dedup, repository state transitions,
//!   event emission
//! - **Worker**: executes one fetch-and-persist job on value types and
//!   cloned Arc dependencies, with no access to the scheduler's locks
//!
//! # Concurrency Model
//!
//! - One worker task per phrase identifier, unbounded fan-out across ids
//! - The active-task map lock is the linearization point for dedup
//! - The in-progress repository update always lands before the task's
//!   terminal update

#![deny(unused_crate_dependencies)]

mod scheduler;

pub use scheduler::{UpgradeScheduler, UpgradeSchedulerDeps, build_upgrade_scheduler};
pub use scheduler::{UpgradeJob, WorkerDeps, run_job};

// Silence unused dev-dependency warnings
#[cfg(test)]
use tokio_test as _;
