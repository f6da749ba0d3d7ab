//! Core domain types, ports, and board state for the taptalk phrase board.
//!
//! Everything here is infrastructure-free: adapters implement the port
//! traits (`taptalk-store`, `taptalk-synth`, `taptalk-voice`), the
//! scheduler lives in `taptalk-upgrade`, and composition happens in
//! `taptalk-app`/`taptalk-cli`.

#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod events;
pub mod playback;
pub mod ports;
pub mod repository;
pub mod upgrade;

// Re-export commonly used types for convenience
pub use domain::{ArtifactRef, Phrase, PhraseId};
pub use events::{AppEvent, PhraseSummary};
pub use playback::{PlaybackDecision, PlaybackOutcome, decide};
pub use ports::{
    AppEventEmitter, ArtifactStorePort, InstantVoicePort, NoopEmitter, NoopInstantVoice,
    SpeechSynthesisPort, StoreError, SynthesisError, UpgradeConfig, UpgradeSchedulerPort,
};
pub use repository::PhraseRepository;
pub use upgrade::{UpgradeError, UpgradeEvent, UpgradeResult};

// Silence unused dev-dependency warnings
#[cfg(test)]
use tokio_test as _;
