//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the core domain expects from
//! infrastructure. They contain no implementation details and use only
//! domain types.
//!
//! # Design Rules
//!
//! - No `reqwest`, filesystem, or process types in any signature
//! - The speech provider is an opaque fallible async call
//! - Instant voice is infallible from the core's perspective
//! - The scheduler port is fire-and-forget; failures surface as events

pub mod artifact_store;
pub mod event_emitter;
pub mod instant_voice;
pub mod scheduler;
pub mod speech_synthesis;

pub use artifact_store::{ArtifactStorePort, StoreError};
pub use event_emitter::{AppEventEmitter, NoopEmitter};
pub use instant_voice::{InstantVoicePort, NoopInstantVoice};
pub use scheduler::{UpgradeConfig, UpgradeSchedulerPort};
pub use speech_synthesis::{SpeechSynthesisPort, SynthesisError};
