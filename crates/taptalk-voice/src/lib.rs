//! Local instant-voice adapter for taptalk.
//!
//! Implements [`taptalk_core::ports::InstantVoicePort`] by spawning a local
//! CLI speech engine (`espeak-ng`, `espeak`, or macOS `say`), detached and
//! fire-and-forget. The instant voice is the always-available fallback
//! while a phrase has no cached high-quality clip, so every failure here
//! is absorbed and logged rather than surfaced.

#![deny(unused_crate_dependencies)]

mod instant;

pub use instant::{InstantVoiceConfig, ProcessInstantVoice};
