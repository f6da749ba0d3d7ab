//! Instant voice port definition.
//!
//! The instant voice is the always-available, low-latency local speech
//! engine used as the immediate fallback while a phrase has no cached
//! clip. It never fails from the core's perspective; adapters own their
//! failure handling and keep it invisible.

/// Port for speaking text through the local synthetic voice.
pub trait InstantVoicePort: Send + Sync {
    /// Speak the text now, fire-and-forget.
    ///
    /// Must return promptly and must never block on any network call.
    fn speak(&self, text: &str);
}

/// A silent instant voice for tests and headless contexts.
#[derive(Debug, Clone, Default)]
pub struct NoopInstantVoice;

impl NoopInstantVoice {
    /// Create a new silent instant voice.
    pub const fn new() -> Self {
        Self
    }
}

impl InstantVoicePort for NoopInstantVoice {
    fn speak(&self, _text: &str) {
        // Intentionally do nothing
    }
}
