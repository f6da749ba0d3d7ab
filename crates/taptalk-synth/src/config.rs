//! Public configuration for the synthesis client.

use std::time::Duration;

/// Configuration for the remote synthesis client.
///
/// Defaults target a local Kokoro server speaking the OpenAI-compatible
/// speech API. Use the builder methods to point at a hosted provider.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use taptalk_synth::SynthConfig;
///
/// let config = SynthConfig::new()
///     .with_endpoint("https://tts.internal/v1/audio/speech")
///     .with_voice("af_bella")
///     .with_timeout(Duration::from_secs(60));
/// ```
#[derive(Debug, Clone)]
pub struct SynthConfig {
    /// URL the synthesis request is POSTed to.
    pub(crate) endpoint: String,
    /// Model name sent to the provider.
    pub(crate) model: String,
    /// Voice preset requested from the provider.
    pub(crate) voice: String,
    /// Container format requested from the provider.
    pub(crate) response_format: String,
    /// Optional bearer token.
    pub(crate) api_key: Option<String>,
    /// Per-request timeout.
    pub(crate) timeout: Duration,
    /// Maximum number of retry attempts for transient errors.
    pub(crate) max_retries: u8,
    /// Base delay for exponential backoff.
    pub(crate) retry_base_delay: Duration,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:8880/v1/audio/speech".to_string(),
            model: "kokoro".to_string(),
            voice: "af_sky".to_string(),
            response_format: "mp3".to_string(),
            api_key: None,
            timeout: Duration::from_secs(30),
            max_retries: 3,
            retry_base_delay: Duration::from_millis(500),
        }
    }
}

impl SynthConfig {
    /// Create a new configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the endpoint URL.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set the model name sent to the provider.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the voice preset.
    #[must_use]
    pub fn with_voice(mut self, voice: impl Into<String>) -> Self {
        self.voice = voice.into();
        self
    }

    /// Set the container format requested from the provider.
    #[must_use]
    pub fn with_response_format(mut self, format: impl Into<String>) -> Self {
        self.response_format = format.into();
        self
    }

    /// Set an optional bearer token.
    #[must_use]
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key;
        self
    }

    /// Set the per-request timeout.
    ///
    /// Defaults to 30 seconds.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the maximum number of retries for transient errors.
    #[must_use]
    pub const fn with_max_retries(mut self, max_retries: u8) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Set the base delay for exponential backoff.
    #[must_use]
    pub const fn with_retry_base_delay(mut self, delay: Duration) -> Self {
        self.retry_base_delay = delay;
        self
    }
}
