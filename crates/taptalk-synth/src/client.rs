//! The remote synthesizer: `SpeechSynthesisPort` over an HTTP backend.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};
use url::Url;

use taptalk_core::ports::{SpeechSynthesisPort, SynthesisError};

use crate::config::SynthConfig;
use crate::error::{SynthApiError, SynthApiResult};
use crate::http::{HttpBackend, ReqwestBackend, SpeechRequest};

/// Speech synthesis client for an OpenAI-compatible speech endpoint.
///
/// Construct with [`RemoteSynthesizer::new`] and hand to the upgrade
/// scheduler as `Arc<dyn SpeechSynthesisPort>`.
pub struct RemoteSynthesizer {
    backend: Arc<dyn HttpBackend>,
    endpoint: Url,
    model: String,
    voice: String,
    response_format: String,
}

impl RemoteSynthesizer {
    /// Create a synthesizer using the production reqwest backend.
    ///
    /// Fails only if the configured endpoint is not a valid URL.
    pub fn new(config: SynthConfig) -> SynthApiResult<Self> {
        let backend = Arc::new(ReqwestBackend::new(&config));
        Self::with_backend(config, backend)
    }

    /// Create a synthesizer over an injected backend.
    pub(crate) fn with_backend(
        config: SynthConfig,
        backend: Arc<dyn HttpBackend>,
    ) -> SynthApiResult<Self> {
        let endpoint = Url::parse(&config.endpoint)?;
        Ok(Self {
            backend,
            endpoint,
            model: config.model,
            voice: config.voice,
            response_format: config.response_format,
        })
    }

    fn speech_request(&self, text: &str) -> SpeechRequest {
        SpeechRequest {
            model: self.model.clone(),
            input: text.to_string(),
            voice: self.voice.clone(),
            response_format: self.response_format.clone(),
        }
    }
}

/// Map an internal HTTP error onto the core port's taxonomy.
fn to_port_error(err: &SynthApiError) -> SynthesisError {
    match err.status() {
        Some(status) => SynthesisError::fetch_failed_with_status(err.to_string(), status),
        None => SynthesisError::fetch_failed(err.to_string()),
    }
}

#[async_trait]
impl SpeechSynthesisPort for RemoteSynthesizer {
    async fn fetch(&self, text: &str) -> Result<Vec<u8>, SynthesisError> {
        debug!(target: "taptalk.synth", voice = %self.voice, chars = text.len(), "Fetching rendered speech");

        let request = self.speech_request(text);
        match self.backend.post_audio(&self.endpoint, &request).await {
            Ok(bytes) => {
                debug!(target: "taptalk.synth", bytes = bytes.len(), "Fetch complete");
                Ok(bytes)
            }
            Err(err) => {
                warn!(target: "taptalk.synth", error = %err, "Fetch failed");
                Err(to_port_error(&err))
            }
        }
    }
}
