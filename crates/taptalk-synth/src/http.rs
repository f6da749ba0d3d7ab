//! HTTP backend abstraction for the synthesis provider.
//!
//! This module provides a trait-based HTTP backend that allows for
//! dependency injection and easy testing. The production implementation
//! uses reqwest with automatic retry logic for transient errors.

use crate::config::SynthConfig;
use crate::error::{SynthApiError, SynthApiResult};
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;
use url::Url;

// ============================================================================
// Request payload
// ============================================================================

/// Body of a synthesis request (OpenAI-compatible speech API shape).
#[derive(Debug, Clone, Serialize)]
pub struct SpeechRequest {
    /// Model name understood by the provider.
    pub model: String,
    /// Text to render.
    pub input: String,
    /// Voice preset.
    pub voice: String,
    /// Container format for the returned audio.
    pub response_format: String,
}

// ============================================================================
// HTTP Backend Trait
// ============================================================================

/// Trait for HTTP backends that can fetch rendered audio.
///
/// This abstraction allows for dependency injection of HTTP clients,
/// making it easy to test code that depends on the provider.
///
/// This is an implementation detail - external code should use the
/// `SpeechSynthesisPort` trait.
#[async_trait]
pub trait HttpBackend: Send + Sync {
    /// POST the request to the URL and return the raw audio payload.
    async fn post_audio(&self, url: &Url, request: &SpeechRequest) -> SynthApiResult<Vec<u8>>;
}

// ============================================================================
// Reqwest Backend
// ============================================================================

/// Production HTTP backend using reqwest with retry logic.
///
/// Implements exponential backoff for transient server errors (5xx)
/// and network errors. Client errors (4xx) fail immediately.
pub struct ReqwestBackend {
    client: reqwest::Client,
    max_retries: u8,
    retry_base_delay: Duration,
    api_key: Option<String>,
}

impl ReqwestBackend {
    /// Create a new reqwest backend with the given configuration.
    pub fn new(config: &SynthConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("failed to create HTTP client");

        Self {
            client,
            max_retries: config.max_retries,
            retry_base_delay: config.retry_base_delay,
            api_key: config.api_key.clone(),
        }
    }

    /// Build a request with optional authentication.
    fn build_request(&self, url: &Url, request: &SpeechRequest) -> reqwest::RequestBuilder {
        let mut builder = self.client.post(url.as_str()).json(request);
        if let Some(ref key) = self.api_key {
            builder = builder.header("Authorization", format!("Bearer {key}"));
        }
        builder
    }

    /// Send the request with automatic retry for transient errors.
    async fn send_with_retry(
        &self,
        url: &Url,
        request: &SpeechRequest,
    ) -> SynthApiResult<reqwest::Response> {
        let mut last_error: Option<SynthApiError> = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                let delay = self.retry_base_delay * 2u32.pow(u32::from(attempt) - 1);
                tokio::time::sleep(delay).await;
            }

            match self.build_request(url, request).send().await {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        return Ok(response);
                    }

                    // 5xx errors are retryable (server-side issues)
                    if status.is_server_error() && attempt < self.max_retries {
                        last_error = Some(SynthApiError::RequestFailed {
                            status: status.as_u16(),
                            url: url.to_string(),
                        });
                        continue;
                    }

                    // 4xx errors or final attempt - fail immediately
                    return Err(SynthApiError::RequestFailed {
                        status: status.as_u16(),
                        url: url.to_string(),
                    });
                }
                Err(e) => {
                    // Network errors are retryable
                    if attempt < self.max_retries {
                        last_error = Some(e.into());
                        continue;
                    }
                    return Err(e.into());
                }
            }
        }

        Err(last_error.unwrap_or(SynthApiError::RequestFailed {
            status: 0,
            url: url.to_string(),
        }))
    }
}

#[async_trait]
impl HttpBackend for ReqwestBackend {
    async fn post_audio(&self, url: &Url, request: &SpeechRequest) -> SynthApiResult<Vec<u8>> {
        let response = self.send_with_retry(url, request).await?;
        let bytes = response.bytes().await?;
        Ok(bytes.to_vec())
    }
}

// ============================================================================
// Fake Backend for Testing
// ============================================================================


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reqwest_backend_creation() {
        let config = SynthConfig::default();
        let backend = ReqwestBackend::new(&config);
        assert_eq!(backend.max_retries, 3);
        assert_eq!(backend.retry_base_delay, Duration::from_millis(500));
        assert!(backend.api_key.is_none());
    }

    #[test]
    fn test_reqwest_backend_with_key() {
        let config = SynthConfig::default().with_api_key(Some("test_key".to_string()));
        let backend = ReqwestBackend::new(&config);
        assert_eq!(backend.api_key.as_deref(), Some("test_key"));
    }

    #[test]
    fn test_request_serializes_to_provider_shape() {
        let request = SpeechRequest {
            model: "kokoro".to_string(),
            input: "Hello!".to_string(),
            voice: "af_sky".to_string(),
            response_format: "mp3".to_string(),
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"input\":\"Hello!\""));
        assert!(json.contains("\"response_format\":\"mp3\""));
    }

    mod fake_backend_tests {
        use super::testing::*;
        use super::*;

        #[tokio::test]
        async fn fake_replays_queue_then_default() {
            let fake = FakeBackend::returning_audio(b"default".to_vec());
            fake.push_outcome(CannedOutcome::Fail(500));

            let url = Url::parse("http://localhost/v1/audio/speech").unwrap();
            let request = SpeechRequest {
                model: "kokoro".to_string(),
                input: "hi".to_string(),
                voice: "af_sky".to_string(),
                response_format: "mp3".to_string(),
            };

            let first = fake.post_audio(&url, &request).await;
            assert!(matches!(
                first,
                Err(SynthApiError::RequestFailed { status: 500, .. })
            ));

            let second = fake.post_audio(&url, &request).await.unwrap();
            assert_eq!(second, b"default");
            assert_eq!(fake.call_count(), 2);
        }
    }
}
