//! Remote speech-synthesis client for taptalk.
//!
//! Implements [`taptalk_core::ports::SpeechSynthesisPort`] against an
//! OpenAI-compatible `/v1/audio/speech` endpoint (local Kokoro server,
//! hosted provider, or equivalent). The HTTP layer sits behind an
//! injectable backend trait so tests run against canned responses.

#![deny(unused_crate_dependencies)]

mod client;
mod config;
mod error;
mod http;

// Client
pub use client::RemoteSynthesizer;

// Configuration
pub use config::SynthConfig;

// Errors (mapped to core port errors at the boundary)
pub use error::{SynthApiError, SynthApiResult};

// Silence unused dev-dependency warnings
#[cfg(test)]
use tokio_test as _;
