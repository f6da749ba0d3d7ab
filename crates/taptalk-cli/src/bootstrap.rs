//! CLI bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together
//! for the terminal adapter. All concrete implementations are
//! instantiated here:
//! - Filesystem artifact store (via taptalk-store)
//! - Remote synthesizer (via taptalk-synth)
//! - Local instant voice (via taptalk-voice)
//! - Upgrade scheduler (via taptalk-upgrade)
//!
//! The interactive loop receives the fully-composed `PhraseBoard` and
//! delegates everything to it.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};

use taptalk_app::{PhraseBoard, PhraseBoardDeps};
use taptalk_core::events::AppEvent;
use taptalk_core::ports::{AppEventEmitter, ArtifactStorePort, UpgradeConfig};
use taptalk_core::repository::PhraseRepository;
use taptalk_store::{FsArtifactStore, FsStoreConfig};
use taptalk_synth::{RemoteSynthesizer, SynthConfig};
use taptalk_upgrade::{UpgradeSchedulerDeps, build_upgrade_scheduler};
use taptalk_voice::{InstantVoiceConfig, ProcessInstantVoice};

use crate::parser::Cli;

/// Seed phrases for a fresh board.
const SEED_PHRASES: [&str; 3] = ["Hello!", "I am hungry", "Thank you"];

/// Emitter that forwards board events to the tracing sink.
///
/// The terminal adapter has no event transport; diagnostics land in the
/// log alongside everything else.
#[derive(Debug, Clone, Default)]
struct LogEmitter;

impl AppEventEmitter for LogEmitter {
    fn emit(&self, event: AppEvent) {
        tracing::info!(target: "taptalk.events", name = event.event_name(), "Board event");
    }

    fn clone_box(&self) -> Box<dyn AppEventEmitter> {
        Box::new(self.clone())
    }
}

/// Compose a `PhraseBoard` from CLI flags and environment overrides.
pub fn bootstrap(cli: &Cli) -> Result<PhraseBoard> {
    let cache_dir = match &cli.cache_dir {
        Some(dir) => dir.clone(),
        None => dirs::data_dir()
            .context("could not determine the platform data directory")?
            .join("taptalk")
            .join("clips"),
    };

    let mut synth_config =
        SynthConfig::new().with_api_key(std::env::var("TAPTALK_TTS_API_KEY").ok());
    if let Some(endpoint) = cli
        .endpoint
        .clone()
        .or_else(|| std::env::var("TAPTALK_TTS_ENDPOINT").ok())
    {
        synth_config = synth_config.with_endpoint(endpoint);
    }
    if let Some(voice) = cli
        .voice
        .clone()
        .or_else(|| std::env::var("TAPTALK_TTS_VOICE").ok())
    {
        synth_config = synth_config.with_voice(voice);
    }

    let synth =
        RemoteSynthesizer::new(synth_config).context("invalid speech provider endpoint")?;

    let repository = Arc::new(if cli.no_seed {
        PhraseRepository::new()
    } else {
        PhraseRepository::with_seed_phrases(SEED_PHRASES)
    });
    let store: Arc<dyn ArtifactStorePort> =
        Arc::new(FsArtifactStore::new(FsStoreConfig::new(cache_dir)));
    let instant_voice = Arc::new(ProcessInstantVoice::detect(InstantVoiceConfig {
        engine_bin: std::env::var_os("TAPTALK_SPEECH_ENGINE").map(Into::into),
        voice: None,
        rate_wpm: None,
    }));
    let event_emitter: Arc<dyn AppEventEmitter> = Arc::new(LogEmitter);

    let scheduler = build_upgrade_scheduler(UpgradeSchedulerDeps {
        repository: Arc::clone(&repository),
        synth: Arc::new(synth),
        store: Arc::clone(&store),
        event_emitter: Arc::clone(&event_emitter),
        config: UpgradeConfig::default()
            .with_fetch_timeout(Duration::from_secs(cli.fetch_timeout_secs)),
    });

    Ok(PhraseBoard::new(PhraseBoardDeps {
        repository,
        scheduler,
        store,
        instant_voice,
        event_emitter,
    }))
}
