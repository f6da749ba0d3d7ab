//! Command-line parser for the taptalk terminal front end.

use clap::Parser;
use std::path::PathBuf;

/// Tap-to-speak phrase board in the terminal.
#[derive(Debug, Parser)]
#[command(
    name = "taptalk",
    version,
    about = "Tap a phrase, hear it instantly, and get the high-quality clip once it lands"
)]
pub struct Cli {
    /// Directory audio clips are cached in (defaults to the platform data dir).
    #[arg(long)]
    pub cache_dir: Option<PathBuf>,

    /// Speech provider endpoint (OpenAI-compatible `/v1/audio/speech`).
    ///
    /// Falls back to `TAPTALK_TTS_ENDPOINT`, then the local Kokoro default.
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Voice preset requested from the provider.
    ///
    /// Falls back to `TAPTALK_TTS_VOICE`.
    #[arg(long)]
    pub voice: Option<String>,

    /// Fetch timeout in seconds for a single upgrade.
    #[arg(long, default_value_t = 20)]
    pub fetch_timeout_secs: u64,

    /// Start with an empty board instead of the seed phrases.
    #[arg(long)]
    pub no_seed: bool,
}
