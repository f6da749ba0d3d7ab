//! Process-spawning implementation of `InstantVoicePort`.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::{debug, info, warn};

use taptalk_core::ports::InstantVoicePort;

/// Configuration for the local instant voice.
#[derive(Debug, Clone, Default)]
pub struct InstantVoiceConfig {
    /// Explicit engine binary; skips PATH detection when set.
    pub engine_bin: Option<PathBuf>,
    /// Voice code handed to the engine (`-v`).
    pub voice: Option<String>,
    /// Speaking rate in words per minute.
    pub rate_wpm: Option<u16>,
}

/// Known local speech engines and how to invoke them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EngineKind {
    /// espeak-ng / espeak: `-v <voice> -s <wpm> <text>`.
    Espeak,
    /// macOS `say`: `-v <voice> -r <wpm> <text>`.
    Say,
    /// Unrecognized binary; passed the bare text.
    Generic,
}

impl EngineKind {
    fn from_binary(bin: &Path) -> Self {
        match bin.file_stem().and_then(|s| s.to_str()) {
            Some(name) if name.starts_with("espeak") => Self::Espeak,
            Some("say") => Self::Say,
            _ => Self::Generic,
        }
    }
}

#[derive(Debug, Clone)]
struct Engine {
    kind: EngineKind,
    bin: PathBuf,
}

/// Instant voice that shells out to a local CLI speech engine.
///
/// Detection prefers an explicit override, then `espeak-ng`, `espeak`,
/// and `say` on PATH. With no engine present the adapter degrades to
/// logging the text; the board keeps working.
pub struct ProcessInstantVoice {
    engine: Option<Engine>,
    voice: Option<String>,
    rate_wpm: Option<u16>,
}

impl ProcessInstantVoice {
    /// Detect a local engine according to the configuration.
    #[must_use]
    pub fn detect(config: InstantVoiceConfig) -> Self {
        let engine = resolve_engine(config.engine_bin.as_deref());
        match &engine {
            Some(engine) => {
                info!(target: "taptalk.voice", bin = %engine.bin.display(), "Detected local speech engine");
            }
            None => {
                warn!(target: "taptalk.voice", "No local speech engine found; instant voice will only log");
            }
        }

        Self {
            engine,
            voice: config.voice,
            rate_wpm: config.rate_wpm,
        }
    }

    /// An instant voice with no engine, for headless setups.
    #[must_use]
    pub const fn disabled() -> Self {
        Self {
            engine: None,
            voice: None,
            rate_wpm: None,
        }
    }

    /// Whether a local engine was found.
    #[must_use]
    pub const fn has_engine(&self) -> bool {
        self.engine.is_some()
    }

    fn command_for(&self, text: &str) -> Option<Command> {
        let engine = self.engine.as_ref()?;
        let mut cmd = Command::new(&engine.bin);

        match engine.kind {
            EngineKind::Espeak => {
                if let Some(voice) = &self.voice {
                    cmd.arg("-v").arg(voice);
                }
                if let Some(wpm) = self.rate_wpm {
                    cmd.arg("-s").arg(wpm.to_string());
                }
            }
            EngineKind::Say => {
                if let Some(voice) = &self.voice {
                    cmd.arg("-v").arg(voice);
                }
                if let Some(wpm) = self.rate_wpm {
                    cmd.arg("-r").arg(wpm.to_string());
                }
            }
            EngineKind::Generic => {}
        }

        cmd.arg(text)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        Some(cmd)
    }
}

impl InstantVoicePort for ProcessInstantVoice {
    fn speak(&self, text: &str) {
        if text.trim().is_empty() {
            return;
        }

        let Some(mut cmd) = self.command_for(text) else {
            info!(target: "taptalk.voice", %text, "No speech engine; phrase logged only");
            return;
        };

        // Fire-and-forget: the child is left to run on its own. Playback
        // latency and exit status are the engine's business, not ours.
        match cmd.spawn() {
            Ok(_child) => {
                debug!(target: "taptalk.voice", chars = text.len(), "Speaking instantly");
            }
            Err(err) => {
                warn!(target: "taptalk.voice", error = %err, "Failed to spawn speech engine");
            }
        }
    }
}

/// Resolve the engine binary: explicit override first, then PATH lookup.
fn resolve_engine(override_bin: Option<&Path>) -> Option<Engine> {
    if let Some(bin) = override_bin {
        if bin.is_file() {
            return Some(Engine {
                kind: EngineKind::from_binary(bin),
                bin: bin.to_path_buf(),
            });
        }
        warn!(target: "taptalk.voice", bin = %bin.display(), "Configured speech engine not found; falling back to PATH");
    }

    for candidate in ["espeak-ng", "espeak", "say"] {
        if let Some(bin) = find_in_path(candidate) {
            return Some(Engine {
                kind: EngineKind::from_binary(&bin),
                bin,
            });
        }
    }
    None
}

fn find_in_path(bin: &str) -> Option<PathBuf> {
    let paths = std::env::var_os("PATH")?;
    std::env::split_paths(&paths)
        .map(|dir| dir.join(bin))
        .find(|candidate| candidate.is_file())
}
