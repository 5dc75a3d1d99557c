use crate::model::Scene;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Arc;

/// Text-to-speech backend. The trait seam keeps the synthesizer's
/// per-scene bookkeeping testable without a speech binary installed.
pub trait SpeechEngine: Send + Sync {
    fn synthesize(&self, text: &str, voice: &str, language: &str, out: &Path) -> Result<()>;
}

/// Speech synthesis via an espeak-ng style command
pub struct EspeakEngine {
    command: String,
}

impl EspeakEngine {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    /// espeak voice selector: language code plus an optional variant.
    /// "male"/"female" map to the stock m3/f3 variants; anything else is
    /// passed through as a raw variant suffix.
    fn voice_arg(voice: &str, language: &str) -> String {
        match voice.to_lowercase().as_str() {
            "male" => format!("{}+m3", language),
            "female" => format!("{}+f3", language),
            "" => language.to_string(),
            other => format!("{}+{}", language, other),
        }
    }
}

impl SpeechEngine for EspeakEngine {
    fn synthesize(&self, text: &str, voice: &str, language: &str, out: &Path) -> Result<()> {
        let output = Command::new(&self.command)
            .arg("-v")
            .arg(Self::voice_arg(voice, language))
            .arg("-w")
            .arg(out)
            .arg(text)
            .output()
            .with_context(|| format!("Failed to run speech command '{}'", self.command))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!("Speech synthesis failed: {}", stderr.trim());
        }
        Ok(())
    }
}

/// Produces one narration asset per scene. A failure on one scene never
/// stops the batch; the failed slot is recorded as `None` and assembly
/// skips it later.
pub struct NarrationSynthesizer {
    audio_dir: PathBuf,
    engine: Arc<dyn SpeechEngine>,
}

impl NarrationSynthesizer {
    pub fn new(audio_dir: PathBuf, engine: Arc<dyn SpeechEngine>) -> Self {
        Self { audio_dir, engine }
    }

    /// Audio location is a pure function of the scene id
    pub fn audio_path(&self, scene_id: usize) -> PathBuf {
        self.audio_dir.join(format!("scene_{}.wav", scene_id))
    }

    /// One synthesis attempt per scene, in scene order, no retries.
    /// Returns a collection aligned with the scene list.
    pub fn synthesize_all(
        &self,
        scenes: &[Scene],
        voice: &str,
        language: &str,
    ) -> Vec<Option<PathBuf>> {
        scenes
            .iter()
            .map(|scene| {
                let path = self.audio_path(scene.scene_id);
                match self.engine.synthesize(&scene.text, voice, language, &path) {
                    Ok(()) => Some(path),
                    Err(e) => {
                        eprintln!(
                            "Error generating narration for scene {}: {:#}",
                            scene.scene_id, e
                        );
                        None
                    }
                }
            })
            .collect()
    }
}
