//! Voice sample generation on top of a [`SpeechEngine`].

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{debug, error, info, warn};

use super::engine::SpeechEngine;
use crate::audio::{Audio, write_wav};
use crate::voices::{Persona, Sex, VoiceRegistry};

/// Default speaking style appended to the speaker name.
pub const DEFAULT_DESCRIPTION: &str = "delivers a slightly expressive and animated speech with a moderate speed and pitch. \
    The recording is of very high quality, with the speaker's voice sounding clear and very close up.";

/// Pick the persona for a request.
///
/// An explicit name wins over an index and is looked up among all voices;
/// `sex` only picks the fallback for unknown names. With neither, the
/// top-ranked persona for `sex` is used.
pub fn select_persona<'r>(registry: &'r VoiceRegistry, sex: Sex, name: Option<&str>, index: Option<i64>) -> &'r Persona {
    match (name, index) {
        (Some(name), _) => match registry.rank_of(name, Sex::Either) {
            Some(_) => registry.resolve(name, Sex::Either),
            None => {
                let persona = registry.default_persona(sex);
                warn!("Voice '{}' not found, using '{}'", name, persona.name());
                persona
            }
        },
        (None, Some(index)) => registry.resolve_by_index(index, sex),
        (None, None) => registry.resolve_by_index(0, sex),
    }
}

/// File name for one generated sample: `{sex}_{index}_{name}.wav`.
pub fn sample_file_name(sex: Sex, index: usize, name: &str) -> String {
    let name: String = name.chars().map(|c| if c.is_whitespace() { '_' } else { c }).collect();
    format!("{}_{}_{}.wav", sex, index, name)
}

/// Outcome of a [`Generator::generate_all`] run.
#[derive(Debug, Default)]
pub struct GenerationSummary {
    pub written: Vec<PathBuf>,
    pub failed: Vec<String>,
    pub interrupted: bool,
}

/// Generates speech for registry personas.
pub struct Generator<E> {
    engine: E,        // Speech engine
    template: String, // Description appended to "{name}'s voice"
}

impl<E: SpeechEngine> Generator<E> {
    pub fn new(engine: E, template: Option<String>) -> Self {
        Self { engine, template: template.unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()) }
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// Synthesize `text` in the voice of `persona`.
    ///
    /// # Errors
    /// Returns an error if the engine fails.
    pub async fn speak(&self, persona: &Persona, text: &str) -> Result<Audio> {
        let description = persona.description(&self.template);

        info!("Generating speech with voice: {}", persona.name());
        debug!("Text: {}", text);
        debug!("Description: {}", description);

        let start = Instant::now();
        let audio = self.engine.synthesize(&description, text).await.with_context(|| format!("TTS generation failed for '{}'", persona.name()))?;
        info!("Generation time: {:.2} seconds ({:.2}s of audio)", start.elapsed().as_secs_f32(), audio.duration_secs());

        Ok(audio)
    }

    /// Synthesize one sample and optionally save it.
    ///
    /// # Errors
    /// Returns an error if synthesis or writing the file fails.
    pub async fn generate_one(&self, persona: &Persona, text: &str, output: Option<&Path>) -> Result<Audio> {
        let audio = self.speak(persona, text).await?;

        let Some(path) = output else {
            return Ok(audio);
        };

        let target = path.to_path_buf();
        let audio = tokio::task::spawn_blocking(move || write_wav(&target, &audio).map(|_| audio))
            .await
            .context("WAV writer task failed")?
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!("Audio saved to: {}", path.display());

        Ok(audio)
    }

    /// Synthesize `text` once per persona of `sex`, in rank order.
    ///
    /// Voices that fail are logged and skipped. Stops before the next voice
    /// once `shutdown` is set.
    ///
    /// # Errors
    /// Returns an error if the output directory cannot be created.
    pub async fn generate_all(&self, registry: &VoiceRegistry, sex: Sex, text: &str, output_dir: &Path, shutdown: &AtomicBool) -> Result<GenerationSummary> {
        tokio::fs::create_dir_all(output_dir).await.with_context(|| format!("Failed to create {}", output_dir.display()))?;

        let mut summary = GenerationSummary::default();
        let total = registry.names_of(sex).len();

        for (i, persona) in registry.ranked(sex).enumerate() {
            if shutdown.load(Ordering::Relaxed) {
                info!("🛑 Stopping after {}/{} voices", i, total);
                summary.interrupted = true;
                break;
            }

            info!("Generating speech with {} voice [{}/{}]: {}", sex, i, total, persona.name());
            let path = output_dir.join(sample_file_name(sex, i, persona.name()));

            match self.generate_one(persona, text, Some(&path)).await {
                Ok(_) => summary.written.push(path),
                Err(e) => {
                    error!("❌ {:#}", e);
                    summary.failed.push(persona.name().to_string());
                }
            }
        }

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::tts::SynthesisError;

    /// Records every description and fails for names listed in `fail_for`.
    #[derive(Default)]
    struct FakeEngine {
        calls: Mutex<Vec<String>>,
        fail_for: Vec<&'static str>,
        stop_after: Option<(usize, &'static AtomicBool)>,
    }

    #[async_trait]
    impl SpeechEngine for FakeEngine {
        async fn synthesize(&self, description: &str, _text: &str) -> Result<Audio, SynthesisError> {
            let count = {
                let mut calls = self.calls.lock().unwrap();
                calls.push(description.to_string());
                calls.len()
            };
            if let Some((n, flag)) = self.stop_after
                && count >= n
            {
                flag.store(true, Ordering::SeqCst);
            }
            if self.fail_for.iter().any(|name| description.starts_with(&format!("{name}'s"))) {
                return Err(SynthesisError::Service { status: 500, body: "boom".to_string() });
            }
            Ok(Audio::new(vec![0.0; 240], 24000))
        }
    }

    fn registry() -> VoiceRegistry {
        VoiceRegistry::standard().unwrap()
    }

    #[test]
    fn test_sample_file_name() {
        assert_eq!(sample_file_name(Sex::Female, 3, "Jenna"), "female_3_Jenna.wav");
        assert_eq!(sample_file_name(Sex::Male, 16, "A male"), "male_16_A_male.wav");
    }

    #[test]
    fn test_select_persona() {
        let registry = registry();
        assert_eq!(select_persona(&registry, Sex::Male, Some("Gary"), Some(5)).name(), "Gary");
        assert_eq!(select_persona(&registry, Sex::Female, Some("Jon"), None).name(), "Jon");
        assert_eq!(select_persona(&registry, Sex::Female, Some("Nobody"), None).name(), "A female");
        assert_eq!(select_persona(&registry, Sex::Male, Some("Nobody"), Some(2)).name(), "A male");
        assert_eq!(select_persona(&registry, Sex::Female, None, Some(1)).name(), "Jenna");
        assert_eq!(select_persona(&registry, Sex::Female, None, None).name(), "Lea");
        assert_eq!(select_persona(&registry, Sex::Male, None, Some(-3)).name(), "A male");
    }

    #[tokio::test]
    async fn test_description_contains_name_and_template() {
        let generator = Generator::new(FakeEngine::default(), Some("custom description template".to_string()));
        let registry = registry();
        let persona = registry.resolve_by_index(0, Sex::Male);

        generator.speak(persona, "Test speech").await.unwrap();

        let calls = generator.engine.calls.lock().unwrap();
        assert_eq!(calls.as_slice(), ["Jon's voice custom description template"]);
    }

    #[tokio::test]
    async fn test_default_template() {
        let generator = Generator::new(FakeEngine::default(), None);
        assert_eq!(generator.template(), DEFAULT_DESCRIPTION);
    }

    #[tokio::test]
    async fn test_generate_one_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("output.wav");
        let generator = Generator::new(FakeEngine::default(), None);
        let registry = registry();

        let audio = generator.generate_one(registry.resolve("Lea", Sex::Female), "hi", Some(&path)).await.unwrap();

        assert_eq!(audio.sample_rate, 24000);
        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_generate_one_reports_write_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("output.wav");
        let generator = Generator::new(FakeEngine::default(), None);
        let registry = registry();

        let err = generator.generate_one(registry.resolve("Lea", Sex::Female), "hi", Some(&path)).await.unwrap_err();

        assert!(format!("{err:#}").contains("Failed to write"), "{err:#}");
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_generate_all_creates_directory_and_files() {
        let dir = tempfile::tempdir().unwrap();
        let output_dir = dir.path().join("test_voices");
        let generator = Generator::new(FakeEngine { fail_for: vec!["Jenna"], ..Default::default() }, None);
        let registry = registry();
        let shutdown = AtomicBool::new(false);

        let summary = generator.generate_all(&registry, Sex::Female, "Test all voices", &output_dir, &shutdown).await.unwrap();

        let females = registry.names_of(Sex::Female);
        assert!(output_dir.is_dir());
        assert_eq!(summary.failed, vec!["Jenna".to_string()]);
        assert_eq!(summary.written.len(), females.len() - 1);
        assert!(!summary.interrupted);
        assert!(output_dir.join("female_0_Lea.wav").exists());
        assert!(!output_dir.join("female_1_Jenna.wav").exists());
        assert_eq!(generator.engine.calls.lock().unwrap().len(), females.len());
    }

    #[tokio::test]
    async fn test_generate_all_stops_on_shutdown() {
        static SHUTDOWN: AtomicBool = AtomicBool::new(false);
        let dir = tempfile::tempdir().unwrap();
        let generator = Generator::new(FakeEngine { stop_after: Some((2, &SHUTDOWN)), ..Default::default() }, None);
        let registry = registry();

        let summary = generator.generate_all(&registry, Sex::Male, "hi", dir.path(), &SHUTDOWN).await.unwrap();

        assert!(summary.interrupted);
        assert_eq!(summary.written.len(), 2);
    }
}
