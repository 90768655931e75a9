//! Mock speech engine.
//!
//! Produces silence sized to the script's estimated duration, preserving the
//! synthesize contract (parent directory creation, `.wav` normalization,
//! final-path return) without network access. Selected automatically when no
//! TTS credential is configured, and used throughout the test suite.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::audio::write_mono_wav;
use super::base::{SpeechEngine, SpeechResult, VoiceInfo};
use crate::core::script::Script;

const SAMPLE_RATE_HZ: u32 = 24_000;

#[derive(Debug, Default)]
pub struct MockSpeech;

impl MockSpeech {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SpeechEngine for MockSpeech {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn synthesize(&self, script: &Script, output_path: &Path) -> SpeechResult<PathBuf> {
        let output_path = match output_path.extension().and_then(|e| e.to_str()) {
            Some("wav") => output_path.to_path_buf(),
            _ => output_path.with_extension("wav"),
        };
        if let Some(parent) = output_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let seconds = script.estimated_duration_seconds();
        let len = (seconds * f64::from(SAMPLE_RATE_HZ)) as usize;
        let samples = vec![0i16; len];
        write_mono_wav(&output_path, &samples, SAMPLE_RATE_HZ)?;

        tracing::info!(
            path = %output_path.display(),
            seconds = format_args!("{seconds:.1}"),
            "mock synthesis complete"
        );
        Ok(output_path)
    }

    async fn list_voices(&self) -> SpeechResult<Vec<VoiceInfo>> {
        Ok(vec![
            VoiceInfo {
                name: "en-US-Standard-A".to_string(),
                language_codes: vec!["en-US".to_string()],
                gender: "FEMALE".to_string(),
                natural_sample_rate_hertz: SAMPLE_RATE_HZ,
            },
            VoiceInfo {
                name: "en-US-Standard-B".to_string(),
                language_codes: vec!["en-US".to_string()],
                gender: "MALE".to_string(),
                natural_sample_rate_hertz: SAMPLE_RATE_HZ,
            },
            VoiceInfo {
                name: "en-US-Standard-C".to_string(),
                language_codes: vec!["en-US".to_string()],
                gender: "FEMALE".to_string(),
                natural_sample_rate_hertz: SAMPLE_RATE_HZ,
            },
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::script::{Host, PodcastMode, Script, ScriptMetadata, Segment};

    fn script() -> Script {
        let meta = ScriptMetadata::new("Mock", 60, PodcastMode::Solo, None);
        Script::new(
            meta,
            vec![Host::new("Alex", "Narrator", "en-US-Standard-A")],
            // 150 words = 60 seconds of estimated audio
            vec![Segment::new("Alex", vec!["word"; 150].join(" "))],
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_synthesize_writes_wav_of_estimated_length() {
        let dir = tempfile::tempdir().unwrap();
        let requested = dir.path().join("episode.mp3");
        let engine = MockSpeech::new();
        let written = engine.synthesize(&script(), &requested).await.unwrap();

        assert_eq!(written.extension().unwrap(), "wav");
        let reader = hound::WavReader::open(&written).unwrap();
        let expected_samples = 60 * SAMPLE_RATE_HZ;
        assert_eq!(reader.len(), expected_samples);
    }

    #[tokio::test]
    async fn test_synthesize_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let requested = dir.path().join("a").join("b").join("episode.wav");
        let written = MockSpeech::new().synthesize(&script(), &requested).await.unwrap();
        assert!(written.exists());
    }

    #[tokio::test]
    async fn test_list_voices() {
        let voices = MockSpeech::new().list_voices().await.unwrap();
        assert_eq!(voices.len(), 3);
        assert_eq!(voices[0].name, "en-US-Standard-A");
    }
}
