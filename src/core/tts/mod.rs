//! Speech-synthesis gateway: engine trait, backends, and factory.

pub mod audio;
mod base;
pub mod google;
pub mod mock;

pub use base::{
    SpeechEngine, SpeechError, SpeechResult, VoiceInfo, SPEAKER_PAUSE_MS, SYNTHESIS_TIMEOUT,
};
pub use google::{GoogleSpeech, GOOGLE_TTS_BASE_URL};
pub use mock::MockSpeech;

use crate::config::Settings;

/// Resolve a speech engine from configured credentials.
///
/// Without a TTS credential the mock engine is used, which produces a silent
/// artifact; this keeps credential-less runs and tests working end to end.
pub fn create_speech_engine(settings: &Settings) -> SpeechResult<Box<dyn SpeechEngine>> {
    match settings.google_tts_api_key.as_deref() {
        Some(key) => {
            let engine = GoogleSpeech::new(key)?;
            tracing::info!(engine = engine.name(), "using speech engine");
            Ok(Box::new(engine))
        }
        None => {
            tracing::warn!("no Google TTS key configured, using mock speech engine");
            Ok(Box::new(MockSpeech::new()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> Settings {
        Settings {
            openrouter_api_key: None,
            openrouter_base_url: crate::core::llm::OPENROUTER_BASE_URL.to_string(),
            openai_api_key: None,
            google_tts_api_key: None,
            max_tokens: 4096,
            output_dir: "./output".into(),
        }
    }

    #[test]
    fn test_no_credential_selects_mock() {
        let engine = create_speech_engine(&settings()).unwrap();
        assert_eq!(engine.name(), "mock");
    }

    #[test]
    fn test_google_credential_selects_google() {
        let mut s = settings();
        s.google_tts_api_key = Some("test_key".to_string());
        let engine = create_speech_engine(&s).unwrap();
        assert_eq!(engine.name(), "google");
    }
}
