//! Google Cloud Text-to-Speech engine.
//!
//! # API Reference
//!
//! - Synthesis: `POST https://texttospeech.googleapis.com/v1/text:synthesize`
//! - Voices: `GET https://texttospeech.googleapis.com/v1/voices`
//! - Auth: API key query parameter
//! - Output: LINEAR16 (WAV) at 24kHz, assembled into one mono artifact

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

use super::audio::{decode_wav_samples, silence, write_mono_wav};
use super::base::{SpeechEngine, SpeechError, SpeechResult, VoiceInfo, SPEAKER_PAUSE_MS, SYNTHESIS_TIMEOUT};
use crate::core::script::Script;

/// Google Cloud TTS API base URL
pub const GOOGLE_TTS_BASE_URL: &str = "https://texttospeech.googleapis.com/v1";

/// Sample rate requested from the provider and used for the artifact.
const SAMPLE_RATE_HZ: u32 = 24_000;

const DEFAULT_LANGUAGE: &str = "en-US";
const DEFAULT_VOICE: &str = "en-US-Standard-A";

// =============================================================================
// Wire Format
// =============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeRequest<'a> {
    input: SynthesisInput<'a>,
    voice: VoiceSelection<'a>,
    audio_config: AudioConfig,
}

#[derive(Debug, Serialize)]
struct SynthesisInput<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VoiceSelection<'a> {
    language_code: &'a str,
    name: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AudioConfig {
    audio_encoding: &'static str,
    sample_rate_hertz: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeResponse {
    audio_content: String,
}

#[derive(Debug, Deserialize)]
struct VoicesResponse {
    #[serde(default)]
    voices: Vec<GoogleVoice>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GoogleVoice {
    name: String,
    #[serde(default)]
    language_codes: Vec<String>,
    #[serde(default)]
    ssml_gender: String,
    #[serde(default)]
    natural_sample_rate_hertz: u32,
}

/// Split a voice id like `en-US-Standard-A` into a language code and a voice
/// name, falling back to defaults for ids that do not follow the scheme.
fn parse_voice_id(voice_id: &str) -> (String, String) {
    let parts: Vec<&str> = voice_id.split('-').collect();
    if parts.len() >= 3 {
        (format!("{}-{}", parts[0], parts[1]), voice_id.to_string())
    } else {
        (DEFAULT_LANGUAGE.to_string(), DEFAULT_VOICE.to_string())
    }
}

// =============================================================================
// Engine
// =============================================================================

/// Speech engine backed by the Google Cloud Text-to-Speech REST API.
pub struct GoogleSpeech {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl GoogleSpeech {
    pub fn new(api_key: impl Into<String>) -> SpeechResult<Self> {
        Self::with_base_url(api_key, GOOGLE_TTS_BASE_URL)
    }

    /// Create an engine against a custom endpoint (tests, proxies).
    pub fn with_base_url(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> SpeechResult<Self> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(SpeechError::InvalidConfiguration(
                "Google TTS API key is required".to_string(),
            ));
        }
        let client = reqwest::Client::builder()
            .timeout(SYNTHESIS_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Render one segment and return its decoded 16-bit mono samples.
    async fn synthesize_segment(&self, text: &str, voice_id: &str) -> SpeechResult<Vec<i16>> {
        let (language_code, voice_name) = parse_voice_id(voice_id);
        let payload = SynthesizeRequest {
            input: SynthesisInput { text },
            voice: VoiceSelection {
                language_code: &language_code,
                name: &voice_name,
            },
            audio_config: AudioConfig {
                audio_encoding: "LINEAR16",
                sample_rate_hertz: SAMPLE_RATE_HZ,
            },
        };

        let response = self
            .client
            .post(format!("{}/text:synthesize", self.base_url))
            .query(&[("key", self.api_key.as_str())])
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SpeechError::Provider {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: SynthesizeResponse = response
            .json()
            .await
            .map_err(|e| SpeechError::Audio(format!("malformed synthesis response: {e}")))?;
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(parsed.audio_content)
            .map_err(|e| SpeechError::Audio(format!("audio payload is not valid base64: {e}")))?;

        let (samples, _rate) = decode_wav_samples(&bytes)?;
        Ok(samples)
    }
}

#[async_trait]
impl SpeechEngine for GoogleSpeech {
    fn name(&self) -> &'static str {
        "google"
    }

    async fn synthesize(&self, script: &Script, output_path: &Path) -> SpeechResult<PathBuf> {
        let output_path = normalize_wav_path(output_path);
        if let Some(parent) = output_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        tracing::info!(
            segments = script.segments().len(),
            path = %output_path.display(),
            "synthesizing script"
        );

        // Segments render sequentially; concatenation is positional so the
        // artifact always follows segment sequence order.
        let mut samples: Vec<i16> = Vec::new();
        let mut previous_speaker: Option<&str> = None;

        for (i, segment) in script.segments().iter().enumerate() {
            let host = script
                .host_by_name(&segment.speaker)
                .ok_or_else(|| SpeechError::UnknownSpeaker(segment.speaker.clone()))?;

            tracing::debug!(
                segment = i + 1,
                total = script.segments().len(),
                speaker = %segment.speaker,
                "synthesizing segment"
            );

            if previous_speaker.is_some_and(|p| p != segment.speaker) {
                samples.extend(silence(SPEAKER_PAUSE_MS, SAMPLE_RATE_HZ));
            }
            let segment_samples = self
                .synthesize_segment(&segment.text, &host.voice_id)
                .await?;
            samples.extend(segment_samples);
            previous_speaker = Some(&segment.speaker);
        }

        write_mono_wav(&output_path, &samples, SAMPLE_RATE_HZ)?;
        tracing::info!(path = %output_path.display(), "synthesis complete");
        Ok(output_path)
    }

    async fn list_voices(&self) -> SpeechResult<Vec<VoiceInfo>> {
        let response = self
            .client
            .get(format!("{}/voices", self.base_url))
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SpeechError::Provider {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: VoicesResponse = response
            .json()
            .await
            .map_err(|e| SpeechError::Audio(format!("malformed voices response: {e}")))?;

        Ok(parsed
            .voices
            .into_iter()
            .map(|v| VoiceInfo {
                name: v.name,
                language_codes: v.language_codes,
                gender: v.ssml_gender,
                natural_sample_rate_hertz: v.natural_sample_rate_hertz,
            })
            .collect())
    }
}

/// Rewrite the artifact path to `.wav`; this engine always emits WAV.
fn normalize_wav_path(path: &Path) -> PathBuf {
    match path.extension().and_then(|e| e.to_str()) {
        Some("wav") => path.to_path_buf(),
        _ => path.with_extension("wav"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requires_api_key() {
        let result = GoogleSpeech::new("");
        assert!(matches!(result, Err(SpeechError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_parse_voice_id() {
        let (lang, name) = parse_voice_id("en-US-Standard-B");
        assert_eq!(lang, "en-US");
        assert_eq!(name, "en-US-Standard-B");

        let (lang, name) = parse_voice_id("weird");
        assert_eq!(lang, DEFAULT_LANGUAGE);
        assert_eq!(name, DEFAULT_VOICE);
    }

    #[test]
    fn test_normalize_wav_path() {
        assert_eq!(
            normalize_wav_path(Path::new("out/episode.mp3")),
            PathBuf::from("out/episode.wav")
        );
        assert_eq!(
            normalize_wav_path(Path::new("out/episode.wav")),
            PathBuf::from("out/episode.wav")
        );
        assert_eq!(
            normalize_wav_path(Path::new("out/episode")),
            PathBuf::from("out/episode.wav")
        );
    }

    #[test]
    fn test_synthesize_request_wire_shape() {
        let payload = SynthesizeRequest {
            input: SynthesisInput { text: "Hello" },
            voice: VoiceSelection {
                language_code: "en-US",
                name: "en-US-Standard-A",
            },
            audio_config: AudioConfig {
                audio_encoding: "LINEAR16",
                sample_rate_hertz: SAMPLE_RATE_HZ,
            },
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["input"]["text"], "Hello");
        assert_eq!(json["voice"]["languageCode"], "en-US");
        assert_eq!(json["audioConfig"]["audioEncoding"], "LINEAR16");
        assert_eq!(json["audioConfig"]["sampleRateHertz"], 24000);
    }
}
