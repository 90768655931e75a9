//! Base trait and types for speech-synthesis engines.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::script::Script;

/// Request timeout applied to every synthesis call.
pub const SYNTHESIS_TIMEOUT: Duration = Duration::from_secs(120);

/// Silence inserted between segments when the speaker changes.
pub const SPEAKER_PAUSE_MS: u32 = 500;

// =============================================================================
// Error Types
// =============================================================================

/// Errors from a speech-synthesis engine.
#[derive(Debug, Error)]
pub enum SpeechError {
    /// Invalid configuration (e.g., missing API key)
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Transport-level failure
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Non-2xx response from the provider
    #[error("provider returned HTTP {status}: {body}")]
    Provider { status: u16, body: String },

    /// Audio payload could not be decoded or assembled
    #[error("audio error: {0}")]
    Audio(String),

    /// Filesystem failure while writing the artifact
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Segment speaker without a bound voice
    #[error("no voice bound for speaker: {0}")]
    UnknownSpeaker(String),
}

pub type SpeechResult<T> = Result<T, SpeechError>;

// =============================================================================
// Voice Descriptors
// =============================================================================

/// One synthesis voice advertised by a provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoiceInfo {
    pub name: String,
    pub language_codes: Vec<String>,
    pub gender: String,
    pub natural_sample_rate_hertz: u32,
}

// =============================================================================
// Engine Trait
// =============================================================================

/// Capability interface for speech-synthesis backends.
///
/// `synthesize` renders every segment with the voice bound to its speaker,
/// concatenates in segment order with a short pause at speaker changes, and
/// writes a single audio artifact. The returned path is authoritative: an
/// engine may rewrite the extension to match the container it produces.
#[async_trait]
pub trait SpeechEngine: Send + Sync {
    /// Engine name (e.g., "google")
    fn name(&self) -> &'static str;

    /// Render the script into one audio file and return its final path.
    async fn synthesize(&self, script: &Script, output_path: &Path) -> SpeechResult<PathBuf>;

    /// List voices available from this engine.
    async fn list_voices(&self) -> SpeechResult<Vec<VoiceInfo>>;
}
