//! Application configuration.
//!
//! Settings come from environment variables (with `.env` loaded by the
//! binary before this runs). Credentials are optional here; the factories
//! that need them fail fast with a configuration error when nothing usable
//! is present.

use std::env;
use std::path::PathBuf;

use thiserror::Error;

use crate::core::llm::OPENROUTER_BASE_URL;

const DEFAULT_MAX_TOKENS: u32 = 4096;
const DEFAULT_OUTPUT_DIR: &str = "./output";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value}")]
    InvalidValue { var: String, value: String },
}

/// Runtime settings.
#[derive(Debug, Clone)]
pub struct Settings {
    /// OpenRouter credential. Takes precedence over OpenAI when both are set.
    pub openrouter_api_key: Option<String>,
    pub openrouter_base_url: String,
    /// OpenAI credential.
    pub openai_api_key: Option<String>,
    /// Google Cloud TTS API key. Absent means the mock engine.
    pub google_tts_api_key: Option<String>,
    /// Cap on completion tokens per generation call.
    pub max_tokens: u32,
    /// Root directory for job outputs.
    pub output_dir: PathBuf,
}

/// Read an env var, treating empty values as unset.
fn env_opt(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

impl Settings {
    /// Load settings from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let max_tokens = match env_opt("PODFORGE_MAX_TOKENS") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue {
                var: "PODFORGE_MAX_TOKENS".to_string(),
                value: raw,
            })?,
            None => DEFAULT_MAX_TOKENS,
        };

        Ok(Self {
            openrouter_api_key: env_opt("OPENROUTER_API_KEY"),
            openrouter_base_url: env_opt("OPENROUTER_BASE_URL")
                .unwrap_or_else(|| OPENROUTER_BASE_URL.to_string()),
            openai_api_key: env_opt("OPENAI_API_KEY"),
            google_tts_api_key: env_opt("GOOGLE_TTS_API_KEY"),
            max_tokens,
            output_dir: env_opt("PODFORGE_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR)),
        })
    }

    /// Whether any text-generation credential is present.
    pub fn has_llm_config(&self) -> bool {
        self.openrouter_api_key.is_some() || self.openai_api_key.is_some()
    }

    /// Whether a speech-synthesis credential is present.
    pub fn has_tts_config(&self) -> bool {
        self.google_tts_api_key.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Settings {
        Settings {
            openrouter_api_key: None,
            openrouter_base_url: OPENROUTER_BASE_URL.to_string(),
            openai_api_key: None,
            google_tts_api_key: None,
            max_tokens: DEFAULT_MAX_TOKENS,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }

    #[test]
    fn test_has_llm_config() {
        let mut s = base();
        assert!(!s.has_llm_config());
        s.openai_api_key = Some("key".to_string());
        assert!(s.has_llm_config());
        s.openai_api_key = None;
        s.openrouter_api_key = Some("key".to_string());
        assert!(s.has_llm_config());
    }

    #[test]
    fn test_has_tts_config() {
        let mut s = base();
        assert!(!s.has_tts_config());
        s.google_tts_api_key = Some("key".to_string());
        assert!(s.has_tts_config());
    }
}
