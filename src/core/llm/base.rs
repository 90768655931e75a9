//! Base trait and types for text-generation (chat) providers.
//!
//! Both supported backends (OpenAI and OpenRouter) speak the
//! OpenAI-compatible chat-completions dialect, so the wire DTOs live here
//! and each provider only contributes its endpoint, headers, and default
//! model. The planner is provider-agnostic and only sees [`ChatProvider`].

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Request timeout applied to every chat call.
pub const CHAT_TIMEOUT: Duration = Duration::from_secs(60);

// =============================================================================
// Error Types
// =============================================================================

/// Errors from a text-generation provider.
#[derive(Debug, Error)]
pub enum ChatError {
    /// Invalid configuration (e.g., missing API key)
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Transport-level failure (connect, TLS, timeout)
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Non-2xx response from the provider
    #[error("provider returned HTTP {status}: {body}")]
    Provider { status: u16, body: String },

    /// 2xx response whose payload does not match the expected shape
    #[error("malformed provider response: {0}")]
    MalformedResponse(String),
}

pub type ChatResult<T> = Result<T, ChatError>;

// =============================================================================
// Message & Usage Types
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

/// One role-tagged message in a chat conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }
}

/// Token accounting reported by the provider.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ChatUsage {
    #[serde(default)]
    pub prompt_tokens: u32,
    #[serde(default)]
    pub completion_tokens: u32,
    #[serde(default)]
    pub total_tokens: u32,
}

/// A single chat-completion request.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// Generated text plus usage and a cost estimate for the call.
#[derive(Debug, Clone)]
pub struct ChatResponse {
    pub text: String,
    pub usage: ChatUsage,
    pub cost_usd: f64,
}

// =============================================================================
// Wire Format (OpenAI-compatible chat completions)
// =============================================================================

#[derive(Debug, Serialize)]
pub(crate) struct ChatCompletionRequest<'a> {
    pub model: &'a str,
    pub messages: &'a [ChatMessage],
    pub max_tokens: u32,
    pub temperature: f32,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatCompletionResponse {
    pub choices: Vec<ChatCompletionChoice>,
    #[serde(default)]
    pub usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatCompletionChoice {
    pub message: ChatCompletionMessage,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatCompletionMessage {
    pub content: String,
}

impl ChatCompletionResponse {
    /// Pull the first choice's text out of the payload.
    pub fn into_text_and_usage(self) -> ChatResult<(String, ChatUsage)> {
        let usage = self.usage.unwrap_or_default();
        let choice = self
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ChatError::MalformedResponse("response has no choices".to_string()))?;
        Ok((choice.message.content, usage))
    }
}

// =============================================================================
// Provider Trait
// =============================================================================

/// Capability interface for text-generation backends.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Provider name (e.g., "openai")
    fn name(&self) -> &'static str;

    /// Model used when the caller does not pick one.
    fn default_model(&self) -> &str;

    /// Send one chat-completion request and await the generated text.
    async fn chat(&self, request: ChatRequest) -> ChatResult<ChatResponse>;

    /// Cumulative estimated cost of all calls made through this provider.
    fn total_cost(&self) -> f64;
}

/// Shared, dynamically-dispatched chat provider handle.
pub type BoxedChat = Arc<dyn ChatProvider>;
