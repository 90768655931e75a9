//! OpenRouter chat provider.
//!
//! OpenRouter fronts many upstream models behind an OpenAI-compatible API,
//! so the wire handling is shared with the OpenAI provider; only the
//! endpoint, attribution headers, and default model differ.
//!
//! # API Reference
//!
//! - Endpoint: `POST https://openrouter.ai/api/v1/chat/completions`
//! - Auth: `Authorization: Bearer <key>`

use async_trait::async_trait;
use parking_lot::Mutex;

use super::base::{
    ChatCompletionRequest, ChatCompletionResponse, ChatError, ChatProvider, ChatRequest,
    ChatResponse, ChatResult, CHAT_TIMEOUT,
};
use super::pricing::estimate_chat_cost;

/// OpenRouter API base URL
pub const OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";

const DEFAULT_MODEL: &str = "openai/gpt-4o-mini";

/// Chat provider backed by the OpenRouter API.
pub struct OpenRouterChat {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    total_cost: Mutex<f64>,
}

impl OpenRouterChat {
    /// Create a provider. `base_url` falls back to [`OPENROUTER_BASE_URL`]
    /// when `None`.
    pub fn new(api_key: impl Into<String>, base_url: Option<String>) -> ChatResult<Self> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(ChatError::InvalidConfiguration(
                "OpenRouter API key is required".to_string(),
            ));
        }
        let base_url = base_url.unwrap_or_else(|| OPENROUTER_BASE_URL.to_string());
        let client = reqwest::Client::builder().timeout(CHAT_TIMEOUT).build()?;
        Ok(Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            total_cost: Mutex::new(0.0),
        })
    }
}

#[async_trait]
impl ChatProvider for OpenRouterChat {
    fn name(&self) -> &'static str {
        "openrouter"
    }

    fn default_model(&self) -> &str {
        DEFAULT_MODEL
    }

    async fn chat(&self, request: ChatRequest) -> ChatResult<ChatResponse> {
        let payload = ChatCompletionRequest {
            model: &request.model,
            messages: &request.messages,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("X-Title", "podforge")
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ChatError::Provider {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| ChatError::MalformedResponse(e.to_string()))?;
        let (text, usage) = parsed.into_text_and_usage()?;

        let cost_usd = estimate_chat_cost(&request.model, &usage);
        *self.total_cost.lock() += cost_usd;

        tracing::debug!(
            model = %request.model,
            total_tokens = usage.total_tokens,
            cost_usd,
            "openrouter chat completion finished"
        );

        Ok(ChatResponse {
            text,
            usage,
            cost_usd,
        })
    }

    fn total_cost(&self) -> f64 {
        *self.total_cost.lock()
    }
}
