//! OpenAI chat provider.
//!
//! # API Reference
//!
//! - Endpoint: `POST https://api.openai.com/v1/chat/completions`
//! - Auth: `Authorization: Bearer <key>`

use async_trait::async_trait;
use parking_lot::Mutex;

use super::base::{
    ChatCompletionRequest, ChatCompletionResponse, ChatError, ChatProvider, ChatRequest,
    ChatResponse, ChatResult, CHAT_TIMEOUT,
};
use super::pricing::estimate_chat_cost;

/// OpenAI API base URL
pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Chat provider backed by the OpenAI chat-completions API.
pub struct OpenAiChat {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    total_cost: Mutex<f64>,
}

impl OpenAiChat {
    /// Create a provider against the production endpoint.
    pub fn new(api_key: impl Into<String>) -> ChatResult<Self> {
        Self::with_base_url(api_key, OPENAI_BASE_URL)
    }

    /// Create a provider against a custom endpoint (proxies, tests).
    pub fn with_base_url(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> ChatResult<Self> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(ChatError::InvalidConfiguration(
                "OpenAI API key is required".to_string(),
            ));
        }
        let client = reqwest::Client::builder().timeout(CHAT_TIMEOUT).build()?;
        Ok(Self {
            client,
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            total_cost: Mutex::new(0.0),
        })
    }
}

#[async_trait]
impl ChatProvider for OpenAiChat {
    fn name(&self) -> &'static str {
        "openai"
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
            "openai chat completion finished"
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::llm::base::ChatMessage;

    #[test]
    fn test_requires_api_key() {
        let result = OpenAiChat::new("");
        assert!(matches!(result, Err(ChatError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_base_url_trailing_slash_is_stripped() {
        let provider = OpenAiChat::with_base_url("key", "http://localhost:9999/v1/").unwrap();
        assert_eq!(provider.base_url, "http://localhost:9999/v1");
    }

    #[test]
    fn test_default_model_and_name() {
        let provider = OpenAiChat::new("key").unwrap();
        assert_eq!(provider.name(), "openai");
        assert_eq!(provider.default_model(), "gpt-4o-mini");
        assert_eq!(provider.total_cost(), 0.0);
    }

    #[test]
    fn test_request_payload_shape() {
        let messages = vec![ChatMessage::user("hello")];
        let payload = ChatCompletionRequest {
            model: "gpt-4o-mini",
            messages: &messages,
            max_tokens: 256,
            temperature: 0.7,
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["model"], "gpt-4o-mini");
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["max_tokens"], 256);
    }
}
