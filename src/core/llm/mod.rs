//! Text-generation gateway: provider trait, backends, and factory.

mod base;
pub mod openai;
pub mod openrouter;
pub mod pricing;

pub use base::{
    BoxedChat, ChatError, ChatMessage, ChatProvider, ChatRequest, ChatResponse, ChatResult,
    ChatRole, ChatUsage, CHAT_TIMEOUT,
};
pub use openai::{OpenAiChat, OPENAI_BASE_URL};
pub use openrouter::{OpenRouterChat, OPENROUTER_BASE_URL};
pub use pricing::{estimate_chat_cost, get_chat_pricing, ModelPricing};

use std::sync::Arc;

use crate::config::Settings;

/// Resolve a chat provider from configured credentials.
///
/// OpenRouter wins when both credentials are present; with neither, this is
/// a configuration error raised before any generation attempt.
pub fn create_chat_provider(settings: &Settings) -> ChatResult<BoxedChat> {
    if let Some(key) = settings.openrouter_api_key.as_deref() {
        let provider = OpenRouterChat::new(key, Some(settings.openrouter_base_url.clone()))?;
        tracing::info!(provider = provider.name(), "using text-generation provider");
        return Ok(Arc::new(provider));
    }
    if let Some(key) = settings.openai_api_key.as_deref() {
        let provider = OpenAiChat::new(key)?;
        tracing::info!(provider = provider.name(), "using text-generation provider");
        return Ok(Arc::new(provider));
    }
    Err(ChatError::InvalidConfiguration(
        "no text-generation credential configured; set OPENROUTER_API_KEY or OPENAI_API_KEY"
            .to_string(),
    ))
}
