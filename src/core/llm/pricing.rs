//! Token pricing for supported chat models.
//!
//! Single source of truth for per-token pricing so provider code never
//! hardcodes rates. Prices are USD per 1K tokens, taken from the providers'
//! public pricing pages. Unknown models price at zero: cost tracking is
//! best-effort accounting and must never fail a generation.

use std::collections::HashMap;
use std::sync::LazyLock;

use super::base::ChatUsage;

/// Per-1K-token pricing for one model.
#[derive(Debug, Clone, Copy)]
pub struct ModelPricing {
    /// USD per 1K prompt tokens
    pub input_per_1k: f64,
    /// USD per 1K completion tokens
    pub output_per_1k: f64,
}

impl ModelPricing {
    pub const fn new(input_per_1k: f64, output_per_1k: f64) -> Self {
        Self {
            input_per_1k,
            output_per_1k,
        }
    }
}

/// Chat model pricing database, keyed by model id as sent on the wire.
static CHAT_PRICING: LazyLock<HashMap<&'static str, ModelPricing>> = LazyLock::new(|| {
    let mut m = HashMap::new();

    // OpenAI direct
    m.insert("gpt-4o-mini", ModelPricing::new(0.00015, 0.0006));
    m.insert("gpt-4o", ModelPricing::new(0.005, 0.015));

    // OpenRouter model ids
    m.insert("openai/gpt-4o-mini", ModelPricing::new(0.00015, 0.0006));
    m.insert("openai/gpt-4o", ModelPricing::new(0.005, 0.015));
    m.insert("deepseek/deepseek-coder", ModelPricing::new(0.00014, 0.00028));

    m
});

/// Look up pricing for a model id.
pub fn get_chat_pricing(model: &str) -> Option<ModelPricing> {
    CHAT_PRICING.get(model).copied()
}

/// Estimate the USD cost of one call from its usage block.
/// Returns 0.0 for models without a pricing entry.
pub fn estimate_chat_cost(model: &str, usage: &ChatUsage) -> f64 {
    match get_chat_pricing(model) {
        Some(pricing) => {
            let input = usage.prompt_tokens as f64 / 1000.0 * pricing.input_per_1k;
            let output = usage.completion_tokens as f64 / 1000.0 * pricing.output_per_1k;
            input + output
        }
        None => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_model_cost() {
        let usage = ChatUsage {
            prompt_tokens: 1000,
            completion_tokens: 1000,
            total_tokens: 2000,
        };
        let cost = estimate_chat_cost("gpt-4o-mini", &usage);
        assert!((cost - 0.00075).abs() < 1e-12);
    }

    #[test]
    fn test_unknown_model_costs_zero() {
        let usage = ChatUsage {
            prompt_tokens: 5000,
            completion_tokens: 5000,
            total_tokens: 10000,
        };
        assert_eq!(estimate_chat_cost("some/unknown-model", &usage), 0.0);
    }

    #[test]
    fn test_openrouter_alias_matches_direct_pricing() {
        let usage = ChatUsage {
            prompt_tokens: 2000,
            completion_tokens: 500,
            total_tokens: 2500,
        };
        let direct = estimate_chat_cost("gpt-4o-mini", &usage);
        let routed = estimate_chat_cost("openai/gpt-4o-mini", &usage);
        assert_eq!(direct, routed);
    }
}
