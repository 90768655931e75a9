//! Script generation error types.

use thiserror::Error;

use crate::core::llm::ChatError;

/// Errors raised while planning a script.
///
/// The planner does not retry: the first unrecoverable condition propagates
/// to the caller, and retrying (if desired) is an orchestration concern.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// No usable text-generation credential. Raised before any provider
    /// call is attempted.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Transport or HTTP failure from the text-generation gateway.
    #[error("text-generation provider error: {0}")]
    Provider(#[from] ChatError),

    /// The parsed script violates a data-model invariant. Never silently
    /// repaired.
    #[error("script validation failed: {0}")]
    Validation(String),

    /// Trimming to the target duration removed every segment.
    #[error(
        "timing fit removed all segments: estimated {estimated_seconds:.1}s could not be \
         trimmed to fit {target_seconds}s"
    )]
    EmptyResult {
        target_seconds: u32,
        estimated_seconds: f64,
    },
}

pub type GenerationResult<T> = Result<T, GenerationError>;
