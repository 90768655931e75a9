pub mod config;
pub mod core;
pub mod document;
pub mod pipeline;

// Re-export commonly used items for convenience
pub use config::Settings;
pub use core::llm::{create_chat_provider, ChatProvider};
pub use core::script::{
    GenerationError, Host, PodcastMode, Script, ScriptMetadata, ScriptPlanner, ScriptRequest,
    Segment,
};
pub use core::tts::{create_speech_engine, SpeechEngine};
