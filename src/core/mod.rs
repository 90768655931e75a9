pub mod llm;
pub mod script;
pub mod tts;
