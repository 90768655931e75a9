//! Script engine: data model, persona registry, planner, and formatter.

mod error;
pub mod formatter;
mod model;
pub mod persona;
mod planner;

pub use error::{GenerationError, GenerationResult};
pub use model::{Host, PodcastMode, Script, ScriptMetadata, Segment, WORDS_PER_MINUTE};
pub use persona::personas_for;
pub use planner::{
    fit_to_target, target_word_count, ScriptPlanner, ScriptRequest, MAX_TARGET_SECONDS,
    MIN_TARGET_SECONDS,
};
