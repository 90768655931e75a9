//! Episode pipeline: document → script → persisted YAML → audio artifact.
//!
//! One job is one strictly sequential pipeline; concurrency only exists
//! across independent jobs, which share no mutable state. Any step failing
//! aborts the job: a script file written before a failed synthesis is
//! reported as a failure, never as a partial success.

use std::path::PathBuf;

use thiserror::Error;
use uuid::Uuid;

use crate::config::Settings;
use crate::core::llm::{create_chat_provider, ChatError};
use crate::core::script::formatter::{self, FormatterError};
use crate::core::script::{GenerationError, PodcastMode, Script, ScriptPlanner, ScriptRequest};
use crate::core::tts::{create_speech_engine, SpeechError, VoiceInfo};
use crate::document::{load_document, DocumentError};

/// File name of the persisted script inside the job output directory.
pub const SCRIPT_FILE_NAME: &str = "script.podcast.yaml";
/// Requested file name of the audio artifact; the engine may rewrite the
/// extension and its returned path is authoritative.
pub const AUDIO_FILE_NAME: &str = "episode.wav";

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error(transparent)]
    Formatter(#[from] FormatterError),

    #[error(transparent)]
    Speech(#[from] SpeechError),
}

/// Inputs for one episode job.
#[derive(Debug, Clone)]
pub struct EpisodeRequest {
    pub input: PathBuf,
    pub mode: PodcastMode,
    pub target_duration_seconds: u32,
    pub title: Option<String>,
    pub output_dir: PathBuf,
}

/// Results of a completed episode job.
#[derive(Debug)]
pub struct EpisodeOutput {
    pub job_id: Uuid,
    pub script: Script,
    pub script_path: PathBuf,
    pub audio_path: PathBuf,
    /// Estimated LLM spend for this job in USD.
    pub llm_cost_usd: f64,
}

/// Run one episode job end to end.
pub async fn run_episode(
    settings: &Settings,
    request: EpisodeRequest,
) -> Result<EpisodeOutput, PipelineError> {
    let job_id = Uuid::new_v4();
    tracing::info!(
        %job_id,
        input = %request.input.display(),
        mode = request.mode.as_str(),
        target_seconds = request.target_duration_seconds,
        "starting episode job"
    );

    let content = load_document(&request.input)?;

    // A missing credential is a configuration error surfaced before any
    // generation call, not a provider error.
    let chat = create_chat_provider(settings).map_err(configuration_error)?;
    let planner = ScriptPlanner::new(chat.clone(), settings.max_tokens);

    let script = planner
        .generate_script(ScriptRequest {
            content,
            mode: request.mode,
            target_duration_seconds: request.target_duration_seconds,
            title: request.title.clone(),
            source_document: Some(request.input.display().to_string()),
            custom_hosts: None,
        })
        .await?;

    let script_path = request.output_dir.join(SCRIPT_FILE_NAME);
    formatter::save_to_file(&script, &script_path)?;

    let engine = create_speech_engine(settings)?;
    let audio_path = engine
        .synthesize(&script, &request.output_dir.join(AUDIO_FILE_NAME))
        .await?;

    let llm_cost_usd = chat.total_cost();
    tracing::info!(
        %job_id,
        script = %script_path.display(),
        audio = %audio_path.display(),
        cost_usd = llm_cost_usd,
        "episode job complete"
    );

    Ok(EpisodeOutput {
        job_id,
        script,
        script_path,
        audio_path,
        llm_cost_usd,
    })
}

/// List voices from the configured speech engine.
pub async fn list_voices(settings: &Settings) -> Result<Vec<VoiceInfo>, PipelineError> {
    let engine = create_speech_engine(settings)?;
    Ok(engine.list_voices().await?)
}

fn configuration_error(err: ChatError) -> GenerationError {
    match err {
        ChatError::InvalidConfiguration(msg) => GenerationError::Configuration(msg),
        other => GenerationError::Provider(other),
    }
}
