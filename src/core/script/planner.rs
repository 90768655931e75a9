//! Script planning: prompt construction, dialogue parsing, and timing fit.
//!
//! The planner drives two generation calls (title, body), parses the body
//! into attributed segments, validates the result as a [`Script`], and then
//! trims it toward the caller's target duration. Generated text is not
//! perfectly well-formed, so the dialogue parser is deliberately tolerant:
//! unlabeled lines fold into the currently open segment instead of being
//! rejected. That tolerance is part of the contract, not an accident.

use std::sync::Arc;

use super::error::{GenerationError, GenerationResult};
use super::model::{Host, PodcastMode, Script, ScriptMetadata, Segment, WORDS_PER_MINUTE};
use super::persona::personas_for;
use crate::core::llm::{ChatMessage, ChatProvider, ChatRequest};

/// Allowed target duration range in seconds.
pub const MIN_TARGET_SECONDS: u32 = 30;
pub const MAX_TARGET_SECONDS: u32 = 1800;

/// Accept scripts within this fraction of the target duration.
const DURATION_TOLERANCE: f64 = 0.05;

/// How much of the source document the title prompt sees.
const TITLE_CONTEXT_CHARS: usize = 500;
const TITLE_MAX_TOKENS: u32 = 100;

// Solo narration optimizes coherence; multi-speaker dialogue optimizes
// natural variation. The gap between these two values is load-bearing.
const SOLO_TEMPERATURE: f32 = 0.7;
const MULTI_SPEAKER_TEMPERATURE: f32 = 0.8;
const TITLE_TEMPERATURE: f32 = 0.7;

/// Inputs for one script generation job.
#[derive(Debug, Clone)]
pub struct ScriptRequest {
    /// Full source document text.
    pub content: String,
    pub mode: PodcastMode,
    /// Desired spoken length in seconds, within
    /// [`MIN_TARGET_SECONDS`]..=[`MAX_TARGET_SECONDS`].
    pub target_duration_seconds: u32,
    /// Skip the title generation call when provided.
    pub title: Option<String>,
    pub source_document: Option<String>,
    /// Override the persona registry. Parsing routes by name against this
    /// list when present.
    pub custom_hosts: Option<Vec<Host>>,
}

impl ScriptRequest {
    pub fn new(content: impl Into<String>, mode: PodcastMode, target_duration_seconds: u32) -> Self {
        Self {
            content: content.into(),
            mode,
            target_duration_seconds,
            title: None,
            source_document: None,
            custom_hosts: None,
        }
    }
}

/// Plans and generates podcast scripts from input documents.
pub struct ScriptPlanner {
    chat: Arc<dyn ChatProvider>,
    max_tokens: u32,
}

impl ScriptPlanner {
    pub fn new(chat: Arc<dyn ChatProvider>, max_tokens: u32) -> Self {
        Self { chat, max_tokens }
    }

    /// Generate a complete, validated, duration-fitted script.
    pub async fn generate_script(&self, request: ScriptRequest) -> GenerationResult<Script> {
        let target = request.target_duration_seconds;
        if !(MIN_TARGET_SECONDS..=MAX_TARGET_SECONDS).contains(&target) {
            return Err(GenerationError::Validation(format!(
                "target duration {target}s outside allowed range \
                 [{MIN_TARGET_SECONDS}, {MAX_TARGET_SECONDS}]"
            )));
        }

        tracing::info!(
            mode = request.mode.as_str(),
            target_seconds = target,
            "generating script"
        );

        let hosts = request
            .custom_hosts
            .clone()
            .unwrap_or_else(|| personas_for(request.mode));
        if hosts.is_empty() {
            return Err(GenerationError::Validation(
                "custom host list must not be empty".to_string(),
            ));
        }

        let title = match &request.title {
            Some(title) => title.clone(),
            None => self.generate_title(&request.content).await?,
        };

        let meta = ScriptMetadata::new(title, target, request.mode, request.source_document.clone());

        let body = self.generate_body(&request, &hosts).await?;
        let segments = match request.mode {
            PodcastMode::Solo => parse_solo_response(&body, &hosts[0].name),
            PodcastMode::SingleLlm | PodcastMode::MultiAgent => {
                parse_multi_speaker_response(&body, &hosts)
            }
        };

        let script = Script::new(meta, hosts, segments)?;
        let script = fit_to_target(script)?;

        tracing::info!(
            segments = script.segments().len(),
            estimated_seconds = format_args!("{:.1}", script.estimated_duration_seconds()),
            "script generated"
        );
        Ok(script)
    }

    /// One generation call producing a short episode title.
    async fn generate_title(&self, content: &str) -> GenerationResult<String> {
        let context: String = content.chars().take(TITLE_CONTEXT_CHARS).collect();
        let prompt = format!(
            "You are a podcast title generator. Create an engaging, concise title for a \
             podcast episode based on this content.\n\n\
             Content summary:\n{context}...\n\n\
             Requirements:\n\
             - Maximum 8 words\n\
             - Engaging and descriptive\n\
             - Suitable for a general audience\n\
             - No quotation marks in response\n\n\
             Title:"
        );

        let response = self
            .chat
            .chat(ChatRequest {
                messages: vec![ChatMessage::user(prompt)],
                model: self.chat.default_model().to_string(),
                max_tokens: TITLE_MAX_TOKENS.min(self.max_tokens),
                temperature: TITLE_TEMPERATURE,
            })
            .await?;

        Ok(clean_title(&response.text))
    }

    /// One generation call producing the full episode body.
    async fn generate_body(&self, request: &ScriptRequest, hosts: &[Host]) -> GenerationResult<String> {
        let target = request.target_duration_seconds;
        let target_words = target_word_count(target);

        let (prompt, temperature) = match request.mode {
            PodcastMode::Solo => {
                let host = &hosts[0];
                let prompt = format!(
                    "You are {name}, a podcast host. {persona}\n\n\
                     Transform this content into an engaging {target}-second solo podcast \
                     narration.\n\n\
                     Content:\n{content}\n\n\
                     Requirements:\n\
                     - Conversational, engaging tone\n\
                     - Approximately {target_words} words ({target} seconds at 150 words/minute)\n\
                     - Break into natural paragraphs for pacing\n\
                     - Include smooth transitions\n\
                     - Make complex topics accessible\n\
                     - No speaker labels needed (solo narration)\n\n\
                     Begin the narration:",
                    name = host.name,
                    persona = host.persona,
                    content = request.content,
                );
                (prompt, SOLO_TEMPERATURE)
            }
            PodcastMode::SingleLlm | PodcastMode::MultiAgent => {
                let roster = hosts
                    .iter()
                    .map(|h| format!("{}: {}", h.name, h.persona))
                    .collect::<Vec<_>>()
                    .join("\n");
                let prompt = format!(
                    "You are creating a {target}-second podcast conversation between these \
                     hosts:\n\n{roster}\n\n\
                     Transform this content into a natural conversation:\n\n{content}\n\n\
                     Requirements:\n\
                     - Approximately {target_words} words total ({target} seconds at 150 \
                     words/minute)\n\
                     - Natural back-and-forth dialogue\n\
                     - Each speaker should have multiple turns\n\
                     - Use format: \"Speaker Name: dialogue text\"\n\
                     - Include questions, explanations, and reactions\n\
                     - Make complex topics accessible through conversation\n\
                     - Maintain engaging pace and flow\n\n\
                     Begin the conversation:",
                    content = request.content,
                );
                (prompt, MULTI_SPEAKER_TEMPERATURE)
            }
        };

        let response = self
            .chat
            .chat(ChatRequest {
                messages: vec![ChatMessage::user(prompt)],
                model: self.chat.default_model().to_string(),
                max_tokens: self.max_tokens,
                temperature,
            })
            .await?;
        Ok(response.text)
    }
}

/// Word budget implied by a target duration at the fixed speech rate.
pub fn target_word_count(target_duration_seconds: u32) -> u32 {
    (target_duration_seconds as f64 * WORDS_PER_MINUTE / 60.0).round() as u32
}

/// Strip surrounding whitespace and quote characters from a raw title
/// response. This is the only post-processing a title receives.
fn clean_title(raw: &str) -> String {
    raw.trim()
        .trim_matches(|c| c == '"' || c == '\'')
        .trim()
        .to_string()
}

/// Parse unlabeled narration: blank-line-separated paragraphs, each one a
/// segment attributed to the sole host.
fn parse_solo_response(response: &str, speaker_name: &str) -> Vec<Segment> {
    response
        .split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| Segment::new(speaker_name, p))
        .collect()
}

/// Parse labeled dialogue with a line scanner.
///
/// A line opens a new segment only when it starts with a known host name
/// followed immediately by a colon (case-sensitive exact prefix). Every
/// other non-empty line, including labels for unknown names, is space-joined
/// into the currently open segment. Lines before the first recognized label
/// are discarded. Names are tried longest-first, so a host name that is a
/// prefix of another ("Ben" vs "Ben Carter") resolves to the longer match
/// deterministically.
fn parse_multi_speaker_response(response: &str, hosts: &[Host]) -> Vec<Segment> {
    let mut names: Vec<&str> = hosts.iter().map(|h| h.name.as_str()).collect();
    names.sort_by_key(|n| std::cmp::Reverse(n.len()));

    let mut segments = Vec::new();
    let mut current_speaker: Option<&str> = None;
    let mut current_text: Vec<&str> = Vec::new();

    let mut flush = |speaker: Option<&str>, text: &mut Vec<&str>, segments: &mut Vec<Segment>| {
        if let Some(speaker) = speaker {
            if !text.is_empty() {
                segments.push(Segment::new(speaker, text.join(" ")));
            }
        }
        text.clear();
    };

    for line in response.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let opened = names.iter().find_map(|name| {
            let rest = line.strip_prefix(name)?;
            let rest = rest.strip_prefix(':')?;
            Some((*name, rest.trim()))
        });

        match opened {
            Some((name, rest)) => {
                flush(current_speaker, &mut current_text, &mut segments);
                current_speaker = Some(name);
                if !rest.is_empty() {
                    current_text.push(rest);
                }
            }
            None => {
                if current_speaker.is_some() {
                    current_text.push(line);
                }
            }
        }
    }
    flush(current_speaker, &mut current_text, &mut segments);

    segments
        .into_iter()
        .filter(|s| !s.text.trim().is_empty())
        .collect()
}

/// Trim-to-target timing fit.
///
/// Within 5% of target the script passes unchanged. Overlong scripts lose
/// segments from the tail until they fit; losing everything is a terminal
/// error. Short scripts are returned as-is; no padding or regeneration is
/// attempted.
pub fn fit_to_target(script: Script) -> GenerationResult<Script> {
    let target = script.meta().duration_sec;
    let target_f = f64::from(target);
    let estimated = script.estimated_duration_seconds();

    let drift = (estimated - target_f).abs();
    if drift <= DURATION_TOLERANCE * target_f {
        return Ok(script);
    }
    if estimated <= target_f {
        // Too short: deliberate scope limitation, carried over unchanged.
        return Ok(script);
    }

    tracing::debug!(
        estimated_seconds = format_args!("{estimated:.1}"),
        target_seconds = target,
        "trimming script to target duration"
    );

    let (meta, hosts, mut segments) = script.into_parts();
    while !segments.is_empty() {
        let total: f64 = segments
            .iter()
            .map(Segment::estimated_duration_seconds)
            .sum();
        if total <= target_f {
            break;
        }
        segments.pop();
    }

    if segments.is_empty() {
        return Err(GenerationError::EmptyResult {
            target_seconds: target,
            estimated_seconds: estimated,
        });
    }
    Script::new(meta, hosts, segments)
}
