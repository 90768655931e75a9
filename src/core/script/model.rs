//! Script data model.
//!
//! A [`Script`] is the aggregate the whole pipeline revolves around: the
//! planner builds one, the formatter persists it, and the speech engines
//! render it. Construction goes through [`Script::new`], which enforces the
//! structural invariants; a `Script` obtained from anywhere in this crate is
//! guaranteed to be internally consistent.
//!
//! Word counts and estimated durations are always derived from segment text,
//! never stored. The 150 words-per-minute speech rate in
//! [`WORDS_PER_MINUTE`] is shared by prompt sizing, parsing, and trimming;
//! duration targeting depends on all three using the same constant.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::error::GenerationError;

/// Assumed speech rate used for all duration estimates.
pub const WORDS_PER_MINUTE: f64 = 150.0;

/// Script generation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PodcastMode {
    /// Single narrator, no speaker labels in generated text.
    Solo,
    /// One generation call producing a labeled multi-speaker conversation.
    SingleLlm,
    /// Multi-speaker conversation with an additional fact-checker host.
    MultiAgent,
}

impl PodcastMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PodcastMode::Solo => "solo",
            PodcastMode::SingleLlm => "single-llm",
            PodcastMode::MultiAgent => "multi-agent",
        }
    }
}

impl std::fmt::Display for PodcastMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A podcast host persona: a display name, a prompt fragment describing the
/// speaking style, and the synthesis voice bound to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Host {
    pub name: String,
    pub persona: String,
    pub voice_id: String,
}

impl Host {
    pub fn new(
        name: impl Into<String>,
        persona: impl Into<String>,
        voice_id: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            persona: persona.into(),
            voice_id: voice_id.into(),
        }
    }
}

/// One attributed span of spoken dialogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// Host name this line belongs to. Must match a host in the same script.
    pub speaker: String,
    pub text: String,
}

impl Segment {
    pub fn new(speaker: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            speaker: speaker.into(),
            text: text.into(),
        }
    }

    /// Whitespace-delimited token count.
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }

    /// Spoken duration estimate at [`WORDS_PER_MINUTE`].
    pub fn estimated_duration_seconds(&self) -> f64 {
        self.word_count() as f64 / WORDS_PER_MINUTE * 60.0
    }
}

/// Episode-level metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptMetadata {
    pub title: String,
    /// Target spoken duration in seconds. Always positive.
    pub duration_sec: u32,
    #[serde(with = "time::serde::rfc3339")]
    pub created: OffsetDateTime,
    pub mode: PodcastMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_document: Option<String>,
}

impl ScriptMetadata {
    pub fn new(
        title: impl Into<String>,
        duration_sec: u32,
        mode: PodcastMode,
        source_document: Option<String>,
    ) -> Self {
        Self {
            title: title.into(),
            duration_sec,
            created: OffsetDateTime::now_utc(),
            mode,
            source_document,
        }
    }
}

/// Raw persisted shape of a script. Deserialization funnels through this so
/// that loaded documents pass the same validation as planner output.
#[derive(Debug, Deserialize)]
struct RawScript {
    meta: ScriptMetadata,
    hosts: Vec<Host>,
    segments: Vec<Segment>,
}

/// A complete, validated podcast script.
///
/// Fields are private: every `Script` in existence has passed
/// [`Script::new`]. The persisted YAML layout is `meta` / `hosts` /
/// `segments`, which is a compatibility surface for previously saved scripts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawScript")]
pub struct Script {
    meta: ScriptMetadata,
    hosts: Vec<Host>,
    segments: Vec<Segment>,
}

impl TryFrom<RawScript> for Script {
    type Error = GenerationError;

    fn try_from(raw: RawScript) -> Result<Self, Self::Error> {
        Script::new(raw.meta, raw.hosts, raw.segments)
    }
}

impl Script {
    /// Build a script, enforcing the structural invariants:
    ///
    /// 1. at least one host, with unique non-empty names;
    /// 2. at least one segment, each with non-empty text;
    /// 3. every segment speaker matches a host name;
    /// 4. a non-empty title and a positive target duration.
    pub fn new(
        meta: ScriptMetadata,
        hosts: Vec<Host>,
        segments: Vec<Segment>,
    ) -> Result<Self, GenerationError> {
        if meta.title.trim().is_empty() {
            return Err(GenerationError::Validation(
                "script title must not be empty".to_string(),
            ));
        }
        if meta.duration_sec == 0 {
            return Err(GenerationError::Validation(
                "target duration must be positive".to_string(),
            ));
        }
        if hosts.is_empty() {
            return Err(GenerationError::Validation(
                "script must have at least one host".to_string(),
            ));
        }
        for (i, host) in hosts.iter().enumerate() {
            if host.name.trim().is_empty() {
                return Err(GenerationError::Validation(format!(
                    "host #{i} has an empty name"
                )));
            }
            if hosts[..i].iter().any(|h| h.name == host.name) {
                return Err(GenerationError::Validation(format!(
                    "duplicate host name: {}",
                    host.name
                )));
            }
        }
        if segments.is_empty() {
            return Err(GenerationError::Validation(
                "script must have at least one segment".to_string(),
            ));
        }
        for (i, segment) in segments.iter().enumerate() {
            if segment.text.trim().is_empty() {
                return Err(GenerationError::Validation(format!(
                    "segment #{i} has empty text"
                )));
            }
            if !hosts.iter().any(|h| h.name == segment.speaker) {
                return Err(GenerationError::Validation(format!(
                    "segment #{} references unknown speaker: {}",
                    i, segment.speaker
                )));
            }
        }
        Ok(Self {
            meta,
            hosts,
            segments,
        })
    }

    pub fn meta(&self) -> &ScriptMetadata {
        &self.meta
    }

    pub fn hosts(&self) -> &[Host] {
        &self.hosts
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn host_by_name(&self, name: &str) -> Option<&Host> {
        self.hosts.iter().find(|h| h.name == name)
    }

    /// Sum of per-segment duration estimates.
    pub fn estimated_duration_seconds(&self) -> f64 {
        self.segments
            .iter()
            .map(Segment::estimated_duration_seconds)
            .sum()
    }

    pub fn total_words(&self) -> usize {
        self.segments.iter().map(Segment::word_count).sum()
    }

    /// Decompose the script for rebuilding with a different segment list.
    /// Used by the timing-fit step, which re-validates via [`Script::new`].
    pub(crate) fn into_parts(self) -> (ScriptMetadata, Vec<Host>, Vec<Segment>) {
        (self.meta, self.hosts, self.segments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta() -> ScriptMetadata {
        ScriptMetadata::new("Test Episode", 300, PodcastMode::Solo, None)
    }

    fn host(name: &str) -> Host {
        Host::new(name, "Test persona", "en-US-Standard-A")
    }

    #[test]
    fn test_segment_word_count_and_duration() {
        let segment = Segment::new("Alex", "one two three four five");
        assert_eq!(segment.word_count(), 5);
        // 5 words at 150 wpm = 2 seconds
        assert!((segment.estimated_duration_seconds() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_script_duration_is_sum_of_segments() {
        let segments = vec![
            Segment::new("Alex", "one two three"),
            Segment::new("Alex", "four five six seven"),
        ];
        let expected: f64 = segments
            .iter()
            .map(Segment::estimated_duration_seconds)
            .sum();
        let script = Script::new(meta(), vec![host("Alex")], segments).unwrap();
        assert!((script.estimated_duration_seconds() - expected).abs() < 1e-9);
        assert_eq!(script.total_words(), 7);
    }

    #[test]
    fn test_rejects_dangling_speaker_reference() {
        let result = Script::new(
            meta(),
            vec![host("Alex")],
            vec![Segment::new("Ben", "Hello there")],
        );
        assert!(matches!(result, Err(GenerationError::Validation(_))));
    }

    #[test]
    fn test_rejects_empty_hosts_and_segments() {
        let err = Script::new(meta(), vec![], vec![Segment::new("Alex", "Hi")]);
        assert!(matches!(err, Err(GenerationError::Validation(_))));

        let err = Script::new(meta(), vec![host("Alex")], vec![]);
        assert!(matches!(err, Err(GenerationError::Validation(_))));
    }

    #[test]
    fn test_rejects_duplicate_host_names() {
        let result = Script::new(
            meta(),
            vec![host("Alex"), host("Alex")],
            vec![Segment::new("Alex", "Hi")],
        );
        assert!(matches!(result, Err(GenerationError::Validation(_))));
    }

    #[test]
    fn test_rejects_empty_segment_text() {
        let result = Script::new(
            meta(),
            vec![host("Alex")],
            vec![Segment::new("Alex", "   ")],
        );
        assert!(matches!(result, Err(GenerationError::Validation(_))));
    }

    #[test]
    fn test_rejects_zero_duration() {
        let meta = ScriptMetadata::new("Test", 0, PodcastMode::Solo, None);
        let result = Script::new(meta, vec![host("Alex")], vec![Segment::new("Alex", "Hi")]);
        assert!(matches!(result, Err(GenerationError::Validation(_))));
    }

    #[test]
    fn test_rejects_empty_title() {
        let meta = ScriptMetadata::new("  ", 300, PodcastMode::Solo, None);
        let result = Script::new(meta, vec![host("Alex")], vec![Segment::new("Alex", "Hi")]);
        assert!(matches!(result, Err(GenerationError::Validation(_))));
    }

    #[test]
    fn test_host_lookup() {
        let script = Script::new(
            meta(),
            vec![host("Alex"), host("Ben")],
            vec![Segment::new("Ben", "Hi")],
        )
        .unwrap();
        assert_eq!(script.host_by_name("Ben").unwrap().name, "Ben");
        assert!(script.host_by_name("Chloe").is_none());
    }

    #[test]
    fn test_mode_wire_strings() {
        assert_eq!(PodcastMode::Solo.as_str(), "solo");
        assert_eq!(PodcastMode::SingleLlm.as_str(), "single-llm");
        assert_eq!(PodcastMode::MultiAgent.as_str(), "multi-agent");
        let yaml = serde_yaml::to_string(&PodcastMode::SingleLlm).unwrap();
        assert_eq!(yaml.trim(), "single-llm");
    }
}
