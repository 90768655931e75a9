//! Script persistence in the `.podcast.yaml` format.
//!
//! The persisted layout (`meta` / `hosts` / `segments`, field names as in
//! the data model) is a compatibility surface: previously saved scripts must
//! remain loadable. Derived values (word counts, durations) are never
//! written; they are recomputed from segment text on load. Loading funnels
//! through [`Script`]'s validating constructor, so a file that violates the
//! data model fails to load rather than producing a broken script.

use std::fs;
use std::path::Path;

use thiserror::Error;

use super::model::Script;

#[derive(Debug, Error)]
pub enum FormatterError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization failure, or a loaded document that fails script
    /// validation.
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Serialize a script to its durable YAML representation.
pub fn to_yaml_string(script: &Script) -> Result<String, FormatterError> {
    Ok(serde_yaml::to_string(script)?)
}

/// Parse a script from its YAML representation, re-validating invariants.
pub fn from_yaml_str(text: &str) -> Result<Script, FormatterError> {
    Ok(serde_yaml::from_str(text)?)
}

/// Write a script to disk, creating parent directories as needed.
pub fn save_to_file(script: &Script, path: &Path) -> Result<(), FormatterError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let yaml = to_yaml_string(script)?;
    fs::write(path, yaml)?;
    tracing::debug!(path = %path.display(), "script saved");
    Ok(())
}

/// Load and validate a script from disk.
pub fn load_from_file(path: &Path) -> Result<Script, FormatterError> {
    let text = fs::read_to_string(path)?;
    from_yaml_str(&text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::script::model::{Host, PodcastMode, ScriptMetadata, Segment};

    fn sample_script() -> Script {
        let meta = ScriptMetadata::new(
            "Round Trip",
            300,
            PodcastMode::SingleLlm,
            Some("paper.md".to_string()),
        );
        let hosts = vec![
            Host::new("Dr. Ada", "Expert host", "en-US-Standard-A"),
            Host::new("Ben", "Curious co-host", "en-US-Standard-B"),
        ];
        let segments = vec![
            Segment::new("Dr. Ada", "Welcome to the show."),
            Segment::new("Ben", "Glad to be here!"),
        ];
        Script::new(meta, hosts, segments).unwrap()
    }

    #[test]
    fn test_round_trip_is_lossless() {
        let script = sample_script();
        let yaml = to_yaml_string(&script).unwrap();
        let loaded = from_yaml_str(&yaml).unwrap();
        assert_eq!(script, loaded);
        // Derived values recompute identically either way.
        assert_eq!(
            script.estimated_duration_seconds(),
            loaded.estimated_duration_seconds()
        );
        assert_eq!(script.total_words(), loaded.total_words());
    }

    #[test]
    fn test_yaml_layout_keys() {
        let yaml = to_yaml_string(&sample_script()).unwrap();
        assert!(yaml.contains("meta:"));
        assert!(yaml.contains("title: Round Trip"));
        assert!(yaml.contains("duration_sec: 300"));
        assert!(yaml.contains("mode: single-llm"));
        assert!(yaml.contains("source_document: paper.md"));
        assert!(yaml.contains("hosts:"));
        assert!(yaml.contains("voice_id: en-US-Standard-A"));
        assert!(yaml.contains("segments:"));
        assert!(yaml.contains("speaker: Ben"));
    }

    #[test]
    fn test_derived_fields_are_not_persisted() {
        let yaml = to_yaml_string(&sample_script()).unwrap();
        assert!(!yaml.contains("word_count"));
        assert!(!yaml.contains("estimated_duration"));
    }

    #[test]
    fn test_loading_invalid_script_fails() {
        // Segment references a speaker with no matching host.
        let yaml = "\
meta:
  title: Broken
  duration_sec: 300
  created: 2024-01-01T00:00:00Z
  mode: solo
hosts:
  - name: Alex
    persona: Narrator
    voice_id: en-US-Standard-A
segments:
  - speaker: Ben
    text: Hello
";
        let result = from_yaml_str(yaml);
        assert!(matches!(result, Err(FormatterError::Yaml(_))));
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deep").join("script.podcast.yaml");
        let script = sample_script();
        save_to_file(&script, &path).unwrap();
        assert!(path.exists());

        let loaded = load_from_file(&path).unwrap();
        assert_eq!(loaded, script);
    }

    #[test]
    fn test_missing_source_document_round_trips_as_none() {
        let meta = ScriptMetadata::new("No Source", 120, PodcastMode::Solo, None);
        let script = Script::new(
            meta,
            vec![Host::new("Alex", "Narrator", "en-US-Standard-A")],
            vec![Segment::new("Alex", "Hello.")],
        )
        .unwrap();
        let yaml = to_yaml_string(&script).unwrap();
        assert!(!yaml.contains("source_document"));
        let loaded = from_yaml_str(&yaml).unwrap();
        assert_eq!(loaded.meta().source_document, None);
    }
}
