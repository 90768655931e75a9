//! Document loading: extract plain text from input files.
//!
//! Plain text and Markdown pass through verbatim; HTML is reduced to its
//! text content. Empty documents are rejected before any generation call is
//! made.

use std::fs;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("document not found: {0}")]
    NotFound(String),

    #[error("unsupported document type: {0}")]
    Unsupported(String),

    #[error("document is empty: {0}")]
    Empty(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

static SCRIPT_STYLE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<(script|style)\b[^>]*>.*?</(script|style)>").expect("valid regex")
});
static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").expect("valid regex"));
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Load a document and return its extracted text.
pub fn load_document(path: &Path) -> Result<String, DocumentError> {
    if !path.exists() {
        return Err(DocumentError::NotFound(path.display().to_string()));
    }

    let suffix = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    let content = match suffix.as_str() {
        "txt" | "md" => fs::read_to_string(path)?,
        "html" | "htm" => extract_html_text(&fs::read_to_string(path)?),
        other => {
            return Err(DocumentError::Unsupported(format!(
                "{} (.{other}); supported: .txt, .md, .html",
                path.display()
            )));
        }
    };

    if content.trim().is_empty() {
        return Err(DocumentError::Empty(path.display().to_string()));
    }
    Ok(content)
}

/// Strip markup from an HTML document, keeping readable text.
fn extract_html_text(html: &str) -> String {
    let without_blocks = SCRIPT_STYLE_RE.replace_all(html, " ");
    let without_tags = TAG_RE.replace_all(&without_blocks, " ");
    let decoded = without_tags
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&nbsp;", " ");
    WHITESPACE_RE.replace_all(&decoded, " ").trim().to_string()
}
