//! API request and response types for lyric operations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::lyrics::catalog::DEFAULT_STYLE;
use crate::lyrics::{GenerateOutcome, LyricsSource, RhymeScheme};

/// Request to turn text into rap lyrics
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRapRequest {
    /// Source text (notes, article, ...)
    #[serde(default)]
    pub text: String,
    /// Lyric style id (default: "rap")
    #[serde(default = "default_style")]
    pub style: String,
    /// Rhyme scheme; recorded in metadata, does not constrain output
    #[serde(default)]
    pub rhyme_scheme: RhymeScheme,
}

fn default_style() -> String {
    DEFAULT_STYLE.to_string()
}

/// Blank styles fall back to the default
pub fn normalize_style(style: &str) -> &str {
    let style = style.trim();
    if style.is_empty() {
        DEFAULT_STYLE
    } else {
        style
    }
}

/// Descriptive data returned alongside lyrics
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LyricsMetadata {
    pub original_length: usize,
    pub processed_length: usize,
    pub lyrics_length: usize,
    pub verse_count: usize,
    pub rhyme_scheme: RhymeScheme,
    pub style: String,
    /// "model" or "fallback"
    pub source: String,
    pub summarized: bool,
    pub generated_at: DateTime<Utc>,
}

/// Response from rap generation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRapResponse {
    pub lyrics: String,
    /// Text the lyrics were generated from (summary for long inputs)
    pub original_text: String,
    pub metadata: LyricsMetadata,
}

impl GenerateRapResponse {
    pub fn from_outcome(
        original_text: &str,
        style: &str,
        scheme: RhymeScheme,
        outcome: GenerateOutcome,
    ) -> Self {
        let lyrics = outcome.lyrics.render();
        let metadata = LyricsMetadata {
            original_length: original_text.chars().count(),
            processed_length: outcome.processed_text.chars().count(),
            lyrics_length: lyrics.chars().count(),
            verse_count: outcome.lyrics.verse_count(),
            rhyme_scheme: scheme,
            style: style.to_string(),
            source: source_label(outcome.source).to_string(),
            summarized: outcome.summarized,
            generated_at: Utc::now(),
        };

        Self {
            lyrics,
            original_text: outcome.processed_text,
            metadata,
        }
    }
}

pub(crate) fn source_label(source: LyricsSource) -> &'static str {
    match source {
        LyricsSource::Model => "model",
        LyricsSource::Fallback => "fallback",
    }
}

/// Request to process several texts in one call
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchProcessRequest {
    #[serde(default)]
    pub texts: Vec<String>,
    #[serde(default = "default_style")]
    pub style: String,
    #[serde(default)]
    pub rhyme_scheme: RhymeScheme,
}

/// Result for one batch entry; exactly one of `lyrics` or `error` is set
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchItemResult {
    pub index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lyrics: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<LyricsMetadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchProcessResponse {
    pub results: Vec<BatchItemResult>,
    pub count: usize,
}

/// Request to summarize text
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummarizeRequest {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummarizeResponse {
    pub summary: String,
    pub original_length: usize,
    pub summary_length: usize,
    /// "model" or "fallback"
    pub source: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_request_defaults() {
        let req: GenerateRapRequest =
            serde_json::from_str(r#"{"text": "some study notes"}"#).unwrap();
        assert_eq!(req.style, "rap");
        assert_eq!(req.rhyme_scheme, RhymeScheme::Abab);
    }

    #[test]
    fn test_generate_request_camel_case() {
        let req: GenerateRapRequest = serde_json::from_str(
            r#"{"text": "notes", "style": "trap", "rhymeScheme": "AAAA"}"#,
        )
        .unwrap();
        assert_eq!(req.rhyme_scheme, RhymeScheme::Aaaa);
        assert_eq!(req.style, "trap");
    }

    #[test]
    fn test_unknown_rhyme_scheme_rejected() {
        let result: Result<GenerateRapRequest, _> =
            serde_json::from_str(r#"{"text": "notes", "rhymeScheme": "ZZZZ"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_normalize_style() {
        assert_eq!(normalize_style("  "), "rap");
        assert_eq!(normalize_style(" drill "), "drill");
    }

    #[test]
    fn test_batch_item_skips_empty_fields() {
        let item = BatchItemResult {
            index: 2,
            lyrics: None,
            metadata: None,
            error: Some("Text must be at least 10 characters long".into()),
        };
        let value = serde_json::to_value(&item).unwrap();
        assert!(value.get("lyrics").is_none());
        assert_eq!(value["index"], 2);
    }
}
