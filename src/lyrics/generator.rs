//! Text -> lyrics pipeline: validate, summarize, generate, structure.
//!
//! Upstream failures never surface to the caller. A failed or slow
//! summarization degrades to truncation and a failed generation degrades
//! to [`fallback_lyrics`](super::fallback_lyrics).

use std::sync::{Arc, Mutex};
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::{fallback_lyrics, structure_lyrics, RhymeScheme, StructureOptions, StructuredLyrics};
use crate::config::GenerationConfig;
use crate::error::AppError;
use crate::inference::{build_lyrics_prompt, truncate_chars, with_timeout, InferenceBackend};

/// Where the lyrics (or summary) came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LyricsSource {
    Model,
    Fallback,
}

/// Result of a generation run
#[derive(Debug, Clone)]
pub struct GenerateOutcome {
    /// Text that was fed into the generation prompt
    pub processed_text: String,
    pub lyrics: StructuredLyrics,
    pub source: LyricsSource,
    pub summarized: bool,
}

/// Result of a summarization run
#[derive(Debug, Clone)]
pub struct SummaryOutcome {
    pub summary: String,
    pub source: LyricsSource,
}

/// Shared lyric generation service
pub struct RapGenerator {
    backend: Option<Arc<dyn InferenceBackend>>,
    config: GenerationConfig,
    structure: StructureOptions,
    timeout: Duration,
    rng: Mutex<StdRng>,
}

impl RapGenerator {
    pub fn new(
        backend: Option<Arc<dyn InferenceBackend>>,
        config: GenerationConfig,
        timeout: Duration,
    ) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            backend,
            structure: StructureOptions::from_config(&config),
            config,
            timeout,
            rng: Mutex::new(rng),
        }
    }

    pub fn has_backend(&self) -> bool {
        self.backend.is_some()
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Reject input too short to rap about. Runs before any upstream call.
    pub fn validate_text<'a>(&self, text: &'a str) -> Result<&'a str, AppError> {
        let trimmed = text.trim();
        if trimmed.chars().count() < self.config.min_text_chars {
            return Err(AppError::BadRequest(format!(
                "Text must be at least {} characters long",
                self.config.min_text_chars
            )));
        }
        Ok(trimmed)
    }

    /// Summarize `text`, falling back to truncation when the backend fails
    pub async fn summarize(&self, text: &str) -> SummaryOutcome {
        let Some(backend) = &self.backend else {
            debug!("No inference backend configured, truncating instead of summarizing");
            return SummaryOutcome {
                summary: truncate_chars(text, self.config.summary_fallback_chars).to_string(),
                source: LyricsSource::Fallback,
            };
        };

        match with_timeout(self.timeout, backend.summarize(text)).await {
            Ok(summary) if !summary.trim().is_empty() => SummaryOutcome {
                summary,
                source: LyricsSource::Model,
            },
            Ok(_) => {
                info!("Summarizer returned nothing, truncating input");
                SummaryOutcome {
                    summary: truncate_chars(text, self.config.empty_summary_chars).to_string(),
                    source: LyricsSource::Fallback,
                }
            }
            Err(e) => {
                warn!(backend = backend.name(), error = %e, "Summarization failed, using original text");
                SummaryOutcome {
                    summary: truncate_chars(text, self.config.summary_fallback_chars).to_string(),
                    source: LyricsSource::Fallback,
                }
            }
        }
    }

    /// Full pipeline for one request
    pub async fn generate(
        &self,
        text: &str,
        style: &str,
        scheme: RhymeScheme,
    ) -> Result<GenerateOutcome, AppError> {
        let text = self.validate_text(text)?;

        info!(
            text_len = text.len(),
            style,
            rhyme_scheme = %scheme,
            "Generating rap lyrics"
        );

        let (processed_text, summarized) =
            if text.chars().count() > self.config.summarize_threshold {
                (self.summarize(text).await.summary, true)
            } else {
                (text.to_string(), false)
            };

        let (raw, source) = self.generate_raw(&processed_text, style).await;

        let mut lyrics = self.structure(&raw);
        let mut source = source;
        if lyrics.is_empty() {
            debug!("Generated text had no usable lines, using fallback lyrics");
            lyrics = self.structure(&fallback_lyrics(&processed_text));
            source = LyricsSource::Fallback;
        }

        Ok(GenerateOutcome {
            processed_text,
            lyrics,
            source,
            summarized,
        })
    }

    async fn generate_raw(&self, content: &str, style: &str) -> (String, LyricsSource) {
        let Some(backend) = &self.backend else {
            debug!("No inference backend configured, using fallback lyrics");
            return (fallback_lyrics(content), LyricsSource::Fallback);
        };

        let prompt = build_lyrics_prompt(content, style);
        match with_timeout(self.timeout, backend.generate(&prompt)).await {
            Ok(raw) if !raw.trim().is_empty() => (raw, LyricsSource::Model),
            Ok(_) => {
                info!("Generator returned nothing, using fallback lyrics");
                (fallback_lyrics(content), LyricsSource::Fallback)
            }
            Err(e) => {
                warn!(backend = backend.name(), error = %e, "Rap generation failed, using fallback");
                (fallback_lyrics(content), LyricsSource::Fallback)
            }
        }
    }

    fn structure(&self, raw: &str) -> StructuredLyrics {
        // A poisoned lock only means another request panicked mid-draw; the RNG is still usable
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        structure_lyrics(raw, &self.structure, &mut *rng)
    }
}
