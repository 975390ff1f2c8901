//! Remote inference backends for summarization, lyric generation and speech.
//!
//! The gateway never depends on a backend being reachable: every call site
//! bounds the call with a timeout and has a local fallback. The
//! [`InferenceBackend`] trait is the seam that lets tests substitute a fake.

mod huggingface;
mod text;

pub use huggingface::HuggingFaceClient;
pub use text::{build_lyrics_prompt, strip_prompt_echo, truncate_chars};

use async_trait::async_trait;
use std::future::Future;
use std::time::Duration;

use crate::error::AppError;

/// Audio returned by a text-to-speech model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesizedSpeech {
    pub audio: Vec<u8>,
    /// MIME type reported by the upstream, e.g. `audio/flac`
    pub mime_type: String,
}

/// A hosted model provider
#[async_trait]
pub trait InferenceBackend: Send + Sync {
    /// Condense `text` into a short summary
    async fn summarize(&self, text: &str) -> Result<String, InferenceError>;

    /// Continue `prompt`, returning only the generated text
    async fn generate(&self, prompt: &str) -> Result<String, InferenceError>;

    /// Render `text` as speech
    async fn synthesize_speech(&self, text: &str) -> Result<SynthesizedSpeech, InferenceError>;

    /// Short identifier used in logs
    fn name(&self) -> &str {
        "inference"
    }
}

/// Inference error types
#[derive(Debug, thiserror::Error)]
pub enum InferenceError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Upstream returned HTTP {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("Upstream returned an empty result")]
    EmptyResponse,

    #[error("Upstream call timed out after {0:?}")]
    Timeout(Duration),

    #[error("Failed to decode upstream response: {0}")]
    Decode(String),
}

impl From<InferenceError> for AppError {
    fn from(err: InferenceError) -> Self {
        AppError::Internal(err.to_string())
    }
}

/// Run an upstream call with a hard deadline
pub async fn with_timeout<T, F>(limit: Duration, call: F) -> Result<T, InferenceError>
where
    F: Future<Output = Result<T, InferenceError>>,
{
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result,
        Err(_) => Err(InferenceError::Timeout(limit)),
    }
}
