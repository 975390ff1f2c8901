//! Lyric generation and summarization route handlers.

use axum::{extract::State, Json};
use tracing::{debug, info};

use crate::error::AppError;
use crate::types::{
    normalize_style, source_label, BatchItemResult, BatchProcessRequest, BatchProcessResponse,
    GenerateRapRequest, GenerateRapResponse, SummarizeRequest, SummarizeResponse,
};

use super::extractors::JsonBody;
use super::AppState;

/// POST /api/generate-rap
///
/// Turn text into structured rap lyrics. Upstream failures fall back to
/// locally generated lyrics; only invalid input produces an error.
pub async fn generate_rap(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<GenerateRapRequest>,
) -> Result<Json<GenerateRapResponse>, AppError> {
    let style = normalize_style(&req.style);
    let outcome = state
        .generator
        .generate(&req.text, style, req.rhyme_scheme)
        .await?;

    let response = GenerateRapResponse::from_outcome(&req.text, style, req.rhyme_scheme, outcome);
    debug!(
        verses = response.metadata.verse_count,
        source = %response.metadata.source,
        "Rap generated"
    );

    Ok(Json(response))
}

/// POST /api/batch-process
///
/// Generate lyrics for several texts sequentially. Per-item validation
/// failures are reported inline rather than failing the batch.
pub async fn batch_process(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<BatchProcessRequest>,
) -> Result<Json<BatchProcessResponse>, AppError> {
    let max_batch = state.generator.config().max_batch;
    if req.texts.is_empty() {
        return Err(AppError::BadRequest("texts must not be empty".to_string()));
    }
    if req.texts.len() > max_batch {
        return Err(AppError::BadRequest(format!(
            "At most {max_batch} texts can be processed per batch"
        )));
    }

    info!(count = req.texts.len(), "Processing batch");

    let style = normalize_style(&req.style);
    let mut results = Vec::with_capacity(req.texts.len());

    for (index, text) in req.texts.iter().enumerate() {
        let result = match state.generator.generate(text, style, req.rhyme_scheme).await {
            Ok(outcome) => {
                let response =
                    GenerateRapResponse::from_outcome(text, style, req.rhyme_scheme, outcome);
                BatchItemResult {
                    index,
                    lyrics: Some(response.lyrics),
                    metadata: Some(response.metadata),
                    error: None,
                }
            }
            Err(AppError::BadRequest(message)) => BatchItemResult {
                index,
                lyrics: None,
                metadata: None,
                error: Some(message),
            },
            Err(e) => return Err(e),
        };
        results.push(result);
    }

    let count = results.len();
    Ok(Json(BatchProcessResponse { results, count }))
}

/// POST /api/summarize
pub async fn summarize(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<SummarizeRequest>,
) -> Result<Json<SummarizeResponse>, AppError> {
    let text = req.text.trim();
    if text.is_empty() {
        return Err(AppError::BadRequest("Text is required".to_string()));
    }

    let outcome = state.generator.summarize(text).await;

    Ok(Json(SummarizeResponse {
        original_length: text.chars().count(),
        summary_length: outcome.summary.chars().count(),
        source: source_label(outcome.source).to_string(),
        summary: outcome.summary,
    }))
}
