//! Rhyme lookup route handler.

use axum::{extract::State, Json};

use crate::error::AppError;
use crate::types::{RhymeRequest, RhymeResponse};

use super::extractors::JsonBody;
use super::AppState;

/// POST /api/rhymes
pub async fn find_rhymes(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<RhymeRequest>,
) -> Result<Json<RhymeResponse>, AppError> {
    let word = req.word.trim();
    if word.is_empty() {
        return Err(AppError::BadRequest("Word is required".to_string()));
    }

    let rhymes = state.rhymes.rhymes(word);

    Ok(Json(RhymeResponse {
        word: word.to_string(),
        count: rhymes.len(),
        rhymes,
    }))
}
