//! Text-to-speech route handler.

use axum::{extract::State, Json};
use base64::Engine;
use tracing::{info, warn};

use crate::error::AppError;
use crate::inference::with_timeout;
use crate::types::{SpeechRequest, SpeechResponse};

use super::extractors::JsonBody;
use super::AppState;

/// POST /api/text-to-speech
///
/// Synthesize speech for the given text. When the speech model is missing or
/// fails, a pending placeholder is returned instead of an error.
pub async fn text_to_speech(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<SpeechRequest>,
) -> Result<Json<SpeechResponse>, AppError> {
    let text = req.text.trim();
    if text.is_empty() {
        return Err(AppError::BadRequest("Text is required".to_string()));
    }

    let Some(backend) = &state.inference else {
        return Ok(Json(SpeechResponse::pending(
            "Speech synthesis is not configured",
        )));
    };

    let timeout = state.config.inference.timeout();
    match with_timeout(timeout, backend.synthesize_speech(text)).await {
        Ok(speech) => {
            info!(bytes = speech.audio.len(), mime = %speech.mime_type, "Speech synthesized");
            let encoded = base64::engine::general_purpose::STANDARD.encode(&speech.audio);
            Ok(Json(SpeechResponse::ready(format!(
                "data:{};base64,{}",
                speech.mime_type, encoded
            ))))
        }
        Err(e) => {
            warn!(backend = backend.name(), error = %e, "Speech synthesis failed");
            Ok(Json(SpeechResponse::pending("TTS processing initiated")))
        }
    }
}
