//! File upload route handler.

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use crate::error::AppError;
use crate::types::UploadResponse;
use crate::upload::read_staged_upload;

use super::AppState;

/// Multipart field carrying the file
const FILE_FIELD: &str = "file";

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge("Uploaded file exceeds the size limit".to_string())
    } else {
        AppError::BadRequest(format!("Invalid multipart body: {}", e.body_text()))
    }
}

/// POST /api/upload-text
///
/// Accept a text file, stage it on disk, return its contents and remove it.
pub async fn upload_text(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let filename = field.file_name().unwrap_or("upload.txt").to_string();
        let bytes = field.bytes().await.map_err(multipart_error)?;
        let size = bytes.len();

        let dir = state.config.upload.dir.clone();
        let text = tokio::task::spawn_blocking(move || read_staged_upload(&dir, &bytes))
            .await
            .map_err(|e| AppError::Internal(format!("Upload task failed: {e}")))??;

        info!(%filename, size, "Processed uploaded file");

        return Ok(Json(UploadResponse {
            text,
            filename,
            size,
        }));
    }

    Err(AppError::BadRequest("No file uploaded".to_string()))
}
