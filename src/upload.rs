//! Transient staging of uploaded text files.
//!
//! An upload is written to a temporary file, read back once and removed.
//! Removal is tied to the `NamedTempFile` guard, so it happens on every exit
//! path, including decode failures.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("Failed to stage upload: {0}")]
    Io(#[from] std::io::Error),

    #[error("Uploaded file is not valid UTF-8 text")]
    NotUtf8,
}

impl From<UploadError> for AppError {
    fn from(err: UploadError) -> Self {
        match err {
            UploadError::NotUtf8 => AppError::BadRequest(err.to_string()),
            UploadError::Io(_) => AppError::Internal(err.to_string()),
        }
    }
}

/// Stage `bytes` under `dir`, read them back as UTF-8 and delete the file.
///
/// Blocking; call from `spawn_blocking`.
pub fn read_staged_upload(dir: &Path, bytes: &[u8]) -> Result<String, UploadError> {
    std::fs::create_dir_all(dir)?;

    let mut staged = tempfile::Builder::new()
        .prefix("upload-")
        .suffix(".txt")
        .tempfile_in(dir)?;
    staged.write_all(bytes)?;
    staged.flush()?;

    debug!(path = %staged.path().display(), size = bytes.len(), "Staged upload");

    let contents = read_back(&staged);

    // Explicit close surfaces deletion errors; the drop guard covers early returns above
    if let Err(e) = staged.close() {
        warn!(error = %e, "Failed to remove staged upload");
    }

    contents
}

fn read_back(staged: &NamedTempFile) -> Result<String, UploadError> {
    let raw = std::fs::read(staged.path())?;
    String::from_utf8(raw).map_err(|_| UploadError::NotUtf8)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dir_is_empty(dir: &Path) -> bool {
        std::fs::read_dir(dir).unwrap().next().is_none()
    }

    #[test]
    fn test_reads_text_and_cleans_up() {
        let dir = tempfile::tempdir().unwrap();
        let text = read_staged_upload(dir.path(), "notes on the water cycle".as_bytes()).unwrap();

        assert_eq!(text, "notes on the water cycle");
        assert!(dir_is_empty(dir.path()));
    }

    #[test]
    fn test_invalid_utf8_still_cleans_up() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_staged_upload(dir.path(), &[0xff, 0xfe, 0xfd]).unwrap_err();

        assert!(matches!(err, UploadError::NotUtf8));
        assert!(dir_is_empty(dir.path()));
    }

    #[test]
    fn test_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");

        let text = read_staged_upload(&nested, b"").unwrap();
        assert!(text.is_empty());
        assert!(dir_is_empty(&nested));
    }

    #[test]
    fn test_not_utf8_maps_to_bad_request() {
        let err: AppError = UploadError::NotUtf8.into();
        assert!(matches!(err, AppError::BadRequest(_)));
    }
}
