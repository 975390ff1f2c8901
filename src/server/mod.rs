//! HTTP server setup and routing.

mod extractors;
mod lyrics;
mod rhymes;
mod routes;
mod speech;
mod upload;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::AppConfig;
use crate::error::AppError;
use crate::inference::{HuggingFaceClient, InferenceBackend};
use crate::lyrics::RapGenerator;
use crate::rhymes::RhymeTable;

/// Shared application state passed to all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    /// Read-only rhyme table, built once at startup
    pub rhymes: Arc<RhymeTable>,
    /// Remote inference backend, absent when no credential is configured
    pub inference: Option<Arc<dyn InferenceBackend>>,
    pub generator: Arc<RapGenerator>,
    /// Server start time for uptime calculation
    pub started_at: Instant,
}

impl AppState {
    /// Build state from config, creating the Hugging Face client when an API
    /// key is present.
    pub fn new(config: AppConfig) -> Result<Self, AppError> {
        let backend = HuggingFaceClient::from_config(&config.inference)?
            .map(|client| Arc::new(client) as Arc<dyn InferenceBackend>);

        if backend.is_none() {
            info!("No inference API key configured, serving local fallbacks only");
        }

        Self::build(config, backend)
    }

    /// Create AppState with an explicit inference backend
    pub fn with_inference(
        config: AppConfig,
        backend: Arc<dyn InferenceBackend>,
    ) -> Result<Self, AppError> {
        Self::build(config, Some(backend))
    }

    fn build(
        config: AppConfig,
        backend: Option<Arc<dyn InferenceBackend>>,
    ) -> Result<Self, AppError> {
        let rhymes = load_rhyme_table(&config)?;

        let generator = RapGenerator::new(
            backend.clone(),
            config.generation.clone(),
            config.inference.timeout(),
        );

        Ok(Self {
            config: Arc::new(config),
            rhymes: Arc::new(rhymes),
            inference: backend,
            generator: Arc::new(generator),
            started_at: Instant::now(),
        })
    }

    /// Get uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}

fn load_rhyme_table(config: &AppConfig) -> Result<RhymeTable, AppError> {
    let table = match &config.rhymes.table_path {
        Some(path) => {
            let table = RhymeTable::from_json_file(path)?;
            info!(path = %path.display(), entries = table.len(), "Loaded rhyme table");
            table
        }
        None => RhymeTable::builtin(),
    };

    Ok(table.with_fallback(config.rhymes.fallback.clone()))
}

/// Creates the application router with all routes configured
pub fn create_router(state: AppState) -> Router {
    let upload_limit = state.config.upload.max_bytes;
    let body_limit = state.config.server.max_body_bytes;

    let api_routes = Router::new()
        .route("/health", get(routes::health))
        .route("/styles", get(routes::styles))
        .route("/beats", get(routes::beats))
        .route("/rhyme-schemes", get(routes::rhyme_schemes))
        // Lyric endpoints
        .route("/generate-rap", post(lyrics::generate_rap))
        .route("/batch-process", post(lyrics::batch_process))
        .route("/summarize", post(lyrics::summarize))
        .route("/rhymes", post(rhymes::find_rhymes))
        .route("/text-to-speech", post(speech::text_to_speech))
        .route(
            "/upload-text",
            post(upload::upload_text).layer(DefaultBodyLimit::max(upload_limit)),
        );

    Router::new()
        .nest("/api", api_routes)
        .fallback(routes::not_found)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_rhyme_table_file_is_loaded() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"suffix": "OOM", "words": ["boom", "room"]}}]"#).unwrap();

        let mut config = AppConfig::default();
        config.rhymes.table_path = Some(file.path().to_path_buf());

        let Ok(state) = AppState::new(config) else {
            panic!("valid rhyme table was rejected");
        };
        assert_eq!(state.rhymes.len(), 1);
        assert_eq!(state.rhymes.rhymes("zoom"), vec!["boom", "room"]);
    }

    #[test]
    fn test_invalid_rhyme_table_is_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"suffix": "  ", "words": ["anything"]}}]"#).unwrap();

        let mut config = AppConfig::default();
        config.rhymes.table_path = Some(file.path().to_path_buf());

        match AppState::new(config) {
            Err(AppError::Config(message)) => assert!(message.contains("empty suffix")),
            Err(other) => panic!("expected config error, got {other}"),
            Ok(_) => panic!("empty suffix was accepted"),
        }
    }

    #[test]
    fn test_missing_rhyme_table_is_config_error() {
        let mut config = AppConfig::default();
        config.rhymes.table_path = Some("/nonexistent/rhymes.json".into());

        assert!(matches!(AppState::new(config), Err(AppError::Config(_))));
    }
}
