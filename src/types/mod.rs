//! Shared types for the gateway API.
//!
//! Field names are camelCase on the wire to match the web client.

pub mod api;
pub mod speech;

use serde::{Deserialize, Serialize};

pub use api::*;
pub use speech::*;

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub uptime_seconds: u64,
    /// Whether a remote inference backend is configured
    #[serde(default)]
    pub inference_configured: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    /// Serving, but only local fallbacks are available
    Degraded,
}

/// Entry in the rhyme scheme catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RhymeSchemeInfo {
    pub id: String,
    pub pattern: Vec<String>,
    pub description: String,
}

/// Response from a file upload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub text: String,
    pub filename: String,
    pub size: usize,
}

/// Request for rhymes of a single word
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RhymeRequest {
    #[serde(default)]
    pub word: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RhymeResponse {
    pub word: String,
    pub rhymes: Vec<String>,
    pub count: usize,
}
