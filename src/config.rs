use config::{Config, ConfigError, Environment};
use serde::Deserialize;
use std::net::{AddrParseError, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

/// Application configuration loaded from environment variables.
///
/// All settings can be configured via environment variables with the `RAPGEN_` prefix.
/// For example: `RAPGEN_SERVER__PORT=5000`, `RAPGEN_INFERENCE__TIMEOUT_MS=10000`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Remote inference API configuration
    #[serde(default)]
    pub inference: InferenceConfig,

    /// Lyric generation tuning
    #[serde(default)]
    pub generation: GenerationConfig,

    /// Rhyme table configuration
    #[serde(default)]
    pub rhymes: RhymeConfig,

    /// File upload configuration
    #[serde(default)]
    pub upload: UploadConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Maximum accepted request body size for JSON endpoints
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_max_body_bytes() -> usize {
    50 * 1024 * 1024
}

impl ServerConfig {
    /// Returns the socket address for binding the server
    pub fn socket_addr(&self) -> Result<SocketAddr, AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }
}

#[derive(Clone, Deserialize)]
pub struct InferenceConfig {
    /// Base URL of the hosted inference API; model IDs are appended as path segments
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Bearer token for the inference API. Without one, only local fallbacks are used.
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_summarization_model")]
    pub summarization_model: String,

    #[serde(default = "default_generation_model")]
    pub generation_model: String,

    #[serde(default = "default_tts_model")]
    pub tts_model: String,

    /// Upper bound for a single upstream call, in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

// api_key must never end up in logs
impl std::fmt::Debug for InferenceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InferenceConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("summarization_model", &self.summarization_model)
            .field("generation_model", &self.generation_model)
            .field("tts_model", &self.tts_model)
            .field("timeout_ms", &self.timeout_ms)
            .finish()
    }
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            summarization_model: default_summarization_model(),
            generation_model: default_generation_model(),
            tts_model: default_tts_model(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl InferenceConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Whether a credential is present, i.e. whether the remote backend can be used at all
    pub fn is_configured(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }
}

fn default_base_url() -> String {
    "https://api-inference.huggingface.co/models".to_string()
}

fn default_summarization_model() -> String {
    "facebook/bart-large-cnn".to_string()
}

fn default_generation_model() -> String {
    "microsoft/DialoGPT-large".to_string()
}

fn default_tts_model() -> String {
    "microsoft/speecht5_tts".to_string()
}

fn default_timeout_ms() -> u64 {
    30_000
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenerationConfig {
    /// Minimum trimmed input length accepted by the generation endpoints
    #[serde(default = "default_min_text_chars")]
    pub min_text_chars: usize,

    /// Inputs longer than this are summarized before generation
    #[serde(default = "default_summarize_threshold")]
    pub summarize_threshold: usize,

    /// Truncation length used when summarization fails
    #[serde(default = "default_summary_fallback_chars")]
    pub summary_fallback_chars: usize,

    /// Truncation length used when summarization returns nothing
    #[serde(default = "default_empty_summary_chars")]
    pub empty_summary_chars: usize,

    /// Lines per verse
    #[serde(default = "default_verse_lines")]
    pub verse_lines: usize,

    /// Chance (0.0 to 1.0) that a line gets a filler ad-lib appended
    #[serde(default = "default_filler_probability")]
    pub filler_probability: f64,

    /// Ad-lib pool used for filler insertion
    #[serde(default = "default_fillers")]
    pub fillers: Vec<String>,

    /// Maximum number of texts accepted by the batch endpoint
    #[serde(default = "default_max_batch")]
    pub max_batch: usize,

    /// Fixed RNG seed for reproducible filler placement
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            min_text_chars: default_min_text_chars(),
            summarize_threshold: default_summarize_threshold(),
            summary_fallback_chars: default_summary_fallback_chars(),
            empty_summary_chars: default_empty_summary_chars(),
            verse_lines: default_verse_lines(),
            filler_probability: default_filler_probability(),
            fillers: default_fillers(),
            max_batch: default_max_batch(),
            seed: None,
        }
    }
}

fn default_min_text_chars() -> usize {
    10
}

fn default_summarize_threshold() -> usize {
    500
}

fn default_summary_fallback_chars() -> usize {
    300
}

fn default_empty_summary_chars() -> usize {
    200
}

fn default_verse_lines() -> usize {
    4
}

fn default_filler_probability() -> f64 {
    0.3
}

fn default_fillers() -> Vec<String> {
    crate::lyrics::DEFAULT_FILLERS
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_max_batch() -> usize {
    10
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RhymeConfig {
    /// JSON file replacing the built-in suffix table
    #[serde(default)]
    pub table_path: Option<PathBuf>,

    /// Words returned when no suffix matches (empty means "no rhymes")
    #[serde(default)]
    pub fallback: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadConfig {
    /// Directory for transient upload files
    #[serde(default = "default_upload_dir")]
    pub dir: PathBuf,

    /// Maximum accepted upload size
    #[serde(default = "default_upload_max_bytes")]
    pub max_bytes: usize,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            dir: default_upload_dir(),
            max_bytes: default_upload_max_bytes(),
        }
    }
}

fn default_upload_dir() -> PathBuf {
    PathBuf::from("uploads")
}

fn default_upload_max_bytes() -> usize {
    10 * 1024 * 1024
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables should be prefixed with `RAPGEN_` and use
    /// double underscores for nested values:
    /// - `RAPGEN_SERVER__PORT` -> server.port
    /// - `RAPGEN_INFERENCE__API_KEY` -> inference.api_key
    /// - `RAPGEN_GENERATION__FILLERS=yeah,uh` -> generation.fillers
    ///
    /// `HF_API_KEY` is accepted as the inference credential when
    /// `RAPGEN_INFERENCE__API_KEY` is unset.
    pub fn load() -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("RAPGEN")
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("generation.fillers")
                    .with_list_parse_key("rhymes.fallback")
                    .try_parsing(true),
            )
            .build()?;

        let mut app: AppConfig = config.try_deserialize()?;
        if app.inference.api_key.is_none() {
            app.inference.api_key = std::env::var("HF_API_KEY").ok();
        }

        Ok(app)
    }
}
