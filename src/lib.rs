//! Rap Lyrics Gateway
//!
//! HTTP gateway that turns study notes or any prose into rap lyrics. Text is
//! summarized and rewritten by a hosted inference API when one is configured,
//! then grouped into verses locally. Every upstream call is time-bounded and
//! has a deterministic local fallback, so requests with valid input always
//! produce lyrics.

pub mod config;
pub mod error;
pub mod inference;
pub mod lyrics;
pub mod rhymes;
pub mod server;
pub mod types;
pub mod upload;

pub use config::AppConfig;
pub use error::AppError;

pub use inference::{HuggingFaceClient, InferenceBackend, InferenceError, SynthesizedSpeech};
pub use lyrics::{fallback_lyrics, structure_lyrics, RapGenerator, RhymeScheme, StructuredLyrics};
pub use rhymes::RhymeTable;
