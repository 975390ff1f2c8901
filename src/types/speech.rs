//! API types for text-to-speech.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechRequest {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SpeechStatus {
    /// Audio is inline in `audioUrl`
    Ready,
    /// The speech model was unavailable; nothing to play yet
    Pending,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeechResponse {
    pub success: bool,
    pub status: SpeechStatus,
    pub message: String,
    /// `data:` URL carrying the audio
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
}

impl SpeechResponse {
    pub fn ready(audio_url: String) -> Self {
        Self {
            success: true,
            status: SpeechStatus::Ready,
            message: "Speech synthesized".to_string(),
            audio_url: Some(audio_url),
        }
    }

    pub fn pending(message: impl Into<String>) -> Self {
        Self {
            success: false,
            status: SpeechStatus::Pending,
            message: message.into(),
            audio_url: None,
        }
    }
}
