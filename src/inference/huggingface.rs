//! Hugging Face hosted inference API client.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, warn};

use super::text::strip_prompt_echo;
use super::{InferenceBackend, InferenceError, SynthesizedSpeech};
use crate::config::InferenceConfig;

/// Upstream bodies are truncated to this many bytes in error messages
const MAX_ERROR_BODY: usize = 512;

#[derive(Debug, Deserialize)]
struct SummaryOutput {
    summary_text: String,
}

#[derive(Debug, Deserialize)]
struct GenerationOutput {
    generated_text: String,
}

/// The API answers with either a list of outputs or a single object
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    fn into_first(self) -> Option<T> {
        match self {
            Self::Many(items) => items.into_iter().next(),
            Self::One(item) => Some(item),
        }
    }
}

/// Bearer-authenticated client for `POST {base_url}/{model}`
#[derive(Clone)]
pub struct HuggingFaceClient {
    client: Client,
    base_url: String,
    api_key: String,
    summarization_model: String,
    generation_model: String,
    tts_model: String,
}

impl HuggingFaceClient {
    /// Build a client from config. Returns `None` when no API key is set.
    pub fn from_config(config: &InferenceConfig) -> Result<Option<Self>, InferenceError> {
        let Some(api_key) = config.api_key.as_deref().filter(|k| !k.trim().is_empty()) else {
            return Ok(None);
        };

        let client = Client::builder()
            .user_agent(concat!("rapgen-gateway/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout())
            .build()?;

        Ok(Some(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: api_key.trim().to_string(),
            summarization_model: config.summarization_model.clone(),
            generation_model: config.generation_model.clone(),
            tts_model: config.tts_model.clone(),
        }))
    }

    fn model_url(&self, model: &str) -> String {
        format!("{}/{}", self.base_url, model)
    }

    async fn post(&self, model: &str, body: Value) -> Result<reqwest::Response, InferenceError> {
        let url = self.model_url(model);
        debug!(%url, "Calling inference API");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let body: String = body.chars().take(MAX_ERROR_BODY).collect();
            warn!(model, status = status.as_u16(), %body, "Inference API returned an error");
            return Err(InferenceError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response)
    }

    async fn post_json<T: DeserializeOwned>(
        &self,
        model: &str,
        body: Value,
    ) -> Result<T, InferenceError> {
        let response = self.post(model, body).await?;
        let bytes = response.bytes().await?;
        let parsed: OneOrMany<T> =
            serde_json::from_slice(&bytes).map_err(|e| InferenceError::Decode(e.to_string()))?;
        parsed.into_first().ok_or(InferenceError::EmptyResponse)
    }
}

#[async_trait]
impl InferenceBackend for HuggingFaceClient {
    async fn summarize(&self, text: &str) -> Result<String, InferenceError> {
        let body = json!({
            "inputs": text,
            "parameters": {
                "max_length": 130,
                "min_length": 30,
                "do_sample": false
            }
        });

        let output: SummaryOutput = self.post_json(&self.summarization_model, body).await?;
        let summary = output.summary_text.trim();
        if summary.is_empty() {
            return Err(InferenceError::EmptyResponse);
        }
        Ok(summary.to_string())
    }

    async fn generate(&self, prompt: &str) -> Result<String, InferenceError> {
        let body = json!({
            "inputs": prompt,
            "parameters": {
                "max_length": 200,
                "temperature": 0.8,
                "do_sample": true,
                "top_p": 0.9,
                "return_full_text": false
            }
        });

        let output: GenerationOutput = self.post_json(&self.generation_model, body).await?;
        let text = strip_prompt_echo(&output.generated_text, prompt);
        if text.is_empty() {
            return Err(InferenceError::EmptyResponse);
        }
        Ok(text.to_string())
    }

    async fn synthesize_speech(&self, text: &str) -> Result<SynthesizedSpeech, InferenceError> {
        let response = self.post(&self.tts_model, json!({ "inputs": text })).await?;

        let mime_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("audio/wav")
            .to_string();

        // A JSON body on a 2xx is a status payload (e.g. model loading), not audio
        if mime_type.starts_with("application/json") {
            let body = response.text().await.unwrap_or_default();
            return Err(InferenceError::Decode(format!(
                "expected audio, got JSON: {}",
                body.chars().take(MAX_ERROR_BODY).collect::<String>()
            )));
        }

        let audio = response.bytes().await?.to_vec();
        if audio.is_empty() {
            return Err(InferenceError::EmptyResponse);
        }

        Ok(SynthesizedSpeech { audio, mime_type })
    }

    fn name(&self) -> &str {
        "huggingface"
    }
}
