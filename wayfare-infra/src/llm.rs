//! Hosted language model access.
//!
//! Models are addressed as `provider/model` (for example
//! `gemini/gemini-1.5-flash`). Only the Gemini provider is wired up.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use wayfare_shared::Masked;

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("Unsupported model provider '{0}'")]
    UnsupportedProvider(String),
    #[error("Invalid model identifier '{0}', expected provider/model")]
    InvalidModelId(String),
    #[error("HTTP request failed: {0}")]
    Transport(String),
    #[error("{message} (status {status})")]
    Api { status: u16, message: String },
    #[error("Model returned no text")]
    EmptyResponse,
    #[error("Could not decode model response: {0}")]
    Decode(String),
}

impl LlmError {
    /// Short, stable name of the failure category.
    pub fn kind(&self) -> &'static str {
        match self {
            LlmError::UnsupportedProvider(_) => "UnsupportedProvider",
            LlmError::InvalidModelId(_) => "InvalidModelId",
            LlmError::Transport(_) => "TransportError",
            LlmError::Api { .. } => "ApiError",
            LlmError::EmptyResponse => "EmptyResponse",
            LlmError::Decode(_) => "DecodeError",
        }
    }
}

#[async_trait]
pub trait LanguageModel: Send + Sync {
    fn id(&self) -> &str;

    async fn generate(&self, prompt: &str) -> Result<String, LlmError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelId {
    pub provider: String,
    pub name: String,
}

impl ModelId {
    pub fn parse(id: &str) -> Result<Self, LlmError> {
        match id.split_once('/') {
            Some((provider, name)) if !provider.is_empty() && !name.is_empty() => Ok(Self {
                provider: provider.to_string(),
                name: name.to_string(),
            }),
            _ => Err(LlmError::InvalidModelId(id.to_string())),
        }
    }
}

impl std::fmt::Display for ModelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.provider, self.name)
    }
}

#[derive(Debug, Clone)]
pub struct RemoteModelConfig {
    pub api_key: Masked<String>,
    pub model: ModelId,
    pub base_url: Option<String>,
    pub temperature: Option<f32>,
    pub timeout_seconds: u64,
}

impl RemoteModelConfig {
    pub fn new(api_key: Masked<String>, model: ModelId) -> Self {
        Self {
            api_key,
            model,
            base_url: None,
            temperature: Some(0.7),
            timeout_seconds: 120,
        }
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = Some(base_url);
        self
    }
}

// ============================================================================
// Gemini
// ============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    generation_config: Option<GeminiGenerationConfig>,
}

#[derive(Serialize, Deserialize, Default)]
struct GeminiContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Serialize, Deserialize)]
struct GeminiPart {
    #[serde(default)]
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Deserialize)]
struct GeminiCandidate {
    #[serde(default)]
    content: GeminiContent,
}

#[derive(Deserialize)]
struct GeminiErrorEnvelope {
    error: GeminiErrorBody,
}

#[derive(Deserialize)]
struct GeminiErrorBody {
    message: String,
}

#[derive(Debug)]
pub struct GeminiModel {
    config: RemoteModelConfig,
    client: Client,
}

impl GeminiModel {
    pub fn new(config: RemoteModelConfig) -> Result<Self, LlmError> {
        if config.model.provider != "gemini" {
            return Err(LlmError::UnsupportedProvider(config.model.provider.clone()));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| LlmError::Transport(e.to_string()))?;

        Ok(Self { config, client })
    }

    fn endpoint(&self) -> String {
        let base = self.config.base_url.as_deref().unwrap_or(GEMINI_BASE_URL);
        format!(
            "{}/models/{}:generateContent",
            base.trim_end_matches('/'),
            self.config.model.name
        )
    }
}

#[async_trait]
impl LanguageModel for GeminiModel {
    fn id(&self) -> &str {
        &self.config.model.name
    }

    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let request = GeminiRequest {
            contents: vec![GeminiContent {
                role: Some("user".to_string()),
                parts: vec![GeminiPart { text: prompt.to_string() }],
            }],
            generation_config: Some(GeminiGenerationConfig {
                temperature: self.config.temperature,
            }),
        };

        tracing::debug!(model = %self.config.model, "Sending generateContent request");

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", self.config.api_key.expose())
            .json(&request)
            .send()
            .await
            .map_err(|e| LlmError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| LlmError::Transport(e.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_str::<GeminiErrorEnvelope>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api { status: status.as_u16(), message });
        }

        let parsed: GeminiResponse =
            serde_json::from_str(&body).map_err(|e| LlmError::Decode(e.to_string()))?;

        let text: String = parsed
            .candidates
            .into_iter()
            .next()
            .map(|c| c.content.parts.into_iter().map(|p| p.text).collect())
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(LlmError::EmptyResponse);
        }
        Ok(text)
    }
}
