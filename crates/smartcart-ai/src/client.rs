//! Chat-completion client.
//!
//! Speaks the OpenAI-compatible chat completions wire format. The
//! backend is a trait so handlers and tests can swap in a stub.

use crate::error::AiError;
use crate::prompt::{ChatMessage, Prompt};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Completion service configuration, sourced from the environment.
#[derive(Debug, Clone)]
pub struct AiConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
}

impl AiConfig {
    /// Read configuration from `SMARTCART_AI_*` environment variables.
    ///
    /// Fails only when the API key is absent; base URL and model fall
    /// back to the OpenAI defaults.
    pub fn from_env() -> Result<Self, AiError> {
        let api_key = std::env::var("SMARTCART_AI_API_KEY")
            .ok()
            .filter(|k| !k.is_empty())
            .ok_or(AiError::NotConfigured)?;
        let base_url = std::env::var("SMARTCART_AI_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let model =
            std::env::var("SMARTCART_AI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        Ok(Self {
            api_key,
            base_url,
            model,
        })
    }
}

/// A fully specified completion call.
#[derive(Debug, Clone, Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub temperature: f64,
}

impl CompletionRequest {
    pub fn from_prompt(model: &str, prompt: Prompt) -> Self {
        Self {
            model: model.to_string(),
            messages: prompt.messages,
            max_tokens: prompt.max_tokens,
            temperature: prompt.temperature,
        }
    }
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Debug, Deserialize)]
struct CompletionMessage {
    content: String,
}

/// Something that can run a chat completion.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Run the completion and return the raw assistant text.
    async fn complete(&self, request: CompletionRequest) -> Result<String, AiError>;

    /// The model name requests should carry.
    fn model(&self) -> &str;
}

/// HTTP backend against an OpenAI-compatible API.
pub struct HttpCompletionClient {
    config: AiConfig,
    http: reqwest::Client,
}

impl HttpCompletionClient {
    pub fn new(config: AiConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl CompletionBackend for HttpCompletionClient {
    async fn complete(&self, request: CompletionRequest) -> Result<String, AiError> {
        let url = format!("{}/chat/completions", self.config.base_url);
        debug!(model = %request.model, messages = request.messages.len(), "completion request");

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AiError::UpstreamStatus {
                status: status.as_u16(),
            });
        }

        let body: CompletionResponse = response.json().await?;
        let content = body
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .unwrap_or_default();
        let content = content.trim().to_string();
        if content.is_empty() {
            return Err(AiError::EmptyCompletion);
        }
        Ok(content)
    }

    fn model(&self) -> &str {
        &self.config.model
    }
}
