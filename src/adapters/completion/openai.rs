//! OpenAI chat-completions adapter.
//!
//! Sends a system + user message pair to `/v1/chat/completions` and returns
//! the first choice's content.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::domain::errors::{RetrievalError, RetrievalResult};
use crate::domain::models::CompletionConfig;
use crate::domain::ports::{CompletionProvider, CompletionRequest};

/// Configuration for the OpenAI completion provider.
#[derive(Debug, Clone)]
pub struct OpenAiCompletionConfig {
    /// API key (will be read from OPENAI_API_KEY env if not set).
    pub api_key: Option<String>,
    /// API base URL.
    pub base_url: String,
    /// Chat model.
    pub model: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for OpenAiCompletionConfig {
    fn default() -> Self {
        Self::from(&CompletionConfig::default())
    }
}

impl From<&CompletionConfig> for OpenAiCompletionConfig {
    fn from(config: &CompletionConfig) -> Self {
        Self {
            api_key: config.api_key.clone(),
            base_url: config.provider_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            timeout_secs: config.timeout_secs,
        }
    }
}

impl OpenAiCompletionConfig {
    /// Get API key from config or environment.
    pub fn get_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var("OPENAI_API_KEY").ok())
    }

    /// Create config with explicit API key.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Create config with custom model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

/// Message role in the chat API.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: Role,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[allow(dead_code)]
    role: Role,
    content: Option<String>,
}

/// OpenAI chat-completions provider.
pub struct OpenAiCompletionProvider {
    config: OpenAiCompletionConfig,
    client: reqwest::Client,
}

impl OpenAiCompletionProvider {
    pub fn new(config: OpenAiCompletionConfig) -> RetrievalResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                RetrievalError::Configuration(format!("Failed to build HTTP client: {e}"))
            })?;

        Ok(Self { config, client })
    }
}

#[async_trait]
impl CompletionProvider for OpenAiCompletionProvider {
    fn model(&self) -> &str {
        &self.config.model
    }

    async fn complete(&self, request: &CompletionRequest) -> RetrievalResult<String> {
        let api_key = self.config.get_api_key().ok_or_else(|| {
            RetrievalError::Configuration(
                "OpenAI API key not set. Set OPENAI_API_KEY env var or configure completion.api_key."
                    .to_string(),
            )
        })?;

        let body = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: Role::System,
                    content: &request.system,
                },
                ChatMessage {
                    role: Role::User,
                    content: &request.prompt,
                },
            ],
            temperature: request.temperature,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.config.base_url))
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| RetrievalError::Generation(format!("Completion request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response
                .text()
                .await
                .unwrap_or_else(|_| "unable to read response body".to_string());
            return Err(RetrievalError::Generation(format!(
                "Completion API returned {status}: {text}"
            )));
        }

        let parsed: ChatResponse = response.json().await.map_err(|e| {
            RetrievalError::Generation(format!("Failed to parse completion response: {e}"))
        })?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                RetrievalError::Generation("Completion response contained no text".to_string())
            })
    }
}
