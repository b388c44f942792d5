//! Ollama chat client
//!
//! Talks to a local Ollama server over its REST API:
//! - `POST /api/chat` with `stream: false` for completions
//! - `GET /api/tags` as the startup reachability check
//!
//! ```ignore
//! let llm = OllamaProvider::new("http://localhost:11434", "mistral");
//! llm.health_check().await?;
//! let text = llm.complete(&messages, SamplingOptions::default()).await?;
//! ```

use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::provider::{LlmError, LlmProvider};
use super::types::{Message, SamplingOptions};
use crate::config::WizardConfig;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    stream: bool,
    options: ChatOptions,
}

#[derive(Debug, Serialize)]
struct ChatOptions {
    temperature: f32,
    num_predict: u32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    message: Option<ChatMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: String,
}

/// Ollama LLM provider
pub struct OllamaProvider {
    client: Client,
    host: String,
    model: String,
}

impl OllamaProvider {
    /// Create a provider for `host` serving `model`
    pub fn new(host: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            host: host.into(),
            model: model.into(),
        }
    }

    /// Create a provider from the wizard configuration
    pub fn from_config(config: &WizardConfig) -> Self {
        tracing::info!("Using model: {}", config.model);
        tracing::info!("Model service: {}", config.host);
        Self::new(config.host.clone(), config.model.clone())
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.host.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[async_trait::async_trait]
impl LlmProvider for OllamaProvider {
    async fn complete(
        &self,
        messages: &[Message],
        options: SamplingOptions,
    ) -> Result<String, LlmError> {
        tracing::debug!(
            model = %self.model,
            messages = messages.len(),
            temperature = options.temperature,
            "Sending chat request to Ollama"
        );

        let request = ChatRequest {
            model: &self.model,
            messages,
            stream: false,
            options: ChatOptions {
                temperature: options.temperature,
                num_predict: options.max_tokens,
            },
        };

        let response: ChatResponse = self
            .client
            .post(self.url("/api/chat"))
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let content = response
            .message
            .ok_or_else(|| LlmError::InvalidResponse("missing message".into()))?
            .content;

        tracing::debug!("Received {} chars from Ollama", content.len());

        Ok(content.trim().to_string())
    }

    async fn health_check(&self) -> Result<(), LlmError> {
        self.client
            .get(self.url("/api/tags"))
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|source| LlmError::Unreachable {
                host: self.host.clone(),
                source,
            })?;
        Ok(())
    }

    fn model(&self) -> String {
        self.model.clone()
    }

    fn provider_name(&self) -> &str {
        "ollama"
    }
}
