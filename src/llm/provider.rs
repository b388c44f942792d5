//! LLM Provider trait
//!
//! Abstracts the language-model interface so the agent loop only ever sees
//! role-tagged messages going in and raw text coming out. All structure is
//! imposed afterwards by the action decoder.

use thiserror::Error;

use super::types::{Message, SamplingOptions};

/// Errors from the model service
#[derive(Error, Debug)]
pub enum LlmError {
    /// The service did not answer the startup health check
    #[error("Cannot connect to model service at {host}: {source}")]
    Unreachable {
        host: String,
        #[source]
        source: reqwest::Error,
    },

    /// A completion request failed in transport or with an error status
    #[error("Model request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service answered with something that is not a completion
    #[error("Invalid model response: {0}")]
    InvalidResponse(String),
}

/// Trait for text-completion services used by the agent loop.
#[async_trait::async_trait]
pub trait LlmProvider: Send + Sync {
    /// Send the full message list and return the model's raw text reply.
    async fn complete(
        &self,
        messages: &[Message],
        options: SamplingOptions,
    ) -> Result<String, LlmError>;

    /// Check that the service is reachable before the session starts.
    async fn health_check(&self) -> Result<(), LlmError>;

    /// Get the current model name.
    fn model(&self) -> String;

    /// Get the provider name (e.g., "ollama").
    fn provider_name(&self) -> &str;
}
