//! Wizard error types

use thiserror::Error;

use crate::llm::LlmError;

/// Errors that can end a user query or the whole session
#[derive(Error, Debug)]
pub enum WizardError {
    /// The model service could not be reached or answered badly
    #[error("Model error: {0}")]
    Llm(#[from] LlmError),

    /// IO error (console input, log directory)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl WizardError {
    /// Create an invalid configuration error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        WizardError::InvalidConfig(msg.into())
    }
}

/// Result type alias for wizard operations
pub type WizardResult<T> = Result<T, WizardError>;
