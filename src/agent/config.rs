//! Agent Configuration
//!
//! Configuration options for the [`Agent`](super::Agent).

use crate::config::{WizardConfig, MAX_STEPS};
use crate::llm::SamplingOptions;

/// Configuration for an Agent
///
/// Use the builder pattern to configure the agent:
///
/// ```ignore
/// let config = AgentConfig::new(system_prompt(&registry.catalog()))
///     .with_max_steps(8)
///     .with_sampling(SamplingOptions::new(0.2, 1024));
/// ```
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// System prompt seeded at the start of every query
    pub system_prompt: String,

    /// Maximum number of model decisions per query
    pub max_steps: usize,

    /// Sampling for action decisions; repair and reflection use the
    /// deterministic variant
    pub sampling: SamplingOptions,
}

impl AgentConfig {
    /// Create a new agent configuration with a system prompt
    pub fn new(system_prompt: impl Into<String>) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            max_steps: MAX_STEPS,
            sampling: SamplingOptions::default(),
        }
    }

    /// Take the output limit from the runtime configuration
    pub fn from_wizard_config(system_prompt: impl Into<String>, config: &WizardConfig) -> Self {
        let sampling = SamplingOptions::new(SamplingOptions::default().temperature, config.max_tokens);
        Self::new(system_prompt).with_sampling(sampling)
    }

    /// Set maximum steps per query
    pub fn with_max_steps(mut self, max: usize) -> Self {
        self.max_steps = max;
        self
    }

    /// Set sampling options for decisions
    pub fn with_sampling(mut self, sampling: SamplingOptions) -> Self {
        self.sampling = sampling;
        self
    }
}
