//! Agent loop state types

use serde::{Deserialize, Serialize};

/// State of the agent loop while it works on one query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LoopState {
    /// Waiting on the model for the next decision
    Thinking,

    /// Executing a tool the model asked for
    ToolCall {
        /// Name of the tool being executed
        tool_name: String,
    },

    /// The model produced a final answer
    Final,

    /// The step budget ran out before a final answer
    StepExhausted,

    /// An answer is available
    Done,
}

impl LoopState {
    /// Check if the loop has stopped asking the model for decisions
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            LoopState::Final | LoopState::StepExhausted | LoopState::Done
        )
    }

    /// Create a tool call state
    pub fn tool_call(name: impl Into<String>) -> Self {
        LoopState::ToolCall {
            tool_name: name.into(),
        }
    }
}

impl Default for LoopState {
    fn default() -> Self {
        LoopState::Thinking
    }
}

/// How the loop reached its answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Termination {
    /// The model returned `action: "final"`
    FinalAnswer,
    /// The step cap was hit and the fallback answer was used
    StepLimit,
}
