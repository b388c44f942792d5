//! Progress events emitted by the agent loop

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Events reported while a query is being worked on
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum AgentEvent {
    /// A model decision is being requested
    Thinking {
        /// Zero-based step index
        step: usize,
    },

    /// A registered tool is about to run
    ToolStart {
        /// Tool name
        name: String,
        /// Tool arguments
        args: Value,
    },

    /// A tool finished
    ToolEnd {
        /// Tool name
        name: String,
        /// Whether the observation is an error payload
        is_error: bool,
    },

    /// The model asked for a tool that is not registered
    UnknownTool {
        /// Name the model used
        name: String,
    },

    /// The loop produced its answer (before reflection)
    Answer {
        /// Answer text
        text: String,
    },
}

/// Receiver of agent progress events
///
/// The console implements this to draw the progress trail; tests use
/// [`NoopSink`] or a recording sink.
pub trait EventSink: Send + Sync {
    /// Handle one event
    fn emit(&self, event: &AgentEvent);
}

/// Sink that drops every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl EventSink for NoopSink {
    fn emit(&self, _event: &AgentEvent) {}
}
