//! Process configuration
//!
//! Only the model identifier, the model-service address and the output limit
//! can be changed from outside; the loop and retry bounds are fixed. The
//! command line picks between the interactive agent and the tool server.

use std::env;
use std::fmt;
use std::path::Path;

use crate::core::{WizardError, WizardResult};

/// Default Ollama model
pub const DEFAULT_MODEL: &str = "mistral";

/// Default Ollama address
pub const DEFAULT_HOST: &str = "http://localhost:11434";

/// Default output limit per completion
pub const DEFAULT_MAX_TOKENS: u32 = 1024;

/// Maximum model-decision cycles per user query
pub const MAX_STEPS: usize = 8;

/// First argument that turns the binary into the MCP tool server
pub const SERVE_ARG: &str = "serve";

/// Program plus arguments that start an MCP tool server on stdio
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolServerCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl fmt::Display for ToolServerCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// What the process was started to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchMode {
    /// Interactive session; tools come from the spawned server
    Agent { tool_server: ToolServerCommand },
    /// Serve the built-in tools over MCP on stdin/stdout
    ServeTools,
}

impl LaunchMode {
    /// Decide from the arguments after the program name
    ///
    /// - `serve` runs the tool server
    /// - `<command> [args...]` runs the agent against that tool server
    /// - no arguments runs the agent against `<this binary> serve`
    pub fn from_args<I>(args: I, this_binary: &Path) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        match args.next() {
            Some(first) if first == SERVE_ARG => LaunchMode::ServeTools,
            Some(program) => LaunchMode::Agent {
                tool_server: ToolServerCommand {
                    program,
                    args: args.collect(),
                },
            },
            None => LaunchMode::Agent {
                tool_server: ToolServerCommand {
                    program: this_binary.display().to_string(),
                    args: vec![SERVE_ARG.to_string()],
                },
            },
        }
    }
}

/// Settings read at startup
#[derive(Debug, Clone, PartialEq)]
pub struct WizardConfig {
    /// Model identifier passed to the service
    pub model: String,
    /// Base URL of the model service
    pub host: String,
    /// Output limit per completion
    pub max_tokens: u32,
}

impl WizardConfig {
    /// Read configuration from environment variables
    ///
    /// Reads from:
    /// - `OLLAMA_MODEL` (optional, defaults to `mistral`)
    /// - `OLLAMA_HOST` (optional, defaults to `http://localhost:11434`)
    /// - `OLLAMA_MAX_TOKENS` (optional, defaults to 1024)
    pub fn from_env() -> WizardResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> WizardResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let model = non_empty("OLLAMA_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let host = non_empty("OLLAMA_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());

        let max_tokens = match non_empty("OLLAMA_MAX_TOKENS") {
            Some(raw) => raw.trim().parse().map_err(|_| {
                WizardError::invalid_config(format!(
                    "OLLAMA_MAX_TOKENS must be a positive integer, got '{}'",
                    raw
                ))
            })?,
            None => DEFAULT_MAX_TOKENS,
        };

        if !host.starts_with("http://") && !host.starts_with("https://") {
            return Err(WizardError::invalid_config(format!(
                "OLLAMA_HOST must be an http(s) URL, got '{}'",
                host
            )));
        }

        Ok(Self {
            model,
            host,
            max_tokens,
        })
    }
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            host: DEFAULT_HOST.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}
