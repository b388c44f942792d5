//! Logging setup
//!
//! Logs go to a daily rolling file under `logs/` so they never interleave
//! with the interactive console or the tool server's stdio channel. `RUST_LOG` overrides the default filter and
//! `WIZARD_LOG_FORMAT=json` switches to JSON lines.

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Directory holding the rolling log files
pub const LOG_DIR: &str = "logs";

/// Log file of the interactive agent
pub const AGENT_LOG_FILE: &str = "weekend-wizard.log";

/// Log file of the tool server; stdout carries the MCP channel
pub const TOOL_SERVER_LOG_FILE: &str = "weekend-wizard-tools.log";
const DEFAULT_FILTER: &str = "weekend_wizard=info";

/// Output format of the log file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    fn from_env_value(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_lowercase()) {
            Some(v) if v == "json" => LogFormat::Json,
            _ => LogFormat::Text,
        }
    }
}

/// Install the global subscriber, writing to `logs/<file_prefix>.<date>`
///
/// The returned guard flushes the background writer on drop; keep it alive
/// for the whole program.
pub fn init_logging(file_prefix: &str) -> Result<WorkerGuard> {
    std::fs::create_dir_all(LOG_DIR)
        .with_context(|| format!("Failed to create log directory '{}'", LOG_DIR))?;

    let appender = tracing_appender::rolling::daily(LOG_DIR, file_prefix);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let format = LogFormat::from_env_value(std::env::var("WIZARD_LOG_FORMAT").ok().as_deref());

    let installed = match format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(writer)
            .try_init(),
        LogFormat::Text => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(writer)
            .with_ansi(false)
            .try_init(),
    };
    installed.map_err(|e| anyhow::anyhow!("Failed to install log subscriber: {}", e))?;

    tracing::info!("Logging to {}/ ({:?})", LOG_DIR, format);
    Ok(guard)
}
