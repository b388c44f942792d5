//! Tool Provider trait
//!
//! Abstraction for sources that hand the registry a batch of tools at startup.

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use super::tool::Tool;

/// Trait for tool providers
///
/// The registry pulls every tool from a provider once, when the session
/// starts. New tools only need a name, a parameter schema and a description;
/// the agent loop does not change.
#[async_trait]
pub trait ToolProvider: Send + Sync {
    /// Get all tools from this provider
    async fn get_tools(&self) -> Result<Vec<Arc<dyn Tool>>>;

    /// Provider name for logging and debugging
    fn name(&self) -> &str;
}
