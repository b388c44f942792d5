//! MCP Tool Provider
//!
//! Implements ToolProvider for a connected MCP tool server

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use crate::tools::{Tool, ToolProvider};

use super::server::MCPServer;
use super::tool_adapter::MCPToolAdapter;

/// Tool provider that lists its tools from an MCP server
pub struct MCPToolProvider {
    server: Arc<MCPServer>,
}

impl MCPToolProvider {
    pub fn new(server: Arc<MCPServer>) -> Self {
        Self { server }
    }
}

#[async_trait]
impl ToolProvider for MCPToolProvider {
    async fn get_tools(&self) -> Result<Vec<Arc<dyn Tool>>> {
        tracing::info!(
            "[MCPToolProvider] Fetching tools from '{}'",
            self.server.id()
        );

        let tools: Vec<Arc<dyn Tool>> = self
            .server
            .list_tools()
            .await?
            .into_iter()
            .map(|tool| Arc::new(MCPToolAdapter::new(self.server.clone(), tool)) as Arc<dyn Tool>)
            .collect();

        tracing::info!("[MCPToolProvider] Created {} tool adapters", tools.len());

        Ok(tools)
    }

    fn name(&self) -> &str {
        "mcp"
    }
}
