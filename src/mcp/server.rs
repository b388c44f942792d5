//! MCP server connection
//!
//! Wraps the rmcp client service talking to one tool server

use anyhow::{Context, Result};
use rmcp::model::{CallToolRequestParams, CallToolResult, ListToolsResult, Tool};
use rmcp::service::RunningService;
use rmcp::transport::TokioChildProcess;
use rmcp::{RoleClient, ServiceExt};
use serde_json::{Map, Value};

use crate::config::ToolServerCommand;

/// Client side of a connection to an MCP tool server
pub struct MCPServer {
    /// Identifier used in logs
    id: String,

    /// The underlying rmcp service
    service: RunningService<RoleClient, ()>,
}

impl std::fmt::Debug for MCPServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MCPServer").field("id", &self.id).finish()
    }
}

impl MCPServer {
    /// Start the tool server as a child process and connect over its stdio
    pub async fn spawn(id: impl Into<String>, command: &ToolServerCommand) -> Result<Self> {
        let id = id.into();
        tracing::info!("[MCPServer] Starting '{}': {}", id, command);

        let mut child = tokio::process::Command::new(&command.program);
        child.args(&command.args);

        let transport = TokioChildProcess::new(child)
            .with_context(|| format!("Failed to start tool server '{}'", command))?;
        let service = ().serve(transport).await.with_context(|| {
            format!("Tool server '{}' did not complete the MCP handshake", command)
        })?;

        Ok(Self::from_service(id, service))
    }

    /// Wrap an already connected rmcp service
    pub fn from_service(id: impl Into<String>, service: RunningService<RoleClient, ()>) -> Self {
        let id = id.into();
        tracing::info!("[MCPServer] Connected to '{}'", id);
        Self { id, service }
    }

    /// Get the server ID
    pub fn id(&self) -> &str {
        &self.id
    }

    /// List all tools available on this server
    pub async fn list_tools(&self) -> Result<Vec<Tool>> {
        tracing::debug!("[MCPServer] Listing tools from '{}'", self.id);

        let result: ListToolsResult = self.service.list_tools(Default::default()).await?;

        tracing::info!(
            "[MCPServer] Got {} tools from '{}'",
            result.tools.len(),
            self.id
        );

        Ok(result.tools)
    }

    /// Call a tool on this server
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: Option<Map<String, Value>>,
    ) -> Result<CallToolResult> {
        tracing::info!("[MCPServer] Calling tool '{}' on '{}'", name, self.id);
        tracing::debug!("[MCPServer] Arguments: {:?}", arguments);

        let result = self
            .service
            .call_tool(CallToolRequestParams {
                meta: None,
                name: name.to_string().into(),
                arguments,
                task: None,
            })
            .await?;

        Ok(result)
    }
}
