//! MCP tool server
//!
//! Serves every tool of a `ToolRegistry` to MCP clients. Tool failures are
//! reported as error results so the client can turn them into observations;
//! only an unknown tool name is a protocol error.

use anyhow::Result;
use rmcp::model::{
    CallToolRequestParams, CallToolResult, Content, ListToolsResult, PaginatedRequestParams,
    ServerCapabilities, ServerInfo, Tool as McpTool,
};
use rmcp::service::RequestContext;
use rmcp::{ErrorData, RoleServer, ServerHandler, ServiceExt};
use serde_json::{Map, Value};
use std::sync::Arc;

use crate::tools::ToolRegistry;

const INSTRUCTIONS: &str =
    "Weekend helper tools: weather, geocoding, book search, jokes, dog photos and trivia.";

/// Server-side handler backed by a read-only tool registry
#[derive(Clone)]
pub struct MCPToolService {
    registry: Arc<ToolRegistry>,
}

impl MCPToolService {
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self { registry }
    }

    fn tool_list(&self) -> Vec<McpTool> {
        self.registry
            .schemas()
            .into_iter()
            .map(|schema| {
                let input_schema = Arc::new(schema.input_schema());
                McpTool::new(schema.name, schema.description, input_schema)
            })
            .collect()
    }

    async fn run_tool(
        &self,
        name: &str,
        arguments: Option<Map<String, Value>>,
    ) -> Result<CallToolResult, ErrorData> {
        let tool = self.registry.get(name).ok_or_else(|| {
            ErrorData::invalid_params(format!("Tool '{}' does not exist", name), None)
        })?;

        let args = Value::Object(arguments.unwrap_or_default());
        tracing::info!("[MCPToolService] Executing '{}'", name);
        tracing::debug!("[MCPToolService] Args: {}", args);

        match tool.execute(&args).await {
            Ok(payload) => Ok(CallToolResult::success(vec![Content::text(
                payload.to_string(),
            )])),
            Err(e) => {
                tracing::warn!("[MCPToolService] Tool '{}' failed: {:#}", name, e);
                Ok(CallToolResult::error(vec![Content::text(format!("{:#}", e))]))
            }
        }
    }
}

impl ServerHandler for MCPToolService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            instructions: Some(INSTRUCTIONS.to_string()),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, ErrorData> {
        Ok(ListToolsResult::with_all_items(self.tool_list()))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        self.run_tool(&request.name, request.arguments).await
    }
}

/// Serve `registry` on stdin/stdout until the client disconnects
pub async fn serve_stdio(registry: Arc<ToolRegistry>) -> Result<()> {
    tracing::info!("[MCPToolService] Serving {} tools on stdio", registry.len());

    let running = MCPToolService::new(registry)
        .serve(rmcp::transport::stdio())
        .await?;
    let reason = running.waiting().await?;

    tracing::info!("[MCPToolService] Client disconnected: {:?}", reason);
    Ok(())
}
