//! MCP Tool Adapter
//!
//! Adapts tools listed by an MCP server to the wizard's `Tool` trait

use anyhow::Result;
use async_trait::async_trait;
use rmcp::model::{CallToolResult, RawContent};
use serde_json::{Map, Value};
use std::sync::Arc;

use crate::tools::{ParamSpec, ParamType, Tool};

use super::server::MCPServer;

/// A remote tool that looks like a local one to the registry
pub struct MCPToolAdapter {
    server: Arc<MCPServer>,
    name: String,
    description: String,
    params: Vec<ParamSpec>,
}

impl MCPToolAdapter {
    pub fn new(server: Arc<MCPServer>, rmcp_tool: rmcp::model::Tool) -> Self {
        Self {
            server,
            name: rmcp_tool.name.to_string(),
            description: rmcp_tool.description.as_deref().unwrap_or("").to_string(),
            params: Self::convert_params(&rmcp_tool.input_schema),
        }
    }

    /// Read the parameter list back out of a JSON input schema
    ///
    /// Required parameters come first, in `required` order, then the
    /// remaining properties.
    fn convert_params(schema: &Map<String, Value>) -> Vec<ParamSpec> {
        let properties = schema.get("properties").and_then(Value::as_object);
        let required: Vec<&str> = schema
            .get("required")
            .and_then(Value::as_array)
            .map(|names| names.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default();

        let type_of = |name: &str| {
            properties
                .and_then(|p| p.get(name))
                .and_then(|p| p.get("type"))
                .and_then(Value::as_str)
                .map(ParamType::from_json_type)
                .unwrap_or(ParamType::Any)
        };

        let mut params: Vec<ParamSpec> = required
            .iter()
            .map(|name| ParamSpec::required(*name, type_of(*name)))
            .collect();

        if let Some(properties) = properties {
            params.extend(
                properties
                    .keys()
                    .filter(|name| !required.contains(&name.as_str()))
                    .map(|name| ParamSpec::optional(name.clone(), type_of(name.as_str()))),
            );
        }

        params
    }

    /// Turn the server's reply back into a payload or an error
    ///
    /// Text content that parses as JSON is returned as that value; anything
    /// else is returned as a string.
    fn convert_mcp_result(rmcp_result: CallToolResult) -> Result<Value> {
        let is_error = rmcp_result.is_error.unwrap_or(false);

        let mut text_parts = Vec::new();
        for content in &rmcp_result.content {
            match &content.raw {
                RawContent::Text(text_content) => text_parts.push(text_content.text.clone()),
                _ => text_parts.push(serde_json::to_string(content)?),
            }
        }
        let output = text_parts.join("\n");

        if is_error {
            anyhow::bail!("{}", output);
        }

        match serde_json::from_str(&output) {
            Ok(value) => Ok(value),
            Err(_) => Ok(Value::String(output)),
        }
    }
}

#[async_trait]
impl Tool for MCPToolAdapter {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn params(&self) -> Vec<ParamSpec> {
        self.params.clone()
    }

    async fn execute(&self, args: &Value) -> Result<Value> {
        tracing::info!(
            "[MCPToolAdapter] Executing '{}' on server '{}'",
            self.name,
            self.server.id()
        );

        let rmcp_result = self
            .server
            .call_tool(&self.name, args.as_object().cloned())
            .await?;

        Self::convert_mcp_result(rmcp_result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rmcp::model::Content;
    use serde_json::json;

    fn schema(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("schema must be an object"),
        }
    }

    #[test]
    fn test_params_from_schema() {
        let params = MCPToolAdapter::convert_params(&schema(json!({
            "type": "object",
            "properties": {
                "limit": {"type": "integer"},
                "tags": {"type": "array"},
                "topic": {"type": "string"}
            },
            "required": ["topic"]
        })));

        assert_eq!(
            params,
            vec![
                ParamSpec::required("topic", ParamType::String),
                ParamSpec::optional("limit", ParamType::Integer),
                ParamSpec::optional("tags", ParamType::Any),
            ]
        );
    }

    #[test]
    fn test_params_from_empty_schema() {
        assert!(MCPToolAdapter::convert_params(&schema(json!({"type": "object"}))).is_empty());
    }

    #[test]
    fn test_result_conversion() {
        let json_reply = CallToolResult::success(vec![Content::text(r#"{"joke":"ha"}"#)]);
        assert_eq!(
            MCPToolAdapter::convert_mcp_result(json_reply).unwrap(),
            json!({"joke": "ha"})
        );

        let plain_reply = CallToolResult::success(vec![Content::text("sunny")]);
        assert_eq!(
            MCPToolAdapter::convert_mcp_result(plain_reply).unwrap(),
            json!("sunny")
        );

        let failed = CallToolResult::error(vec![Content::text("timeout")]);
        let err = MCPToolAdapter::convert_mcp_result(failed).unwrap_err();
        assert_eq!(err.to_string(), "timeout");
    }
}
