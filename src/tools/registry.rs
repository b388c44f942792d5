//! Tool registry for managing available tools
//!
//! The registry holds all tools that are available to the agent. Tools are
//! registered directly or pulled from a provider at startup; after that the
//! registry is shared read-only for the rest of the session.

use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde_json::Value;

use super::provider::ToolProvider;
use super::tool::{Tool, ToolSchema};

/// Registry that holds all available tools
pub struct ToolRegistry {
    /// Tools keyed by name, kept sorted for a stable catalog
    tools: BTreeMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    /// Create a new empty tool registry
    pub fn new() -> Self {
        Self {
            tools: BTreeMap::new(),
        }
    }

    /// Register a tool in the registry
    pub fn register<T: Tool + 'static>(&mut self, tool: T) {
        self.register_arc(Arc::new(tool));
    }

    fn register_arc(&mut self, tool: Arc<dyn Tool>) {
        let name = tool.name().to_string();
        tracing::info!("Registering tool: {}", name);
        if self.tools.insert(name.clone(), tool).is_some() {
            tracing::warn!("Tool '{}' replaced an earlier registration", name);
        }
    }

    /// Add every tool from a provider
    ///
    /// Returns an error if any tool name conflicts with an existing tool.
    pub async fn add_provider(&mut self, provider: &dyn ToolProvider) -> Result<()> {
        tracing::info!("[ToolRegistry] Adding provider '{}'", provider.name());

        for tool in provider.get_tools().await? {
            let name = tool.name().to_string();
            if self.tools.contains_key(&name) {
                anyhow::bail!(
                    "Tool name conflict: '{}' already exists (from provider '{}')",
                    name,
                    provider.name()
                );
            }
            self.register_arc(tool);
        }

        Ok(())
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    /// Check if a tool is registered
    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Introspection data for every tool, sorted by name
    pub fn schemas(&self) -> Vec<ToolSchema> {
        self.tools.values().map(|t| t.schema()).collect()
    }

    /// Render the tool catalog embedded in the system prompt
    ///
    /// One line per tool:
    /// ```text
    ///   - book_recs(topic: string, limit?: integer) : Simple book suggestions...
    /// ```
    pub fn catalog(&self) -> String {
        self.schemas()
            .iter()
            .map(|s| format!("  - {} : {}", s.signature(), s.description.trim()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Execute a tool by name
    pub async fn execute(&self, name: &str, args: &Value) -> Result<Value> {
        let tool = self
            .tools
            .get(name)
            .with_context(|| format!("Tool not found: {}", name))?;

        tracing::info!("Executing tool: {}", name);
        tracing::debug!("Args: {}", args);

        let payload = tool.execute(args).await?;

        tracing::debug!("Tool {} returned: {}", name, payload);

        Ok(payload)
    }

    /// Get the list of tool names, sorted
    pub fn tool_names(&self) -> Vec<&str> {
        self.tools.keys().map(|s| s.as_str()).collect()
    }

    /// Get the number of registered tools
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::{ParamSpec, ParamType};
    use async_trait::async_trait;
    use serde_json::json;

    struct Echo;

    #[async_trait]
    impl Tool for Echo {
        fn name(&self) -> &str {
            "echo"
        }

        fn description(&self) -> &str {
            "Echo the input back. "
        }

        fn params(&self) -> Vec<ParamSpec> {
            vec![ParamSpec::required("text", ParamType::String)]
        }

        async fn execute(&self, args: &Value) -> Result<Value> {
            Ok(json!({ "echo": args["text"] }))
        }
    }

    struct Ping;

    #[async_trait]
    impl Tool for Ping {
        fn name(&self) -> &str {
            "ping"
        }

        fn description(&self) -> &str {
            "Pong."
        }

        fn params(&self) -> Vec<ParamSpec> {
            vec![]
        }

        async fn execute(&self, _args: &Value) -> Result<Value> {
            Ok(json!("pong"))
        }
    }

    #[test]
    fn test_empty_registry() {
        let registry = ToolRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
        assert!(registry.get("nonexistent").is_none());
    }

    #[test]
    fn test_catalog_is_sorted_and_typed() {
        let mut registry = ToolRegistry::new();
        registry.register(Ping);
        registry.register(Echo);

        assert_eq!(registry.tool_names(), vec!["echo", "ping"]);
        assert_eq!(
            registry.catalog(),
            "  - echo(text: string) : Echo the input back.\n  - ping() : Pong."
        );
    }

    #[tokio::test]
    async fn test_execute() {
        let mut registry = ToolRegistry::new();
        registry.register(Echo);

        let out = registry.execute("echo", &json!({"text": "hi"})).await.unwrap();
        assert_eq!(out, json!({"echo": "hi"}));

        let err = registry.execute("missing", &json!({})).await.unwrap_err();
        assert!(err.to_string().contains("Tool not found: missing"));
    }
}
