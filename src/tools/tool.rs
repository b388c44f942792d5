//! Tool trait definition
//!
//! All tools implement this trait to provide a consistent interface.

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// JSON type of a tool parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    String,
    Number,
    Integer,
    Boolean,
    /// Untyped, or a type the catalog cannot name
    Any,
}

impl ParamType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParamType::String => "string",
            ParamType::Number => "number",
            ParamType::Integer => "integer",
            ParamType::Boolean => "boolean",
            ParamType::Any => "any",
        }
    }

    /// Map a JSON-schema `type` keyword
    pub fn from_json_type(name: &str) -> Self {
        match name {
            "string" => ParamType::String,
            "number" => ParamType::Number,
            "integer" => ParamType::Integer,
            "boolean" => ParamType::Boolean,
            _ => ParamType::Any,
        }
    }
}

/// One declared tool parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamSpec {
    pub name: String,
    pub param_type: ParamType,
    pub required: bool,
}

impl ParamSpec {
    /// A parameter the caller must supply
    pub fn required(name: impl Into<String>, param_type: ParamType) -> Self {
        Self {
            name: name.into(),
            param_type,
            required: true,
        }
    }

    /// A parameter with a default on the tool side
    pub fn optional(name: impl Into<String>, param_type: ParamType) -> Self {
        Self {
            name: name.into(),
            param_type,
            required: false,
        }
    }
}

/// Introspection data for a tool: name, typed parameters, description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolSchema {
    pub name: String,
    pub description: String,
    pub params: Vec<ParamSpec>,
}

impl ToolSchema {
    /// Typed signature, optional parameters marked with `?`
    ///
    /// ```text
    /// book_recs(topic: string, limit?: integer)
    /// ```
    pub fn signature(&self) -> String {
        let params = self
            .params
            .iter()
            .map(|p| {
                let marker = if p.required { "" } else { "?" };
                format!("{}{}: {}", p.name, marker, p.param_type.as_str())
            })
            .collect::<Vec<_>>()
            .join(", ");
        format!("{}({})", self.name, params)
    }

    /// JSON-schema object describing the inputs, as advertised over MCP
    pub fn input_schema(&self) -> Map<String, Value> {
        let properties: Map<String, Value> = self
            .params
            .iter()
            .map(|p| {
                let property = match p.param_type {
                    ParamType::Any => json!({}),
                    other => json!({ "type": other.as_str() }),
                };
                (p.name.clone(), property)
            })
            .collect();
        let required: Vec<&str> = self
            .params
            .iter()
            .filter(|p| p.required)
            .map(|p| p.name.as_str())
            .collect();

        let mut schema = Map::new();
        schema.insert("type".to_string(), json!("object"));
        schema.insert("properties".to_string(), Value::Object(properties));
        schema.insert("required".to_string(), json!(required));
        schema
    }
}

/// Observation produced by one tool invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResult {
    /// Structured payload handed back to the model
    pub payload: Value,
    /// Whether the payload describes a failure
    pub is_error: bool,
}

impl ToolResult {
    /// Wrap a tool payload; an object with an `error` key counts as a failure
    pub fn success(payload: Value) -> Self {
        let is_error = payload.get("error").is_some();
        Self { payload, is_error }
    }

    /// Create an error result with an `{"error": message}` payload
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            payload: json!({ "error": message.into() }),
            is_error: true,
        }
    }

    /// Payload rendered for the conversation history
    pub fn to_observation(&self) -> String {
        self.payload.to_string()
    }
}

/// Trait for tools that the agent can use
#[async_trait]
pub trait Tool: Send + Sync {
    /// Get the name of this tool
    fn name(&self) -> &str;

    /// Get a one-line description of this tool
    fn description(&self) -> &str;

    /// Declared parameters, in signature order
    fn params(&self) -> Vec<ParamSpec>;

    /// Full introspection data for the tool catalog
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: self.name().to_string(),
            description: self.description().to_string(),
            params: self.params(),
        }
    }

    /// Execute the tool with the given arguments
    ///
    /// Domain failures (no match, empty upstream result) come back as an
    /// `Ok` payload with an `error` key; transport and argument failures are
    /// returned as `Err`.
    async fn execute(&self, args: &Value) -> Result<Value>;
}

/// Deserializers that accept numbers sent as strings, which models often do
pub(crate) mod lenient {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(f64),
        Text(String),
    }

    pub fn f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        match NumberOrString::deserialize(deserializer)? {
            NumberOrString::Number(n) => Ok(n),
            NumberOrString::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
        }
    }

    pub fn opt_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = match Option::<NumberOrString>::deserialize(deserializer)? {
            None => return Ok(None),
            Some(NumberOrString::Number(n)) => n,
            Some(NumberOrString::Text(s)) => s.trim().parse().map_err(serde::de::Error::custom)?,
        };
        if value < 0.0 || value.fract() != 0.0 || value > f64::from(u32::MAX) {
            return Err(serde::de::Error::custom(format!(
                "expected a non-negative integer, got {}",
                value
            )));
        }
        Ok(Some(value as u32))
    }
}
