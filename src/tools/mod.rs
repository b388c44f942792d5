//! Tool system for the wizard
//!
//! This module provides:
//! - `Tool` trait - Interface for implementing tools
//! - `ToolSchema` / `ParamSpec` - Introspection data rendered into the prompt
//! - `ToolResult` - Observation produced by a tool call
//! - `ToolRegistry` - Registry for managing available tools
//! - `ToolProvider` trait - Interface for batches of tools added at startup
//! - `common` - Built-in tools (weather, geocoding, books, joke, dog, trivia)

mod provider;
mod registry;
mod tool;

/// Common/built-in tools
pub mod common;

// Core exports
pub use provider::ToolProvider;
pub use registry::ToolRegistry;
pub use tool::{ParamSpec, ParamType, Tool, ToolResult, ToolSchema};

// Re-export common tools for convenience
pub use common::{
    BookRecsTool, CityToCoordsTool, FunToolsProvider, RandomDogTool, RandomJokeTool, TriviaTool,
    WeatherTool,
};
