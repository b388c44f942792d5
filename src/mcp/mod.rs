//! MCP (Model Context Protocol) support
//!
//! The tools live in a separate server process and the agent talks to it
//! over stdio, so the tool set can be swapped without touching the loop.
//!
//! # Architecture
//!
//! - `MCPServer`: client connection to one tool server (spawned child or any transport)
//! - `MCPToolAdapter`: adapts a remote tool to the `Tool` trait
//! - `MCPToolProvider`: implements `ToolProvider` so the registry can pull remote tools
//! - `MCPToolService`: the other end, serving a `ToolRegistry` over MCP
//!
//! # Usage
//!
//! ```ignore
//! use weekend_wizard::mcp::{MCPServer, MCPToolProvider};
//!
//! let server = Arc::new(MCPServer::spawn("fun_tools", &command).await?);
//! registry.add_provider(&MCPToolProvider::new(server)).await?;
//! ```
//!
//! Remote tools keep their own names: the catalog the model sees is the
//! same whether tools run in-process or behind a server.

mod provider;
mod server;
mod service;
mod tool_adapter;

pub use provider::MCPToolProvider;
pub use server::MCPServer;
pub use service::{serve_stdio, MCPToolService};
pub use tool_adapter::MCPToolAdapter;
