pub mod config;
pub mod core;
pub mod http;
pub mod llm;
pub mod tools;

// Tool server split: client adapters and the stdio server
pub mod mcp;

// ReAct loop, decoder and review pass
pub mod agent;

// Terminal front end
pub mod cli;
pub mod logging;

#[cfg(test)]
mod test_support;
