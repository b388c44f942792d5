use std::sync::Arc;

use weekend_wizard::agent::{system_prompt, Agent, AgentConfig};
use weekend_wizard::cli::{run_session, Console};
use weekend_wizard::config::{LaunchMode, ToolServerCommand, WizardConfig};
use weekend_wizard::http::HttpFetcher;
use weekend_wizard::llm::{LlmProvider, OllamaProvider};
use weekend_wizard::logging;
use weekend_wizard::mcp::{self, MCPServer, MCPToolProvider};
use weekend_wizard::tools::{FunToolsProvider, ToolRegistry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let this_binary = std::env::current_exe()?;

    match LaunchMode::from_args(std::env::args().skip(1), &this_binary) {
        LaunchMode::ServeTools => serve_tools().await,
        LaunchMode::Agent { tool_server } => run_agent(tool_server).await,
    }
}

/// `weekend-wizard serve`: the built-in tools over MCP on stdio
async fn serve_tools() -> anyhow::Result<()> {
    let log_guard = logging::init_logging(logging::TOOL_SERVER_LOG_FILE)?;

    tracing::info!("=== Weekend Wizard Tool Server Starting ===");

    let mut registry = ToolRegistry::new();
    registry
        .add_provider(&FunToolsProvider::new(HttpFetcher::new()?))
        .await?;

    let result = mcp::serve_stdio(Arc::new(registry)).await;

    tracing::info!("=== Weekend Wizard Tool Server Shutting Down ===");
    drop(log_guard);
    result
}

async fn run_agent(tool_server: ToolServerCommand) -> anyhow::Result<()> {
    // Keep the guard alive so buffered log lines are flushed on exit
    let log_guard = logging::init_logging(logging::AGENT_LOG_FILE)?;

    tracing::info!("=== Weekend Wizard Starting ===");

    let console = Console::new();
    let config = WizardConfig::from_env()?;

    let llm = OllamaProvider::from_config(&config);
    if let Err(e) = llm.health_check().await {
        tracing::error!("Model service unreachable: {}", e);
        console.print_unreachable(&config.host, &config.model);
        drop(log_guard);
        std::process::exit(1);
    }
    tracing::info!("Connected to {} at {} (model {})", llm.provider_name(), config.host, llm.model());

    let server = match MCPServer::spawn("fun_tools", &tool_server).await {
        Ok(server) => Arc::new(server),
        Err(e) => {
            tracing::error!("Tool server unavailable: {:#}", e);
            console.print_error(&format!("{:#}", e));
            drop(log_guard);
            std::process::exit(1);
        }
    };

    let mut registry = ToolRegistry::new();
    registry.add_provider(&MCPToolProvider::new(server)).await?;
    tracing::info!("Registered {} tools", registry.len());

    let agent_config = AgentConfig::from_wizard_config(system_prompt(&registry.catalog()), &config);
    let agent = Agent::new(Arc::new(llm), Arc::new(registry), agent_config);

    console.print_banner(&config.model, &config.host, &agent.tools().tool_names());

    let result = run_session(&agent, &console).await;
    console.print_goodbye();

    match &result {
        Ok(end) => tracing::info!("=== Weekend Wizard Shutting Down ({:?}) ===", end),
        Err(e) => tracing::error!("=== Weekend Wizard Shutting Down: {} ===", e),
    }
    drop(log_guard);
    result?;
    Ok(())
}
