//! Built-in weekend tools
//!
//! Every tool wraps one free, keyless public API:
//! - `WeatherTool` - Current conditions from Open-Meteo
//! - `CityToCoordsTool` - City geocoding from Open-Meteo
//! - `BookRecsTool` - Open Library search
//! - `RandomJokeTool` - JokeAPI
//! - `RandomDogTool` - Dog CEO
//! - `TriviaTool` - Open Trivia DB

pub mod books;
pub mod fun;
pub mod geocoding;
pub mod trivia;
pub mod weather;

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use super::provider::ToolProvider;
use super::tool::Tool;
use crate::http::HttpFetcher;

pub use books::BookRecsTool;
pub use fun::{RandomDogTool, RandomJokeTool};
pub use geocoding::CityToCoordsTool;
pub use trivia::TriviaTool;
pub use weather::WeatherTool;

/// Provider for the six built-in tools, all sharing one HTTP fetcher
pub struct FunToolsProvider {
    http: HttpFetcher,
}

impl FunToolsProvider {
    pub fn new(http: HttpFetcher) -> Self {
        Self { http }
    }
}

#[async_trait]
impl ToolProvider for FunToolsProvider {
    async fn get_tools(&self) -> Result<Vec<Arc<dyn Tool>>> {
        let http = &self.http;
        Ok(vec![
            Arc::new(WeatherTool::new(http.clone())),
            Arc::new(CityToCoordsTool::new(http.clone())),
            Arc::new(BookRecsTool::new(http.clone())),
            Arc::new(RandomJokeTool::new(http.clone())),
            Arc::new(RandomDogTool::new(http.clone())),
            Arc::new(TriviaTool::new(http.clone())),
        ])
    }

    fn name(&self) -> &str {
        "fun_tools"
    }
}
