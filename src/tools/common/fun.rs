//! Light-hearted extras: a joke and a dog photo

use anyhow::Result;
use async_trait::async_trait;
use serde_json::{json, Value};

use super::super::tool::{ParamSpec, Tool};
use crate::http::HttpFetcher;

const JOKE_BASE_URL: &str = "https://v2.jokeapi.dev";
const DOG_BASE_URL: &str = "https://dog.ceo";

/// Joke used when the upstream payload has none
pub const FALLBACK_JOKE: &str =
    "Why do programmers prefer dark mode? Because light attracts bugs!";

/// `random_joke()`: one safe, family-friendly single-line joke (JokeAPI)
pub struct RandomJokeTool {
    http: HttpFetcher,
    base_url: String,
}

impl RandomJokeTool {
    pub fn new(http: HttpFetcher) -> Self {
        Self {
            http,
            base_url: JOKE_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl Tool for RandomJokeTool {
    fn name(&self) -> &str {
        "random_joke"
    }

    fn description(&self) -> &str {
        "Return a safe, family-friendly single-line joke."
    }

    fn params(&self) -> Vec<ParamSpec> {
        vec![]
    }

    async fn execute(&self, _args: &Value) -> Result<Value> {
        let url = format!("{}/joke/Any?type=single&safe-mode", self.base_url);
        let body = self.http.get_json(&url, &[]).await?;

        let joke = body
            .get("joke")
            .and_then(Value::as_str)
            .unwrap_or(FALLBACK_JOKE);

        Ok(json!({ "joke": joke }))
    }
}

/// `random_dog()`: a random dog image URL (Dog CEO)
pub struct RandomDogTool {
    http: HttpFetcher,
    base_url: String,
}

impl RandomDogTool {
    pub fn new(http: HttpFetcher) -> Self {
        Self {
            http,
            base_url: DOG_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl Tool for RandomDogTool {
    fn name(&self) -> &str {
        "random_dog"
    }

    fn description(&self) -> &str {
        "Return a random dog image URL for good weekend vibes."
    }

    fn params(&self) -> Vec<ParamSpec> {
        vec![]
    }

    async fn execute(&self, _args: &Value) -> Result<Value> {
        let url = format!("{}/api/breeds/image/random", self.base_url);
        Ok(self.http.get_json(&url, &[]).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::serve;
    use axum::{extract::Query, routing::get, Json, Router};
    use std::collections::HashMap;

    async fn joke(Query(q): Query<HashMap<String, String>>) -> Json<Value> {
        assert_eq!(q.get("type").map(String::as_str), Some("single"));
        Json(json!({"error": false, "type": "single", "joke": "I told a chemistry joke. No reaction."}))
    }

    async fn empty_joke() -> Json<Value> {
        Json(json!({"error": true, "message": "No matching joke found"}))
    }

    async fn dog() -> Json<Value> {
        Json(json!({
            "message": "https://images.dog.ceo/breeds/hound-afghan/n02088094_1003.jpg",
            "status": "success"
        }))
    }

    #[tokio::test]
    async fn test_random_joke() {
        let base = serve(Router::new().route("/joke/Any", get(joke))).await;
        let tool = RandomJokeTool::new(HttpFetcher::new().unwrap()).with_base_url(base);

        let out = tool.execute(&json!({})).await.unwrap();
        assert_eq!(out["joke"], "I told a chemistry joke. No reaction.");
    }

    #[tokio::test]
    async fn test_random_joke_fallback() {
        let base = serve(Router::new().route("/joke/Any", get(empty_joke))).await;
        let tool = RandomJokeTool::new(HttpFetcher::new().unwrap()).with_base_url(base);

        let out = tool.execute(&json!({})).await.unwrap();
        assert_eq!(out, json!({ "joke": FALLBACK_JOKE }));
    }

    #[tokio::test]
    async fn test_random_dog_passes_payload_through() {
        let base = serve(Router::new().route("/api/breeds/image/random", get(dog))).await;
        let tool = RandomDogTool::new(HttpFetcher::new().unwrap()).with_base_url(base);

        let out = tool.execute(&json!({})).await.unwrap();
        assert_eq!(out["status"], "success");
        assert!(out["message"].as_str().unwrap().starts_with("https://images.dog.ceo/"));
    }
}
