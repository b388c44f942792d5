//! Book suggestions via Open Library search

use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

use super::super::tool::{lenient, ParamSpec, ParamType, Tool};
use crate::http::HttpFetcher;

const DEFAULT_BASE_URL: &str = "https://openlibrary.org";

const DEFAULT_LIMIT: u32 = 5;

#[derive(Debug, Deserialize)]
struct BookInput {
    topic: String,
    #[serde(default, deserialize_with = "lenient::opt_u32")]
    limit: Option<u32>,
}

/// `book_recs(topic, limit=5)`: title, first author, first publish year, link
pub struct BookRecsTool {
    http: HttpFetcher,
    base_url: String,
}

impl BookRecsTool {
    pub fn new(http: HttpFetcher) -> Self {
        Self {
            http,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn pick(&self, doc: &Value) -> Value {
        let author = doc
            .get("author_name")
            .and_then(Value::as_array)
            .and_then(|names| names.first())
            .cloned()
            .unwrap_or_else(|| Value::String("Unknown".to_string()));
        let key = doc.get("key").and_then(Value::as_str).unwrap_or("");

        // Links always point at the public site, even when searching a mirror
        json!({
            "title": doc.get("title"),
            "author": author,
            "year": doc.get("first_publish_year"),
            "link": format!("{}{}", DEFAULT_BASE_URL, key),
        })
    }
}

#[async_trait]
impl Tool for BookRecsTool {
    fn name(&self) -> &str {
        "book_recs"
    }

    fn description(&self) -> &str {
        "Simple book suggestions for a topic via Open Library search (no key needed)."
    }

    fn params(&self) -> Vec<ParamSpec> {
        vec![
            ParamSpec::required("topic", ParamType::String),
            ParamSpec::optional("limit", ParamType::Integer),
        ]
    }

    async fn execute(&self, args: &Value) -> Result<Value> {
        let input: BookInput = serde_json::from_value(args.clone())
            .map_err(|e| anyhow::anyhow!("Invalid book_recs input: {}", e))?;
        let limit = input.limit.unwrap_or(DEFAULT_LIMIT);

        let url = format!("{}/search.json", self.base_url);
        let body = self
            .http
            .get_json(
                &url,
                &[("q", input.topic.clone()), ("limit", limit.to_string())],
            )
            .await?;

        let picks: Vec<Value> = body
            .get("docs")
            .and_then(Value::as_array)
            .map(|docs| {
                docs.iter()
                    .take(limit as usize)
                    .map(|d| self.pick(d))
                    .collect()
            })
            .unwrap_or_default();

        Ok(json!({ "topic": input.topic, "results": picks }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::serve;
    use axum::{routing::get, Json, Router};

    async fn search() -> Json<Value> {
        Json(json!({
            "numFound": 3,
            "docs": [
                {
                    "key": "/works/OL472073W",
                    "title": "The Hound of the Baskervilles",
                    "author_name": ["Arthur Conan Doyle", "Someone Else"],
                    "first_publish_year": 1902
                },
                {
                    "key": "/works/OL1W",
                    "title": "Anonymous Mysteries"
                },
                {
                    "key": "/works/OL2W",
                    "title": "Third Book",
                    "author_name": ["C. Writer"]
                }
            ]
        }))
    }

    async fn tool() -> BookRecsTool {
        let base = serve(Router::new().route("/search.json", get(search))).await;
        BookRecsTool::new(HttpFetcher::new().unwrap()).with_base_url(base)
    }

    #[tokio::test]
    async fn test_book_recs_shapes_results() {
        let out = tool()
            .await
            .execute(&json!({"topic": "mystery"}))
            .await
            .unwrap();

        assert_eq!(out["topic"], "mystery");
        let results = out["results"].as_array().unwrap();
        assert_eq!(results.len(), 3);
        assert_eq!(results[0]["author"], "Arthur Conan Doyle");
        assert_eq!(results[0]["year"], 1902);
        assert_eq!(
            results[0]["link"],
            "https://openlibrary.org/works/OL472073W"
        );
        assert_eq!(results[1]["author"], "Unknown");
        assert!(results[1]["year"].is_null());
    }

    #[tokio::test]
    async fn test_book_recs_respects_limit() {
        let out = tool()
            .await
            .execute(&json!({"topic": "mystery", "limit": 1}))
            .await
            .unwrap();
        assert_eq!(out["results"].as_array().unwrap().len(), 1);
    }
}
