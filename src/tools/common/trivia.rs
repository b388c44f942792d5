//! Multiple-choice trivia via Open Trivia DB

use anyhow::Result;
use async_trait::async_trait;
use serde_json::{json, Value};

use super::super::tool::{ParamSpec, Tool};
use crate::http::HttpFetcher;

const DEFAULT_BASE_URL: &str = "https://opentdb.com";

/// Decode the HTML entities Open Trivia DB puts in its text fields.
///
/// Covers every named HTML5 entity plus decimal (`&#039;`) and hex
/// (`&#x27;`) references. Anything unrecognised is left as-is.
pub fn html_decode(s: &str) -> String {
    html_escape::decode_html_entities(s).into_owned()
}

/// `trivia()`: one multiple-choice question with decoded text
pub struct TriviaTool {
    http: HttpFetcher,
    base_url: String,
}

impl TriviaTool {
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
}

#[async_trait]
impl Tool for TriviaTool {
    fn name(&self) -> &str {
        "trivia"
    }

    fn description(&self) -> &str {
        "Return one multiple-choice trivia question."
    }

    fn params(&self) -> Vec<ParamSpec> {
        vec![]
    }

    async fn execute(&self, _args: &Value) -> Result<Value> {
        let url = format!("{}/api.php", self.base_url);
        let body = self
            .http
            .get_json(
                &url,
                &[("amount", "1".to_string()), ("type", "multiple".to_string())],
            )
            .await?;

        let first = body
            .get("results")
            .and_then(Value::as_array)
            .and_then(|r| r.first())
            .and_then(Value::as_object)
            .cloned();

        let Some(mut question) = first else {
            return Ok(json!({
                "error": "No trivia available right now, try again later."
            }));
        };

        for field in ["question", "correct_answer"] {
            if let Some(Value::String(text)) = question.get_mut(field) {
                *text = html_decode(text);
            }
        }
        if let Some(Value::Array(answers)) = question.get_mut("incorrect_answers") {
            for answer in answers.iter_mut() {
                if let Value::String(text) = answer {
                    *text = html_decode(text);
                }
            }
        }

        Ok(Value::Object(question))
    }
}
