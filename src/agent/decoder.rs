//! Action Decoder
//!
//! Turns free-form model text into a [`Decision`]. Extraction tries, in order:
//! 1. the whole trimmed text as a JSON object
//! 2. the first fenced code block (optionally tagged `json`)
//! 3. a brace-depth scan over every `{` position
//!
//! If none of those yields an object with an `action` key, one repair request
//! is sent at temperature 0. If that fails too, the raw text becomes the final
//! answer. Decoding never fails on malformed model output.

use std::sync::{Arc, OnceLock};

use regex::Regex;
use serde_json::{json, Map, Value};

use crate::llm::{LlmError, LlmProvider, Message, SamplingOptions};

const REPAIR_PROMPT: &str = r#"Convert the text below into a single valid JSON with an "action" key. Tool call format: {"action":"tool_name","args":{...}} Final answer format: {"action":"final","answer":"..."} Output ONLY the JSON."#;

/// The model's next move, as decided by [`ActionDecoder`]
#[derive(Debug, Clone, PartialEq)]
pub enum Decision {
    /// Invoke a tool with the given arguments
    ToolCall {
        name: String,
        args: Map<String, Value>,
    },
    /// Stop and answer the user
    Final { answer: String },
}

impl Decision {
    /// Build a decision from an extracted object
    ///
    /// Returns `None` when the object has no `action` key. A non-string
    /// action is kept as its JSON text so it surfaces as an unknown tool.
    pub fn from_object(object: &Map<String, Value>) -> Option<Self> {
        let action = object.get("action")?;

        if action.as_str() == Some("final") {
            let answer = match object.get("answer") {
                None | Some(Value::Null) => String::new(),
                Some(Value::String(s)) => s.clone(),
                Some(other) => other.to_string(),
            };
            return Some(Decision::Final { answer });
        }

        let name = match action {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        let args = match object.get("args") {
            Some(Value::Object(map)) => map.clone(),
            _ => Map::new(),
        };

        Some(Decision::ToolCall { name, args })
    }

    /// Wire form appended to the history as the assistant's turn
    pub fn to_json(&self) -> Value {
        match self {
            Decision::ToolCall { name, args } => json!({ "action": name, "args": args }),
            Decision::Final { answer } => json!({ "action": "final", "answer": answer }),
        }
    }
}

fn fence_pattern() -> Option<&'static Regex> {
    static FENCE: OnceLock<Option<Regex>> = OnceLock::new();
    FENCE
        .get_or_init(|| Regex::new(r"(?s)```(?:json)?\s*(\{.*?\})\s*```").ok())
        .as_ref()
}

fn parse_object(text: &str) -> Option<Map<String, Value>> {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}

/// Pull the first JSON object out of model text
pub fn extract_json(text: &str) -> Option<Map<String, Value>> {
    let text = text.trim();

    if let Some(map) = parse_object(text) {
        return Some(map);
    }

    if let Some(caps) = fence_pattern().and_then(|re| re.captures(text)) {
        if let Some(map) = caps.get(1).and_then(|m| parse_object(m.as_str())) {
            return Some(map);
        }
    }

    scan_balanced(text)
}

/// Brace-depth scan. Braces are ASCII, so byte offsets are char boundaries.
fn scan_balanced(text: &str) -> Option<Map<String, Value>> {
    let bytes = text.as_bytes();

    for (start, _) in text.match_indices('{') {
        let mut depth = 0usize;
        for (offset, &b) in bytes[start..].iter().enumerate() {
            match b {
                b'{' => depth += 1,
                b'}' => {
                    depth -= 1;
                    if depth == 0 {
                        let end = start + offset + 1;
                        if let Some(map) = parse_object(&text[start..end]) {
                            return Some(map);
                        }
                        break;
                    }
                }
                _ => {}
            }
        }
    }

    None
}

/// Asks the model for its next action and decodes the reply
pub struct ActionDecoder {
    llm: Arc<dyn LlmProvider>,
    options: SamplingOptions,
}

impl ActionDecoder {
    pub fn new(llm: Arc<dyn LlmProvider>, options: SamplingOptions) -> Self {
        Self { llm, options }
    }

    /// Request a decision for the current history
    ///
    /// Only the first request can fail the call. A failed repair request
    /// degrades to the raw-text answer like an unparseable repair would.
    pub async fn decide(&self, messages: &[Message]) -> Result<Decision, LlmError> {
        let raw = self.llm.complete(messages, self.options).await?;
        tracing::debug!("[ActionDecoder] Raw reply: {}", raw);

        if let Some(decision) = extract_json(&raw).as_ref().and_then(Decision::from_object) {
            return Ok(decision);
        }

        tracing::info!("[ActionDecoder] No action in reply, requesting repair");
        if let Some(decision) = self.repair(&raw).await {
            return Ok(decision);
        }

        tracing::warn!("[ActionDecoder] Repair failed, using raw text as final answer");
        Ok(Decision::Final { answer: raw })
    }

    async fn repair(&self, raw: &str) -> Option<Decision> {
        let messages = [Message::system(REPAIR_PROMPT), Message::user(raw)];

        match self
            .llm
            .complete(&messages, self.options.deterministic())
            .await
        {
            Ok(repaired) => {
                tracing::debug!("[ActionDecoder] Repaired reply: {}", repaired);
                extract_json(&repaired)
                    .as_ref()
                    .and_then(Decision::from_object)
            }
            Err(e) => {
                tracing::warn!("[ActionDecoder] Repair request failed: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::Role;
    use crate::test_support::ScriptedLlm;

    fn decoder(llm: &ScriptedLlm) -> ActionDecoder {
        ActionDecoder::new(Arc::new(llm.clone()), SamplingOptions::default())
    }

    #[test]
    fn test_extract_direct() {
        let map = extract_json(r#"  {"action": "final", "answer": "hi"}  "#).unwrap();
        assert_eq!(map["answer"], "hi");
    }

    #[test]
    fn test_extract_fenced() {
        let text = "Sure!\n```json\n{\"action\": \"random_dog\", \"args\": {}}\n```\nDone.";
        assert_eq!(extract_json(text).unwrap()["action"], "random_dog");

        let untagged = "```\n{\"action\": \"trivia\"}\n```";
        assert_eq!(extract_json(untagged).unwrap()["action"], "trivia");
    }

    #[test]
    fn test_extract_embedded_with_nesting() {
        let text = r#"I'll check. {"action": "get_weather", "args": {"latitude": 1, "longitude": 2}} ok"#;
        let map = extract_json(text).unwrap();
        assert_eq!(map["args"]["longitude"], 2);
    }

    #[test]
    fn test_extract_skips_unparseable_candidates() {
        // The first balanced span is not JSON; the scan moves on to the next `{`
        let text = r#"{not json} then {"action": "trivia"}"#;
        assert_eq!(extract_json(text).unwrap()["action"], "trivia");
    }

    #[test]
    fn test_extract_takes_first_not_largest() {
        let text = r#"{"a": 1} and {"action": "final", "answer": "longer object"}"#;
        let map = extract_json(text).unwrap();
        assert_eq!(map.get("a"), Some(&json!(1)));
        assert!(map.get("action").is_none());
    }

    #[test]
    fn test_extract_rejects_non_objects() {
        assert!(extract_json("42").is_none());
        assert!(extract_json("[1, 2]").is_none());
        assert!(extract_json("no braces here").is_none());
        assert!(extract_json("{ unbalanced").is_none());
        assert!(extract_json("").is_none());
    }

    #[test]
    fn test_extract_handles_multibyte_text() {
        let text = "Voilà ☀️ {\"action\": \"final\", \"answer\": \"Café ☕\"}";
        assert_eq!(extract_json(text).unwrap()["answer"], "Café ☕");
    }

    #[test]
    fn test_decision_from_object() {
        let obj = extract_json(r#"{"action": "final"}"#).unwrap();
        assert_eq!(
            Decision::from_object(&obj),
            Some(Decision::Final {
                answer: String::new()
            })
        );

        let obj = extract_json(r#"{"action": "book_recs", "args": "mystery"}"#).unwrap();
        assert_eq!(
            Decision::from_object(&obj),
            Some(Decision::ToolCall {
                name: "book_recs".into(),
                args: Map::new()
            })
        );

        let obj = extract_json(r#"{"thought": "hmm"}"#).unwrap();
        assert_eq!(Decision::from_object(&obj), None);
    }

    #[test]
    fn test_decision_to_json() {
        let mut args = Map::new();
        args.insert("city".into(), json!("London"));
        let decision = Decision::ToolCall {
            name: "city_to_coords".into(),
            args,
        };
        assert_eq!(
            decision.to_json(),
            json!({"action": "city_to_coords", "args": {"city": "London"}})
        );
    }

    #[tokio::test]
    async fn test_decide_without_repair() {
        let llm = ScriptedLlm::new([r#"{"action": "random_joke", "args": {}}"#]);
        let decision = decoder(&llm).decide(&[Message::user("joke")]).await.unwrap();

        assert_eq!(
            decision,
            Decision::ToolCall {
                name: "random_joke".into(),
                args: Map::new()
            }
        );
        let requests = llm.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].options.temperature, 0.2);
        assert_eq!(requests[0].options.max_tokens, 1024);
    }

    #[tokio::test]
    async fn test_decide_repairs_once() {
        let llm = ScriptedLlm::new([
            "I think we should fetch a dog picture",
            r#"{"action": "random_dog", "args": {}}"#,
        ]);
        let decision = decoder(&llm).decide(&[Message::user("dog")]).await.unwrap();
        assert_eq!(
            decision,
            Decision::ToolCall {
                name: "random_dog".into(),
                args: Map::new()
            }
        );

        let requests = llm.requests();
        assert_eq!(requests.len(), 2);
        let repair = &requests[1];
        assert_eq!(repair.options.temperature, 0.0);
        assert_eq!(repair.messages[0].role, Role::System);
        assert!(repair.messages[0].content.contains(r#"with an "action" key"#));
        assert_eq!(repair.messages[1].content, "I think we should fetch a dog picture");
    }

    #[tokio::test]
    async fn test_decide_falls_back_to_raw_text() {
        let llm = ScriptedLlm::new(["Have a lovely weekend!", "still not json"]);
        let decision = decoder(&llm).decide(&[Message::user("hi")]).await.unwrap();

        assert_eq!(
            decision,
            Decision::Final {
                answer: "Have a lovely weekend!".into()
            }
        );
        assert_eq!(llm.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_decide_treats_repair_error_as_failed_repair() {
        let llm = ScriptedLlm::new(["plain words"]);
        llm.push_error("connection reset");

        let decision = decoder(&llm).decide(&[Message::user("hi")]).await.unwrap();
        assert_eq!(
            decision,
            Decision::Final {
                answer: "plain words".into()
            }
        );
    }

    #[tokio::test]
    async fn test_decide_propagates_first_request_error() {
        let llm = ScriptedLlm::default();
        llm.push_error("model gone");

        let err = decoder(&llm).decide(&[Message::user("hi")]).await.unwrap_err();
        assert!(matches!(err, LlmError::InvalidResponse(_)));
    }
}
