//! One-shot review of the loop's answer

use std::sync::Arc;

use crate::llm::{LlmError, LlmProvider, Message, SamplingOptions};

/// Reply that approves the answer unchanged (compared trimmed, lowercased)
pub const APPROVAL_SENTINEL: &str = "looks good";

const REVIEW_PROMPT: &str = "You are a quality reviewer for weekend plans. \
If the plan is complete, friendly, and references real data \
(temperature, book titles, joke text, dog URL), reply with EXACTLY: looks good\n\
Otherwise provide an improved version of the plan.";

/// Outcome of the review
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Review {
    Approved,
    Revised(String),
}

impl Review {
    /// The answer to show the user
    pub fn apply(self, original: String) -> String {
        match self {
            Review::Approved => original,
            Review::Revised(text) => text,
        }
    }
}

/// Sends exactly one deterministic review request per answer
pub struct Reflector {
    llm: Arc<dyn LlmProvider>,
    options: SamplingOptions,
}

impl Reflector {
    pub fn new(llm: Arc<dyn LlmProvider>, options: SamplingOptions) -> Self {
        Self {
            llm,
            options: options.deterministic(),
        }
    }

    pub async fn review(&self, answer: &str) -> Result<Review, LlmError> {
        let messages = [Message::system(REVIEW_PROMPT), Message::user(answer)];
        let reply = self.llm.complete(&messages, self.options).await?;

        if reply.trim().to_lowercase() == APPROVAL_SENTINEL {
            tracing::info!("[Reflector] Answer approved");
            Ok(Review::Approved)
        } else {
            tracing::info!("[Reflector] Answer revised ({} chars)", reply.len());
            Ok(Review::Revised(reply))
        }
    }
}
