//! Shared helpers for unit tests

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;

use crate::core::{AgentEvent, EventSink};
use crate::llm::{LlmError, LlmProvider, Message, SamplingOptions};

/// Serve `app` on an ephemeral local port and return its base URL
pub async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

/// One recorded model request
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub messages: Vec<Message>,
    pub options: SamplingOptions,
}

/// Model double that replays queued replies and records every request
///
/// Once the queue is empty it keeps answering with `fallback`.
#[derive(Clone, Default)]
pub struct ScriptedLlm {
    replies: Arc<Mutex<VecDeque<Result<String, String>>>>,
    fallback: Arc<Mutex<Option<String>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl ScriptedLlm {
    pub fn new<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let llm = Self::default();
        for reply in replies {
            llm.push(reply);
        }
        llm
    }

    pub fn push(&self, reply: impl Into<String>) {
        self.replies.lock().unwrap().push_back(Ok(reply.into()));
    }

    pub fn push_error(&self, message: impl Into<String>) {
        self.replies.lock().unwrap().push_back(Err(message.into()));
    }

    pub fn with_fallback(self, reply: impl Into<String>) -> Self {
        *self.fallback.lock().unwrap() = Some(reply.into());
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmProvider for ScriptedLlm {
    async fn complete(
        &self,
        messages: &[Message],
        options: SamplingOptions,
    ) -> Result<String, LlmError> {
        self.requests.lock().unwrap().push(RecordedRequest {
            messages: messages.to_vec(),
            options,
        });

        let next = self.replies.lock().unwrap().pop_front();
        match next {
            Some(Ok(reply)) => Ok(reply),
            Some(Err(message)) => Err(LlmError::InvalidResponse(message)),
            None => self
                .fallback
                .lock()
                .unwrap()
                .clone()
                .ok_or_else(|| LlmError::InvalidResponse("script exhausted".into())),
        }
    }

    async fn health_check(&self) -> Result<(), LlmError> {
        Ok(())
    }

    fn model(&self) -> String {
        "scripted".to_string()
    }

    fn provider_name(&self) -> &str {
        "scripted"
    }
}

/// Sink that keeps every event for later assertions
#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<AgentEvent>>,
}

impl RecordingSink {
    pub fn events(&self) -> Vec<AgentEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl EventSink for RecordingSink {
    fn emit(&self, event: &AgentEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}
