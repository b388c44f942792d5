//! Retrying HTTP GET client shared by every tool

use std::time::Duration;

use reqwest::{Client, Response};
use serde_json::Value;
use thiserror::Error;

use super::retry::{retry_with_backoff, RetryPolicy, Retryable};

/// Per-request timeout for tool HTTP calls
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

const USER_AGENT: &str = concat!("weekend-wizard/", env!("CARGO_PKG_VERSION"));

/// Errors from a tool HTTP request
#[derive(Error, Debug)]
pub enum HttpError {
    /// The client could not be constructed
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// The server answered with a non-success status
    #[error("HTTP {status} from {url}")]
    Status {
        /// Response status code
        status: u16,
        /// Requested URL
        url: String,
    },

    /// The request never produced a response (connect, timeout, IO)
    #[error("Request to {url} failed: {source}")]
    Transport {
        /// Requested URL
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The response body could not be decoded
    #[error("Invalid response body from {url}: {source}")]
    Decode {
        /// Requested URL
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl HttpError {
    /// Status code, if the server answered
    pub fn status(&self) -> Option<u16> {
        match self {
            HttpError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl Retryable for HttpError {
    fn is_retryable(&self) -> bool {
        match self {
            HttpError::Status { status, .. } => *status == 429,
            HttpError::Transport { source, .. } => !source.is_builder(),
            HttpError::Client(_) | HttpError::Decode { .. } => false,
        }
    }
}

/// HTTP GET helper with exponential backoff on rate limiting and network errors
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    policy: RetryPolicy,
}

impl HttpFetcher {
    /// Create a fetcher with the default retry policy and a 20 second timeout
    pub fn new() -> Result<Self, HttpError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
            .map_err(HttpError::Client)?;

        Ok(Self {
            client,
            policy: RetryPolicy::default(),
        })
    }

    /// Set the retry policy
    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// GET `url` with optional query parameters, retrying transient failures
    pub async fn get(&self, url: &str, query: &[(&str, String)]) -> Result<Response, HttpError> {
        retry_with_backoff(
            self.policy,
            move |attempt| async move {
                tracing::debug!(url, attempt, "GET");

                let response = self
                    .client
                    .get(url)
                    .query(query)
                    .send()
                    .await
                    .map_err(|source| HttpError::Transport {
                        url: url.to_string(),
                        source,
                    })?;

                let status = response.status();
                if !status.is_success() {
                    return Err(HttpError::Status {
                        status: status.as_u16(),
                        url: url.to_string(),
                    });
                }

                Ok(response)
            },
            tokio::time::sleep,
        )
        .await
    }

    /// GET `url` and decode the body as JSON
    pub async fn get_json(&self, url: &str, query: &[(&str, String)]) -> Result<Value, HttpError> {
        let response = self.get(url, query).await?;
        response.json().await.map_err(|source| HttpError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::serve;
    use axum::{extract::State, http::StatusCode, routing::get, Router};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn fast_fetcher() -> HttpFetcher {
        HttpFetcher::new()
            .unwrap()
            .with_policy(RetryPolicy::new(3, Duration::from_millis(1)))
    }

    async fn flaky(State(hits): State<Arc<AtomicUsize>>) -> (StatusCode, &'static str) {
        let n = hits.fetch_add(1, Ordering::SeqCst);
        if n < 2 {
            (StatusCode::TOO_MANY_REQUESTS, "slow down")
        } else {
            (StatusCode::OK, r#"{"ok": true}"#)
        }
    }

    async fn missing(State(hits): State<Arc<AtomicUsize>>) -> StatusCode {
        hits.fetch_add(1, Ordering::SeqCst);
        StatusCode::NOT_FOUND
    }

    async fn always_limited(State(hits): State<Arc<AtomicUsize>>) -> StatusCode {
        hits.fetch_add(1, Ordering::SeqCst);
        StatusCode::TOO_MANY_REQUESTS
    }

    #[tokio::test]
    async fn test_succeeds_after_two_rate_limits() {
        let hits = Arc::new(AtomicUsize::new(0));
        let base = serve(
            Router::new()
                .route("/flaky", get(flaky))
                .with_state(hits.clone()),
        )
        .await;

        let body = fast_fetcher()
            .get_json(&format!("{}/flaky", base), &[])
            .await
            .unwrap();

        assert_eq!(body["ok"], true);
        assert_eq!(hits.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_client_error_is_not_retried() {
        let hits = Arc::new(AtomicUsize::new(0));
        let base = serve(
            Router::new()
                .route("/missing", get(missing))
                .with_state(hits.clone()),
        )
        .await;

        let err = fast_fetcher()
            .get(&format!("{}/missing", base), &[])
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(404));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_rate_limit_exhaustion_returns_last_error() {
        let hits = Arc::new(AtomicUsize::new(0));
        let base = serve(
            Router::new()
                .route("/limited", get(always_limited))
                .with_state(hits.clone()),
        )
        .await;

        let err = fast_fetcher()
            .get(&format!("{}/limited", base), &[])
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(429));
        assert_eq!(hits.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_retryable_classification() {
        let limited = HttpError::Status {
            status: 429,
            url: "http://x".into(),
        };
        let server = HttpError::Status {
            status: 503,
            url: "http://x".into(),
        };
        assert!(limited.is_retryable());
        assert!(!server.is_retryable());
    }
}
