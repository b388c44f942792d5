//! HTTP plumbing for the tools
//!
//! - `HttpFetcher` - GET client with timeout and retry
//! - `retry_with_backoff` / `RetryPolicy` - The backoff schedule itself

mod fetcher;
mod retry;

pub use fetcher::{HttpError, HttpFetcher, REQUEST_TIMEOUT};
pub use retry::{retry_with_backoff, RetryPolicy, Retryable, MAX_RETRIES};
