//! Exponential backoff for transient failures
//!
//! The schedule is kept apart from the HTTP client so it can be driven by any
//! fallible async operation and any sleep function.

use std::future::Future;
use std::time::Duration;

/// Maximum number of attempts for one request (first try included)
pub const MAX_RETRIES: u32 = 3;

/// Errors that know whether another attempt may succeed
pub trait Retryable {
    /// Whether the failed operation should be attempted again
    fn is_retryable(&self) -> bool;
}

/// Retry schedule: `max_attempts` tries, waiting `backoff_unit * 2^n`
/// after the failed attempt `n` (0-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, first try included
    pub max_attempts: u32,
    /// Base delay, doubled for each further retry
    pub backoff_unit: Duration,
}

impl RetryPolicy {
    /// Create a policy with the given attempt count and backoff unit
    pub fn new(max_attempts: u32, backoff_unit: Duration) -> Self {
        Self {
            max_attempts,
            backoff_unit,
        }
    }

    /// Delay to wait after the failed attempt `attempt`
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.backoff_unit.saturating_mul(2u32.saturating_pow(attempt))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(MAX_RETRIES, Duration::from_secs(1))
    }
}

/// Run `operation` until it succeeds, fails with a non-retryable error, or
/// the policy runs out of attempts. The last error is returned on exhaustion.
///
/// `operation` receives the 0-based attempt number. `sleep` is called with
/// the backoff delay before every retry.
pub async fn retry_with_backoff<T, E, Op, OpFut, Sleep, SleepFut>(
    policy: RetryPolicy,
    mut operation: Op,
    mut sleep: Sleep,
) -> Result<T, E>
where
    E: Retryable + std::fmt::Display,
    Op: FnMut(u32) -> OpFut,
    OpFut: Future<Output = Result<T, E>>,
    Sleep: FnMut(Duration) -> SleepFut,
    SleepFut: Future<Output = ()>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 0;

    loop {
        match operation(attempt).await {
            Ok(value) => return Ok(value),
            Err(err) if err.is_retryable() && attempt + 1 < max_attempts => {
                let delay = policy.delay_for(attempt);
                tracing::warn!(
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    error = %err,
                    "Transient failure, backing off"
                );
                sleep(delay).await;
                attempt += 1;
            }
            Err(err) => {
                tracing::debug!(attempt, error = %err, "Giving up");
                return Err(err);
            }
        }
    }
}
