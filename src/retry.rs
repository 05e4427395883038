//! Retry with bounded exponential backoff, shared by both upstream clients.

use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, warn};

/// Classification hook consulted between attempts.
pub trait RetryableError {
    /// Whether another attempt may succeed.
    fn is_retryable(&self) -> bool;

    /// Short human-readable reason, used for logging.
    fn retry_reason(&self) -> &str;
}

/// Backoff policy for upstream calls.
///
/// Delays grow as `base_delay * 2^(attempt - 1)`, capped at `max_delay`.
/// With the defaults the waits between the 3 attempts are 1s then 2s.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Total attempts, including the first one.
    pub max_attempts: u32,
    /// Delay before the first retry.
    pub base_delay: Duration,
    /// Ceiling on any single delay.
    pub max_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(6),
        }
    }
}

impl RetryConfig {
    /// Delay applied after the failure of the given 1-based attempt.
    fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        let delay = self.base_delay.saturating_mul(factor);
        delay.min(self.max_delay)
    }
}

/// Run `operation` up to `config.max_attempts` times.
///
/// Non-retryable errors and the error of the final attempt are returned to
/// the caller unchanged, so the last observed upstream failure is what
/// surfaces after the budget is exhausted.
pub async fn with_retry<F, Fut, T, E>(
    mut operation: F,
    config: &RetryConfig,
    operation_name: &str,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: RetryableError + std::fmt::Display,
{
    let mut attempt = 1;

    loop {
        match operation().await {
            Ok(value) => {
                if attempt > 1 {
                    debug!(
                        operation = operation_name,
                        attempt, "Operation succeeded after retry"
                    );
                }
                return Ok(value);
            }
            Err(err) if err.is_retryable() && attempt < config.max_attempts => {
                let delay = config.delay_for_attempt(attempt);
                warn!(
                    operation = operation_name,
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    reason = err.retry_reason(),
                    error = %err,
                    "Retrying after transient failure"
                );
                sleep(delay).await;
                attempt += 1;
            }
            Err(err) => {
                if err.is_retryable() {
                    warn!(
                        operation = operation_name,
                        attempt,
                        error = %err,
                        "Retry budget exhausted"
                    );
                }
                return Err(err);
            }
        }
    }
}
