use std::future::Future;
use std::time::Duration;
use tracing::warn;

use crate::application::ports::HttpConfig;
use crate::domain::errors::AuthError;

/// Exponential backoff policy for outbound calls that may fail transiently
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total number of attempts, the first call included
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
    pub backoff_factor: f64,
    pub jitter: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(200),
            max_delay: Duration::from_secs(5),
            backoff_factor: 2.0,
            jitter: true,
        }
    }
}

impl From<&HttpConfig> for RetryPolicy {
    fn from(config: &HttpConfig) -> Self {
        Self {
            max_attempts: config.max_retries.saturating_add(1),
            base_delay: config.get_retry_delay(),
            ..Self::default()
        }
    }
}

impl RetryPolicy {
    /// Delay before the retry following the given zero-based failed attempt
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let exponential = self.base_delay.as_secs_f64() * self.backoff_factor.powi(attempt as i32);
        let capped = exponential.min(self.max_delay.as_secs_f64());

        let delay = if self.jitter {
            capped * (0.5 + fastrand::f64())
        } else {
            capped
        };

        Duration::from_secs_f64(delay.min(self.max_delay.as_secs_f64()))
    }
}

/// Errors that know whether the failed call is worth repeating
pub trait RetryableError {
    fn is_retryable(&self) -> bool;
}

impl RetryableError for AuthError {
    fn is_retryable(&self) -> bool {
        self.is_transient()
    }
}

/// Run `operation` until it succeeds, fails permanently or the policy runs out
pub async fn retry<F, Fut, T, E>(policy: &RetryPolicy, mut operation: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: RetryableError + std::fmt::Display,
{
    let mut attempt = 0;

    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                attempt += 1;

                if !err.is_retryable() {
                    warn!(error = %err, attempt, "Non-retryable error");
                    return Err(err);
                }

                if attempt >= policy.max_attempts {
                    warn!(
                        error = %err,
                        attempt,
                        max_attempts = policy.max_attempts,
                        "Retry attempts exhausted"
                    );
                    return Err(err);
                }

                let delay = policy.delay_for(attempt - 1);
                warn!(
                    error = %err,
                    attempt,
                    max_attempts = policy.max_attempts,
                    delay_ms = delay.as_millis() as u64,
                    "Retrying after transient error"
                );
                tokio::time::sleep(delay).await;
            }
        }
    }
}
