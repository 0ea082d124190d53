use std::future::Future;
use std::time::Duration;

use thiserror::Error;
use tokio::time::sleep;

use crate::constants;

/// How the retry policy should treat a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Provider quota exceeded; worth waiting and trying again
    RateLimited,
    /// Anything else; surfaced immediately
    Fatal,
}

/// Errors that can tell the retry policy what kind of failure they are
pub trait ClassifyError {
    fn classify(&self) -> ErrorClass;
}

/// Map an HTTP status code to an error class
pub fn classify_status(status: u16) -> ErrorClass {
    if status == 429 {
        ErrorClass::RateLimited
    } else {
        ErrorClass::Fatal
    }
}

/// Retry configuration
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Retries allowed after the first attempt (0 = single attempt)
    pub max_retries: u32,
    /// Delay before the first retry; doubled after each one
    pub initial_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: constants::retry::MAX_RETRIES,
            initial_delay: constants::retry::INITIAL_DELAY,
        }
    }
}

impl RetryConfig {
    pub fn new(max_retries: u32, initial_delay: Duration) -> Self {
        Self {
            max_retries,
            initial_delay,
        }
    }
}

/// Terminal outcome of a retried operation
#[derive(Debug, Error)]
pub enum RetryError<E> {
    /// Non-retryable failure, passed through untouched
    #[error(transparent)]
    Fatal(E),
    /// Still rate limited after every retry was spent
    #[error("max retries exceeded after {attempts} attempts: {last}")]
    Exhausted { attempts: u32, last: E },
}

impl<E> RetryError<E> {
    pub fn is_exhausted(&self) -> bool {
        matches!(self, RetryError::Exhausted { .. })
    }
}

/// Execute an async operation, retrying rate-limited failures with exponential backoff.
///
/// The success path never sleeps. A rate-limited failure sleeps for the
/// current delay, doubles it, and tries again until `max_retries` retries
/// have been made, at which point `RetryError::Exhausted` is returned.
pub async fn with_retry<T, E, F, Fut>(config: &RetryConfig, mut operation: F) -> Result<T, RetryError<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: ClassifyError + std::fmt::Display,
{
    let mut attempts_made: u32 = 0;
    let mut delay = config.initial_delay;

    loop {
        let err = match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };

        if err.classify() == ErrorClass::Fatal {
            return Err(RetryError::Fatal(err));
        }

        if attempts_made >= config.max_retries {
            tracing::error!(
                attempts = attempts_made + 1,
                error = %err,
                "Rate limit persisted, giving up"
            );
            return Err(RetryError::Exhausted {
                attempts: attempts_made + 1,
                last: err,
            });
        }

        tracing::warn!(
            attempt = attempts_made + 1,
            delay_ms = delay.as_millis() as u64,
            "Rate limit hit, retrying"
        );
        sleep(delay).await;
        delay = delay.saturating_mul(2);
        attempts_made += 1;
    }
}
