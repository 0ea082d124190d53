//! Rate limiting and retry logic
//!
//! Provides exponential backoff for outbound provider calls. Only errors
//! classified as rate limited (HTTP 429) are retried; everything else is
//! returned to the caller on first occurrence.

mod backoff;

pub use backoff::{classify_status, with_retry, ClassifyError, ErrorClass, RetryConfig, RetryError};
