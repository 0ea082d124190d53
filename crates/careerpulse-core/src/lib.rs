//! CareerPulse Core
//!
//! Provider clients, retry policy, and job scraping shared by the gateway server.

pub mod ai;
pub mod billing;
pub mod config;
pub mod constants;
pub mod jobs;
pub mod retry;
pub mod scrape;

pub use config::{ConfigError, GatewayConfig, JobSourceKind};
pub use jobs::JobListing;
pub use retry::{with_retry, ClassifyError, ErrorClass, RetryConfig, RetryError};
