//! Subscription checkout

mod stripe;

pub use stripe::{StripeClient, StripeConfig};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::retry::{classify_status, ClassifyError, ErrorClass};

/// Hosted checkout session handed back to the frontend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSession {
    pub id: String,
}

#[derive(Debug, Error)]
pub enum BillingError {
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },
    #[error("payment provider request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("max retries exceeded after {attempts} attempts: {message}")]
    RetriesExhausted { attempts: u32, message: String },
}

impl ClassifyError for BillingError {
    fn classify(&self) -> ErrorClass {
        match self {
            BillingError::Status { status, .. } => classify_status(*status),
            _ => ErrorClass::Fatal,
        }
    }
}

#[async_trait]
pub trait CheckoutProvider: Send + Sync {
    async fn create_checkout_session(&self, user_id: &str) -> Result<CheckoutSession, BillingError>;
}
