use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::GatewayConfig;
use crate::retry::{with_retry, RetryConfig, RetryError};

use super::{BillingError, CheckoutProvider, CheckoutSession};

#[derive(Debug, Clone)]
pub struct StripeConfig {
    pub secret_key: String,
    pub price_id: String,
    pub base_url: String,
    /// Origin the hosted checkout redirects back to
    pub frontend_url: String,
}

impl StripeConfig {
    pub fn from_gateway(config: &GatewayConfig) -> Self {
        Self {
            secret_key: config.stripe_secret_key.clone(),
            price_id: config.stripe_price_id.clone(),
            base_url: config.stripe_base_url.clone(),
            frontend_url: config.frontend_url.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

pub struct StripeClient {
    http: reqwest::Client,
    config: StripeConfig,
    retry: RetryConfig,
}

impl StripeClient {
    pub fn new(config: StripeConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
            retry: RetryConfig::default(),
        }
    }

    pub fn with_retry_config(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    fn checkout_form(&self, user_id: &str) -> Vec<(&'static str, String)> {
        let frontend = self.config.frontend_url.trim_end_matches('/');
        vec![
            ("mode", "subscription".to_string()),
            ("payment_method_types[]", "card".to_string()),
            ("line_items[0][price]", self.config.price_id.clone()),
            ("line_items[0][quantity]", "1".to_string()),
            (
                "success_url",
                format!("{frontend}/success?session_id={{CHECKOUT_SESSION_ID}}"),
            ),
            ("cancel_url", format!("{frontend}/cancel")),
            ("metadata[userId]", user_id.to_string()),
        ]
    }

    async fn post_once(
        &self,
        form: &[(&'static str, String)],
        idempotency_key: &str,
    ) -> Result<CheckoutSession, BillingError> {
        let url = format!(
            "{}/v1/checkout/sessions",
            self.config.base_url.trim_end_matches('/')
        );
        let response = self
            .http
            .post(url)
            .bearer_auth(&self.config.secret_key)
            .header("Idempotency-Key", idempotency_key)
            .form(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorEnvelope>(&body)
                .map(|envelope| envelope.error.message)
                .unwrap_or_else(|_| {
                    status.canonical_reason().unwrap_or("request failed").to_string()
                });
            return Err(BillingError::Status {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl CheckoutProvider for StripeClient {
    async fn create_checkout_session(&self, user_id: &str) -> Result<CheckoutSession, BillingError> {
        let form = self.checkout_form(user_id);
        // Same key on every retry so Stripe never creates two sessions
        let idempotency_key = Uuid::new_v4().to_string();
        debug!(user_id, idempotency_key = %idempotency_key, "Creating checkout session");

        let session = with_retry(&self.retry, || self.post_once(&form, &idempotency_key))
            .await
            .map_err(|err| match err {
                RetryError::Fatal(err) => err,
                RetryError::Exhausted { attempts, last } => BillingError::RetriesExhausted {
                    attempts,
                    message: last.to_string(),
                },
            })?;

        info!(user_id, session_id = %session.id, "Checkout session created");
        Ok(session)
    }
}
