//! OpenAI-compatible completion client

mod config;
mod simple;

pub use config::AiClientConfig;

use async_trait::async_trait;
use reqwest::{RequestBuilder, Response};
use thiserror::Error;

use crate::retry::{classify_status, ClassifyError, ErrorClass};

#[derive(Debug, Error)]
pub enum AiError {
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("provider returned an empty completion")]
    EmptyCompletion,
}

impl ClassifyError for AiError {
    fn classify(&self) -> ErrorClass {
        match self {
            AiError::Status { status, .. } => classify_status(*status),
            AiError::Transport(err) => err
                .status()
                .map(|s| classify_status(s.as_u16()))
                .unwrap_or(ErrorClass::Fatal),
            AiError::EmptyCompletion => ErrorClass::Fatal,
        }
    }
}

/// Single-prompt text completion
#[async_trait]
pub trait Completion: Send + Sync {
    async fn complete(&self, prompt: &str, max_tokens: usize) -> Result<String, AiError>;
}

/// HTTP client for the completion provider
pub struct AiClient {
    http: reqwest::Client,
    config: AiClientConfig,
    api_key: String,
}

impl AiClient {
    pub fn new(config: AiClientConfig, api_key: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
            api_key,
        }
    }

    pub fn config(&self) -> &AiClientConfig {
        &self.config
    }

    fn build_request(&self, url: &str) -> RequestBuilder {
        self.http.post(url).bearer_auth(&self.api_key)
    }

    /// Turn a non-success response into a typed error carrying the provider message
    async fn handle_error_response(&self, response: Response) -> Result<Response, AiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|json| {
                json.get("error")
                    .and_then(|e| e.get("message"))
                    .and_then(|m| m.as_str())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| {
                if body.is_empty() {
                    status.canonical_reason().unwrap_or("request failed").to_string()
                } else {
                    body
                }
            });

        Err(AiError::Status {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl Completion for AiClient {
    async fn complete(&self, prompt: &str, max_tokens: usize) -> Result<String, AiError> {
        self.call_simple(&self.config.model, prompt, max_tokens).await
    }
}
