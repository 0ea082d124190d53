use std::sync::Arc;

use crate::retry::{with_retry, RetryConfig, RetryError};

use super::client::{AiError, Completion};
use super::prompts::CoachPrompt;

/// Runs coaching prompts against the completion provider under the retry policy
#[derive(Clone)]
pub struct CoachService {
    completion: Arc<dyn Completion>,
    retry: RetryConfig,
}

impl CoachService {
    pub fn new(completion: Arc<dyn Completion>) -> Self {
        Self {
            completion,
            retry: RetryConfig::default(),
        }
    }

    pub fn with_retry_config(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    pub async fn generate(&self, prompt: &CoachPrompt) -> Result<String, RetryError<AiError>> {
        tracing::debug!(kind = prompt.kind, "Generating coaching response");
        with_retry(&self.retry, || {
            self.completion.complete(&prompt.text, prompt.max_tokens)
        })
        .await
    }
}
