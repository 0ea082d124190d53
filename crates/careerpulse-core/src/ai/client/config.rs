//! AI Client configuration

use crate::config::GatewayConfig;
use crate::constants;

/// Configuration for the AI client
#[derive(Debug, Clone)]
pub struct AiClientConfig {
    /// Model ID to use for API calls
    pub model: String,
    /// Optional API URL override (defaults to the OpenAI chat completions endpoint)
    pub api_url: Option<String>,
}

impl Default for AiClientConfig {
    fn default() -> Self {
        Self {
            model: constants::ai::DEFAULT_MODEL.to_string(),
            api_url: None,
        }
    }
}

impl AiClientConfig {
    /// Get the API URL to use
    pub fn api_url(&self) -> String {
        self.api_url
            .clone()
            .unwrap_or_else(|| constants::ai::DEFAULT_API_URL.to_string())
    }

    pub fn from_gateway(config: &GatewayConfig) -> Self {
        Self {
            model: config.openai_model.clone(),
            api_url: Some(config.openai_api_url.clone()),
        }
    }
}
