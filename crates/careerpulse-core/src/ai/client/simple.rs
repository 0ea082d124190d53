//! Simple (non-streaming) API calls

use serde_json::Value;
use tracing::debug;

use super::{AiClient, AiError};

impl AiClient {
    /// Make a simple non-streaming chat completion call with a single user message.
    pub async fn call_simple(
        &self,
        model: &str,
        user_message: &str,
        max_tokens: usize,
    ) -> Result<String, AiError> {
        let body = serde_json::json!({
            "model": model,
            "max_tokens": max_tokens,
            "messages": [
                {"role": "user", "content": user_message}
            ]
        });

        debug!(model, max_tokens, "Completion request");
        let request = self.build_request(&self.config().api_url());
        let response = request.json(&body).send().await?;
        let response = self.handle_error_response(response).await?;

        let json: Value = response.json().await?;
        extract_message_content(&json).ok_or(AiError::EmptyCompletion)
    }
}

fn extract_message_content(json: &Value) -> Option<String> {
    json.get("choices")
        .and_then(|c| c.as_array())
        .and_then(|arr| arr.first())
        .and_then(|choice| choice.get("message"))
        .and_then(|msg| msg.get("content"))
        .and_then(|t| t.as_str())
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::client::AiClientConfig;
    use crate::ai::Completion;
    use crate::retry::{ClassifyError, ErrorClass};
    use axum::{http::StatusCode, routing::post, Json, Router};

    async fn spawn_stub(status: StatusCode, body: Value) -> String {
        let app = Router::new().route(
            "/v1/chat/completions",
            post(move || {
                let body = body.clone();
                async move { (status, Json(body)) }
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}/v1/chat/completions", addr)
    }

    fn client(url: String) -> AiClient {
        AiClient::new(
            AiClientConfig {
                api_url: Some(url),
                ..Default::default()
            },
            "sk-test".to_string(),
        )
    }

    #[test]
    fn extracts_first_choice() {
        let json = serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": "  1. Why Rust?  "}}]
        });
        assert_eq!(extract_message_content(&json).as_deref(), Some("1. Why Rust?"));
        assert!(extract_message_content(&serde_json::json!({"choices": []})).is_none());
    }

    #[tokio::test]
    async fn returns_completion_text() {
        let url = spawn_stub(
            StatusCode::OK,
            serde_json::json!({"choices": [{"message": {"content": "Dear Hiring Manager"}}]}),
        )
        .await;
        let text = client(url).complete("write an email", 150).await.unwrap();
        assert_eq!(text, "Dear Hiring Manager");
    }

    #[tokio::test]
    async fn rate_limit_status_is_classified() {
        let url = spawn_stub(
            StatusCode::TOO_MANY_REQUESTS,
            serde_json::json!({"error": {"message": "Rate limit reached"}}),
        )
        .await;
        let err = client(url).complete("hi", 10).await.unwrap_err();
        assert_eq!(err.classify(), ErrorClass::RateLimited);
        assert_eq!(err.to_string(), "HTTP 429: Rate limit reached");
    }

    #[tokio::test]
    async fn auth_failure_is_fatal() {
        let url = spawn_stub(
            StatusCode::UNAUTHORIZED,
            serde_json::json!({"error": {"message": "Incorrect API key provided"}}),
        )
        .await;
        let err = client(url).complete("hi", 10).await.unwrap_err();
        assert_eq!(err.classify(), ErrorClass::Fatal);
    }
}
