//! Unified error handling for the API

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// API error response body
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Application error types
#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    NotFound(String),
    /// Terminal provider failure after the retry layer gave up
    Upstream { error: String, details: String },
    TooManyRequests(String),
}

impl AppError {
    pub fn upstream(error: impl Into<String>, details: impl ToString) -> Self {
        AppError::Upstream {
            error: error.into(),
            details: details.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, None),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, None),
            AppError::Upstream { error, details } => {
                tracing::error!(details = %details, "{}", error);
                (StatusCode::INTERNAL_SERVER_ERROR, error, Some(details))
            }
            // Plain-text body
            AppError::TooManyRequests(msg) => {
                return (StatusCode::TOO_MANY_REQUESTS, msg).into_response();
            }
        };

        (status, Json(ApiError { error, details })).into_response()
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(format!("Invalid query string: {}", rejection.body_text()))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(format!("Invalid request body: {}", rejection.body_text()))
    }
}
