//! Request and response types for the API
//!
//! Every input field is optional at the serde layer so that absence is
//! reported by `validate` with a readable message instead of a rejection.

use serde::{Deserialize, Serialize};

// ============================================================================
// Jobs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ScrapeQuery {
    pub skills: Option<String>,
}

// ============================================================================
// Coaching
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CareerCoachQuery {
    pub job: Option<String>,
    pub experience: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct EmailQuery {
    pub job: Option<String>,
    pub skills: Option<String>,
    pub company: Option<String>,
    pub experience: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct InterviewQuery {
    pub job: Option<String>,
    pub skills: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MockInterviewRequest {
    pub job: Option<String>,
    pub skills: Option<String>,
}

// ============================================================================
// Billing
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub id: String,
}

// ============================================================================
// Health
// ============================================================================

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}
