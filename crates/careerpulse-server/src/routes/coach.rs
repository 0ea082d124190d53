//! LLM coaching endpoints
//!
//! Each handler validates its inputs, renders a prompt and returns the
//! completion as plain text.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    routing::{get, post},
    Json, Router,
};

use careerpulse_core::ai::prompts::{self, CoachPrompt};

use crate::error::AppError;
use crate::types::{CareerCoachQuery, EmailQuery, InterviewQuery, MockInterviewRequest};
use crate::validate::Validator;
use crate::AppState;

/// Build the coaching router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/career-coach", get(career_coach))
        .route("/email", get(email))
        .route("/interview", get(interview))
        .route("/mock-interview", post(mock_interview))
}

async fn run(state: &AppState, prompt: CoachPrompt, failure: &str) -> Result<String, AppError> {
    state
        .coach
        .generate(&prompt)
        .await
        .map_err(|err| AppError::upstream(failure, err))
}

async fn career_coach(
    State(state): State<AppState>,
    query: Result<Query<CareerCoachQuery>, QueryRejection>,
) -> Result<String, AppError> {
    let Query(query) = query?;
    let mut v = Validator::new();
    let job = v.required("job", query.job.as_deref());
    let experience = v.optional("experience", query.experience.as_deref());
    v.finish()?;

    run(&state, prompts::career_plan(job, experience), "Failed to generate career plan").await
}

async fn email(
    State(state): State<AppState>,
    query: Result<Query<EmailQuery>, QueryRejection>,
) -> Result<String, AppError> {
    let Query(query) = query?;
    let mut v = Validator::new();
    let job = v.required("job", query.job.as_deref());
    let skills = v.required("skills", query.skills.as_deref());
    let company = v.optional("company", query.company.as_deref());
    let experience = v.optional("experience", query.experience.as_deref());
    v.finish()?;

    let prompt = prompts::outreach_email(job, skills, company, experience);
    run(&state, prompt, "Failed to generate email").await
}

async fn interview(
    State(state): State<AppState>,
    query: Result<Query<InterviewQuery>, QueryRejection>,
) -> Result<String, AppError> {
    let Query(query) = query?;
    let mut v = Validator::new();
    let job = v.required("job", query.job.as_deref());
    let skills = v.required("skills", query.skills.as_deref());
    v.finish()?;

    run(&state, prompts::interview_questions(job, skills), "Failed to generate questions").await
}

async fn mock_interview(
    State(state): State<AppState>,
    body: Result<Json<MockInterviewRequest>, JsonRejection>,
) -> Result<String, AppError> {
    let Json(body) = body?;

    let mut v = Validator::new();
    let job = v.required("job", body.job.as_deref());
    let skills = v.required("skills", body.skills.as_deref());
    v.finish()?;

    run(&state, prompts::mock_interview(job, skills), "Failed to generate mock interview").await
}
