//! Job listing endpoints

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    routing::get,
    Json, Router,
};

use careerpulse_core::jobs::{fallback_jobs, JobSearchError};
use careerpulse_core::JobListing;

use crate::error::AppError;
use crate::types::ScrapeQuery;
use crate::validate::Validator;
use crate::AppState;

/// Build the jobs router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/jobs", get(list_jobs))
        .route("/jobs/scrape", get(scrape_jobs))
        .route("/scrape", get(scrape_jobs))
}

/// Static listings, served without touching any provider
async fn list_jobs() -> Json<Vec<JobListing>> {
    Json(fallback_jobs())
}

async fn scrape_jobs(
    State(state): State<AppState>,
    query: Result<Query<ScrapeQuery>, QueryRejection>,
) -> Result<Json<Vec<JobListing>>, AppError> {
    let Query(query) = query?;
    let mut validator = Validator::new();
    let skills = validator.required("skills", query.skills.as_deref());
    validator.finish()?;

    tracing::info!(skills, source = state.jobs.name(), "Searching jobs");
    match state.jobs.search(skills).await {
        Ok(jobs) => Ok(Json(jobs)),
        Err(JobSearchError::NoResults) => {
            Err(AppError::NotFound(JobSearchError::NoResults.to_string()))
        }
        Err(err) => Err(AppError::upstream("Failed to fetch jobs", err)),
    }
}
