//! API routes

use axum::Router;

use crate::AppState;

mod billing;
mod coach;
mod jobs;

/// Build the API router with all endpoints
pub fn api_router() -> Router<AppState> {
    Router::new()
        .merge(jobs::router())
        .nest("/openai", coach::router())
        .nest("/stripe", billing::router())
}
