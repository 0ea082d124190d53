//! Subscription checkout endpoint

use axum::{extract::rejection::JsonRejection, extract::State, routing::post, Json, Router};

use crate::error::AppError;
use crate::types::{CheckoutRequest, CheckoutResponse};
use crate::validate::Validator;
use crate::AppState;

/// Build the billing router
pub fn router() -> Router<AppState> {
    Router::new().route("/create-checkout-session", post(create_checkout_session))
}

async fn create_checkout_session(
    State(state): State<AppState>,
    body: Result<Json<CheckoutRequest>, JsonRejection>,
) -> Result<Json<CheckoutResponse>, AppError> {
    let Json(body) = body?;

    let mut v = Validator::new();
    let user_id = v.required("userId", body.user_id.as_deref());
    v.finish()?;

    let session = state
        .checkout
        .create_checkout_session(user_id)
        .await
        .map_err(|err| AppError::upstream("Failed to create checkout session", err))?;

    Ok(Json(CheckoutResponse { id: session.id }))
}
