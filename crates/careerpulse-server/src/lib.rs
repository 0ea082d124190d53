//! CareerPulse Server
//!
//! HTTP gateway in front of the job-search, LLM and payment providers.
//! This is a library crate; the binary starts it via `start_server()`.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method, StatusCode, Uri},
    middleware,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use rust_embed::Embed;
use tower_http::{cors::CorsLayer, set_header::SetResponseHeaderLayer, trace::TraceLayer};

use careerpulse_core::ai::{AiClient, AiClientConfig, CoachService};
use careerpulse_core::billing::{CheckoutProvider, StripeClient, StripeConfig};
use careerpulse_core::jobs::{AdzunaConfig, AdzunaSource, JobSource, ScrapeSource};
use careerpulse_core::GatewayConfig;

pub mod error;
pub mod rate_limit;
pub mod routes;
pub mod types;
pub mod validate;

use error::AppError;
use rate_limit::{rate_limit_middleware, RateLimitConfig, RateLimiter};
use types::HealthResponse;

/// Landing page and its static assets, compiled into the binary.
#[derive(Embed)]
#[folder = "assets"]
struct StaticAssets;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Retry-wrapped LLM prompt execution.
    pub coach: CoachService,
    /// Provider behind `/jobs/scrape`.
    pub jobs: Arc<dyn JobSource>,
    pub checkout: Arc<dyn CheckoutProvider>,
    pub rate_limiter: Arc<RateLimiter>,
}

impl AppState {
    pub fn new(
        coach: CoachService,
        jobs: Arc<dyn JobSource>,
        checkout: Arc<dyn CheckoutProvider>,
    ) -> Self {
        Self {
            coach,
            jobs,
            checkout,
            rate_limiter: Arc::new(RateLimiter::default()),
        }
    }

    pub fn with_rate_limit(mut self, config: RateLimitConfig) -> Self {
        self.rate_limiter = Arc::new(RateLimiter::new(config));
        self
    }
}

/// Wire the production providers from validated configuration.
pub fn build_state(config: &GatewayConfig) -> AppState {
    let ai_client = AiClient::new(
        AiClientConfig::from_gateway(config),
        config.openai_api_key.clone(),
    );
    let coach = CoachService::new(Arc::new(ai_client));

    let jobs: Arc<dyn JobSource> = match ScrapeSource::from_gateway(config) {
        Some(scrape) => Arc::new(scrape),
        None => Arc::new(AdzunaSource::new(AdzunaConfig::from_gateway(config))),
    };
    tracing::info!(source = jobs.name(), "Job source selected");

    let checkout = Arc::new(StripeClient::new(StripeConfig::from_gateway(config)));

    AppState::new(coach, jobs, checkout).with_rate_limit(RateLimitConfig {
        trusted_proxy_hops: config.trust_proxy_hops,
        ..Default::default()
    })
}

/// Build the Axum router with all routes, middleware and embedded assets.
pub fn build_router(state: AppState, frontend_url: &str) -> anyhow::Result<Router> {
    let origin: HeaderValue = frontend_url.trim_end_matches('/').parse()?;
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    let app = Router::new()
        .route("/", get(landing_page))
        .route("/health", get(health))
        .merge(routes::api_router())
        .fallback(serve_asset)
        .layer(middleware::from_fn_with_state(
            state.rate_limiter.clone(),
            rate_limit_middleware,
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("SAMEORIGIN"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::REFERRER_POLICY,
            HeaderValue::from_static("no-referrer"),
        ))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(app)
}

/// Start the gateway and block until shutdown.
pub async fn start_server(config: GatewayConfig) -> anyhow::Result<()> {
    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    let state = build_state(&config);
    let app = build_router(state, &config.frontend_url)?;

    tracing::info!("CareerPulse server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

async fn landing_page() -> Response {
    embedded("index.html").unwrap_or_else(|| {
        AppError::NotFound("Landing page not embedded in this build".to_string()).into_response()
    })
}

/// Serve an embedded file for unmatched paths, else the JSON 404.
async fn serve_asset(uri: Uri) -> Response {
    let path = uri.path().trim_start_matches('/');
    if path.is_empty() {
        return landing_page().await;
    }
    embedded(path)
        .unwrap_or_else(|| AppError::NotFound("Endpoint not found".to_string()).into_response())
}

fn embedded(path: &str) -> Option<Response> {
    let file = StaticAssets::get(path)?;
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    let cache = if path.ends_with(".html") {
        "no-cache"
    } else {
        "public, max-age=3600"
    };
    Some(
        (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, mime.as_ref().to_string()),
                (header::CACHE_CONTROL, cache.to_string()),
            ],
            file.data.into_owned(),
        )
            .into_response(),
    )
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
