//! Adzuna job-search API source

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info};

use crate::config::GatewayConfig;
use crate::constants;
use crate::retry::{with_retry, RetryConfig, RetryError};

use super::{normalize, JobListing, JobSearchError, JobSource};

#[derive(Debug, Clone)]
pub struct AdzunaConfig {
    pub app_id: String,
    pub app_key: String,
    pub base_url: String,
    pub country: String,
}

impl AdzunaConfig {
    pub fn from_gateway(config: &GatewayConfig) -> Self {
        Self {
            app_id: config.adzuna_app_id.clone(),
            app_key: config.adzuna_app_key.clone(),
            base_url: config.adzuna_base_url.clone(),
            country: constants::jobs::ADZUNA_COUNTRY.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<AdzunaJob>,
}

#[derive(Debug, Deserialize)]
struct AdzunaJob {
    #[serde(default)]
    title: String,
    #[serde(default)]
    company: AdzunaCompany,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Default, Deserialize)]
struct AdzunaCompany {
    #[serde(default)]
    display_name: String,
}

impl From<AdzunaJob> for JobListing {
    fn from(job: AdzunaJob) -> Self {
        JobListing::new(job.title, job.company.display_name, job.description)
    }
}

pub struct AdzunaSource {
    http: reqwest::Client,
    config: AdzunaConfig,
    retry: RetryConfig,
}

impl AdzunaSource {
    pub fn new(config: AdzunaConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
            retry: RetryConfig::default(),
        }
    }

    pub fn with_retry_config(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    pub fn build_query_url(&self, skills: &str) -> String {
        let encode = |value: &str| -> String {
            url::form_urlencoded::byte_serialize(value.as_bytes()).collect()
        };
        format!(
            "{}/v1/api/jobs/{}/search/1?app_id={}&app_key={}&what={}&content-type=application/json",
            self.config.base_url.trim_end_matches('/'),
            self.config.country,
            encode(&self.config.app_id),
            encode(&self.config.app_key),
            encode(skills),
        )
    }

    async fn fetch_once(&self, url: &str) -> Result<Vec<JobListing>, JobSearchError> {
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = if body.is_empty() {
                status.canonical_reason().unwrap_or("request failed").to_string()
            } else {
                body
            };
            return Err(JobSearchError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        let payload: SearchResponse = response.json().await?;
        Ok(payload.results.into_iter().map(JobListing::from).collect())
    }
}

#[async_trait]
impl JobSource for AdzunaSource {
    fn name(&self) -> &'static str {
        "adzuna"
    }

    async fn search(&self, skills: &str) -> Result<Vec<JobListing>, JobSearchError> {
        let url = self.build_query_url(skills);
        debug!(skills, "Querying Adzuna");

        let raw = with_retry(&self.retry, || self.fetch_once(&url))
            .await
            .map_err(|err| match err {
                RetryError::Fatal(err) => err,
                RetryError::Exhausted { attempts, last } => JobSearchError::RetriesExhausted {
                    attempts,
                    message: last.to_string(),
                },
            })?;

        if raw.is_empty() {
            return Err(JobSearchError::NoResults);
        }

        let jobs = normalize(raw);
        info!(skills, count = jobs.len(), "Adzuna search complete");
        Ok(jobs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::Query, http::StatusCode, routing::get, Json, Router};
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    async fn spawn(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn source(base_url: String) -> AdzunaSource {
        AdzunaSource::new(AdzunaConfig {
            app_id: "id".into(),
            app_key: "key".into(),
            base_url,
            country: "us".into(),
        })
        .with_retry_config(RetryConfig::new(3, Duration::from_millis(5)))
    }

    #[test]
    fn encodes_query() {
        let src = source("http://api.adzuna.com/".into());
        assert_eq!(
            src.build_query_url("rust developer"),
            "http://api.adzuna.com/v1/api/jobs/us/search/1?app_id=id&app_key=key&what=rust+developer&content-type=application/json"
        );
    }

    #[tokio::test]
    async fn maps_results() {
        let app = Router::new().route(
            "/v1/api/jobs/us/search/1",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                assert_eq!(params.get("what").map(String::as_str), Some("developer"));
                Json(serde_json::json!({
                    "results": [
                        {"title": "Software Developer", "company": {"display_name": "Tech Corp"}, "description": "d".repeat(300)},
                        {"title": "Frontend Developer", "company": {"display_name": "Innovate Inc"}, "description": "Build UIs"}
                    ]
                }))
            }),
        );
        let jobs = source(spawn(app).await).search("developer").await.unwrap();
        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].company, "Tech Corp");
        assert_eq!(jobs[0].description, format!("{}...", "d".repeat(200)));
        assert_eq!(jobs[1].description, "Build UIs...");
    }

    #[tokio::test]
    async fn empty_results_are_no_results() {
        let app = Router::new().route(
            "/v1/api/jobs/us/search/1",
            get(|| async { Json(serde_json::json!({"results": []})) }),
        );
        let err = source(spawn(app).await).search("basket weaving").await.unwrap_err();
        assert!(matches!(err, JobSearchError::NoResults));
    }

    #[tokio::test]
    async fn retries_rate_limit_then_succeeds() {
        let hits = Arc::new(AtomicU32::new(0));
        let counter = hits.clone();
        let app = Router::new().route(
            "/v1/api/jobs/us/search/1",
            get(move || {
                let counter = counter.clone();
                async move {
                    if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                        (StatusCode::TOO_MANY_REQUESTS, Json(serde_json::json!({})))
                    } else {
                        (
                            StatusCode::OK,
                            Json(serde_json::json!({"results": [
                                {"title": "Dev", "company": {"display_name": "Acme"}, "description": "x"}
                            ]})),
                        )
                    }
                }
            }),
        );
        let jobs = source(spawn(app).await).search("dev").await.unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn server_error_is_not_retried() {
        let hits = Arc::new(AtomicU32::new(0));
        let counter = hits.clone();
        let app = Router::new().route(
            "/v1/api/jobs/us/search/1",
            get(move || {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    (StatusCode::BAD_GATEWAY, "upstream down")
                }
            }),
        );
        let err = source(spawn(app).await).search("dev").await.unwrap_err();
        assert!(matches!(err, JobSearchError::Upstream { status: 502, .. }));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }
}
