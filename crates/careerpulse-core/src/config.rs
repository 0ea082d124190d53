//! Process configuration
//!
//! Read once from the environment at startup and shared read-only afterwards.
//! Missing credentials are reported together so the operator can fix them in
//! one pass.

use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

use crate::constants;

/// Variables the gateway refuses to start without
pub const REQUIRED_VARS: [&str; 5] = [
    "OPENAI_API_KEY",
    "ADZUNA_APP_ID",
    "ADZUNA_APP_KEY",
    "STRIPE_SECRET_KEY",
    "STRIPE_PRICE_ID",
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required environment variables: {}", .0.join(", "))]
    Missing(Vec<String>),
    #[error("invalid value for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

/// Where `/jobs/scrape` gets its listings from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JobSourceKind {
    #[default]
    Adzuna,
    Indeed,
    LinkedIn,
}

impl FromStr for JobSourceKind {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "adzuna" => Ok(JobSourceKind::Adzuna),
            "indeed" => Ok(JobSourceKind::Indeed),
            "linkedin" => Ok(JobSourceKind::LinkedIn),
            other => Err(ConfigError::Invalid {
                var: "JOB_SOURCE".to_string(),
                reason: format!("unknown job source '{}'", other),
            }),
        }
    }
}

/// Gateway configuration
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub port: u16,
    /// Allowed CORS origin and base for checkout redirect URLs
    pub frontend_url: String,

    pub openai_api_key: String,
    pub openai_model: String,
    pub openai_api_url: String,

    pub adzuna_app_id: String,
    pub adzuna_app_key: String,
    pub adzuna_base_url: String,

    pub stripe_secret_key: String,
    pub stripe_price_id: String,
    pub stripe_base_url: String,

    pub job_source: JobSourceKind,
    /// Chromium binary for the scraping sources (auto-detected when unset)
    pub chrome_executable: Option<PathBuf>,
    pub headless: bool,
    /// Reverse proxies in front of the gateway whose `X-Forwarded-For` entry is trusted
    pub trust_proxy_hops: usize,
}

impl GatewayConfig {
    /// Load `.env` (if present) and read the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!("Loaded environment from {}", path.display());
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let missing: Vec<String> = REQUIRED_VARS
            .iter()
            .filter(|key| get(**key).is_none())
            .map(|key| key.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(ConfigError::Missing(missing));
        }
        let required = |key: &str| get(key).unwrap_or_default();

        let port = match get("PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
                var: "PORT".to_string(),
                reason: format!("'{}' is not a valid port", raw),
            })?,
            None => 5000,
        };

        let job_source = match get("JOB_SOURCE") {
            Some(raw) => raw.parse()?,
            None => JobSourceKind::default(),
        };

        let headless = match get("HEADLESS") {
            Some(raw) => !matches!(raw.trim().to_ascii_lowercase().as_str(), "0" | "false" | "no"),
            None => true,
        };

        let trust_proxy_hops = match get("TRUST_PROXY_HOPS") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
                var: "TRUST_PROXY_HOPS".to_string(),
                reason: format!("'{}' is not a hop count", raw),
            })?,
            None => 1,
        };

        Ok(Self {
            port,
            frontend_url: get("FRONTEND_URL")
                .unwrap_or_else(|| constants::billing::DEFAULT_FRONTEND_URL.to_string()),
            openai_api_key: required("OPENAI_API_KEY"),
            openai_model: get("OPENAI_MODEL")
                .unwrap_or_else(|| constants::ai::DEFAULT_MODEL.to_string()),
            openai_api_url: get("OPENAI_API_URL")
                .unwrap_or_else(|| constants::ai::DEFAULT_API_URL.to_string()),
            adzuna_app_id: required("ADZUNA_APP_ID"),
            adzuna_app_key: required("ADZUNA_APP_KEY"),
            adzuna_base_url: get("ADZUNA_BASE_URL")
                .unwrap_or_else(|| constants::jobs::ADZUNA_BASE_URL.to_string()),
            stripe_secret_key: required("STRIPE_SECRET_KEY"),
            stripe_price_id: required("STRIPE_PRICE_ID"),
            stripe_base_url: get("STRIPE_BASE_URL")
                .unwrap_or_else(|| constants::billing::STRIPE_BASE_URL.to_string()),
            job_source,
            chrome_executable: get("CHROME_EXECUTABLE").map(PathBuf::from),
            headless,
            trust_proxy_hops,
        })
    }
}
