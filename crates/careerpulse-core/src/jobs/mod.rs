//! Job listings and the sources that produce them

mod adzuna;
mod fallback;
mod scraped;

pub use adzuna::{AdzunaConfig, AdzunaSource};
pub use fallback::fallback_jobs;
pub use scraped::ScrapeSource;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::jobs::{DESCRIPTION_CHARS, MAX_RESULTS};
use crate::retry::{classify_status, ClassifyError, ErrorClass};
use crate::scrape::ScrapeError;

/// Normalized job posting returned to clients regardless of provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobListing {
    pub title: String,
    pub company: String,
    pub description: String,
}

impl JobListing {
    pub fn new(
        title: impl Into<String>,
        company: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            company: company.into(),
            description: description.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum JobSearchError {
    #[error("No jobs found for the given skills")]
    NoResults,
    #[error("job provider returned HTTP {status}: {message}")]
    Upstream { status: u16, message: String },
    #[error("job provider request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("{0}")]
    Scrape(#[from] ScrapeError),
    #[error("max retries exceeded after {attempts} attempts: {message}")]
    RetriesExhausted { attempts: u32, message: String },
}

impl ClassifyError for JobSearchError {
    fn classify(&self) -> ErrorClass {
        match self {
            JobSearchError::Upstream { status, .. } => classify_status(*status),
            JobSearchError::Transport(err) => err
                .status()
                .map(|s| classify_status(s.as_u16()))
                .unwrap_or(ErrorClass::Fatal),
            _ => ErrorClass::Fatal,
        }
    }
}

/// Anything that can turn a skills query into job listings
#[async_trait]
pub trait JobSource: Send + Sync {
    /// Short provider name for logs
    fn name(&self) -> &'static str;

    async fn search(&self, skills: &str) -> Result<Vec<JobListing>, JobSearchError>;
}

/// Cap a description at `DESCRIPTION_CHARS` characters followed by an ellipsis
pub fn truncate_description(description: &str) -> String {
    let mut short: String = description.trim().chars().take(DESCRIPTION_CHARS).collect();
    short.push_str("...");
    short
}

/// Trim fields and shorten the description of one listing
pub fn normalize_listing(job: JobListing) -> JobListing {
    JobListing {
        title: job.title.trim().to_string(),
        company: job.company.trim().to_string(),
        description: truncate_description(&job.description),
    }
}

/// Normalize and keep the first `MAX_RESULTS` listings
pub fn normalize(listings: impl IntoIterator<Item = JobListing>) -> Vec<JobListing> {
    listings
        .into_iter()
        .take(MAX_RESULTS)
        .map(normalize_listing)
        .collect()
}
