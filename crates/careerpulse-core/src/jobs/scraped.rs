//! Job source backed by a headless-browser scrape

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::{GatewayConfig, JobSourceKind};
use crate::scrape::{
    ChromiumLauncher, IndeedBoard, JobBoard, LaunchOptions, LinkedInBoard, ScrapeLoop,
    SessionLauncher,
};

use super::{JobListing, JobSearchError, JobSource};

pub struct ScrapeSource {
    scrape: ScrapeLoop,
}

impl ScrapeSource {
    pub fn new(scrape: ScrapeLoop) -> Self {
        Self { scrape }
    }

    /// Chromium-backed source for the configured board, or `None` when the
    /// gateway is set up for the Adzuna API.
    pub fn from_gateway(config: &GatewayConfig) -> Option<Self> {
        let board: Arc<dyn JobBoard> = match config.job_source {
            JobSourceKind::Adzuna => return None,
            JobSourceKind::Indeed => Arc::new(IndeedBoard::default()),
            JobSourceKind::LinkedIn => Arc::new(LinkedInBoard::default()),
        };
        let launcher: Arc<dyn SessionLauncher> =
            Arc::new(ChromiumLauncher::new(LaunchOptions::from_gateway(config)));
        Some(Self::new(ScrapeLoop::new(launcher, board)))
    }
}

#[async_trait]
impl JobSource for ScrapeSource {
    fn name(&self) -> &'static str {
        self.scrape.board_name()
    }

    async fn search(&self, skills: &str) -> Result<Vec<JobListing>, JobSearchError> {
        Ok(self.scrape.run(skills).await?)
    }
}
