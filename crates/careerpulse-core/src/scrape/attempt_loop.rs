use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{info, warn};

use crate::constants;
use crate::jobs::{normalize_listing, JobListing};

use super::boards::JobBoard;
use super::error::{ScrapeError, ScrapeResult};
use super::session::{BrowserSession, SessionLauncher};

#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    pub max_attempts: u32,
    /// Wait after the first failed attempt; doubled after each further failure
    pub initial_delay: Duration,
    pub navigation_timeout: Duration,
    pub max_results: usize,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            max_attempts: constants::scrape::MAX_ATTEMPTS,
            initial_delay: constants::scrape::INITIAL_DELAY,
            navigation_timeout: constants::scrape::NAVIGATION_TIMEOUT,
            max_results: constants::jobs::MAX_RESULTS,
        }
    }
}

/// Multi-attempt scrape with exponential backoff.
///
/// Every attempt launches its own browser session and closes it before the
/// loop sleeps, retries, or returns, so at most one session is alive at a time.
pub struct ScrapeLoop {
    launcher: Arc<dyn SessionLauncher>,
    board: Arc<dyn JobBoard>,
    config: ScrapeConfig,
}

impl ScrapeLoop {
    pub fn new(launcher: Arc<dyn SessionLauncher>, board: Arc<dyn JobBoard>) -> Self {
        Self {
            launcher,
            board,
            config: ScrapeConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ScrapeConfig) -> Self {
        self.config = config;
        self
    }

    pub fn board_name(&self) -> &'static str {
        self.board.name()
    }

    pub async fn run(&self, query: &str) -> ScrapeResult<Vec<JobListing>> {
        let url = self.board.search_url(query);
        let max_attempts = self.config.max_attempts.max(1);
        let mut last_error = None;

        for attempt in 0..max_attempts {
            info!(
                board = self.board.name(),
                attempt = attempt + 1,
                max_attempts,
                url = %url,
                "Starting scrape attempt"
            );

            match self.attempt(&url).await {
                Ok(jobs) => {
                    info!(board = self.board.name(), count = jobs.len(), "Scrape succeeded");
                    return Ok(jobs
                        .into_iter()
                        .take(self.config.max_results)
                        .map(normalize_listing)
                        .collect());
                }
                Err(err) => {
                    warn!(
                        board = self.board.name(),
                        attempt = attempt + 1,
                        error = %err,
                        "Scrape attempt failed"
                    );
                    last_error = Some(err);
                }
            }

            if attempt + 1 < max_attempts {
                let delay = self.backoff_delay(attempt);
                info!(delay_ms = delay.as_millis() as u64, "Waiting before next scrape attempt");
                sleep(delay).await;
            }
        }

        let last = last_error
            .unwrap_or_else(|| ScrapeError::Configuration("no scrape attempts were made".into()));
        Err(ScrapeError::Exhausted {
            attempts: max_attempts,
            last: Box::new(last),
        })
    }

    /// `initial_delay * 2^attempts_made`
    fn backoff_delay(&self, attempts_made: u32) -> Duration {
        let multiplier = 1u32 << attempts_made.min(16);
        self.config.initial_delay.saturating_mul(multiplier)
    }

    /// One launch → drive → close cycle. Close runs whatever `drive` returned.
    async fn attempt(&self, url: &str) -> ScrapeResult<Vec<JobListing>> {
        let mut session = self.launcher.launch().await?;
        let outcome = self.drive(session.as_mut(), url).await;
        if let Err(err) = session.close().await {
            warn!(error = %err, "Failed to close browser session");
        }
        outcome
    }

    async fn drive(
        &self,
        session: &mut dyn BrowserSession,
        url: &str,
    ) -> ScrapeResult<Vec<JobListing>> {
        session.navigate(url, self.config.navigation_timeout).await?;
        session.wait_until(&self.board.ready()).await?;

        let steps = self.board.scroll_steps();
        if steps > 0 {
            session.auto_scroll(steps).await?;
        }

        let html = session.content().await?;
        let jobs = self.board.extract(&html);
        if jobs.is_empty() {
            return Err(ScrapeError::Empty(self.board.name().to_string()));
        }
        Ok(jobs)
    }
}
