use std::time::Duration;

use async_trait::async_trait;

use super::error::ScrapeResult;

/// When a results page counts as loaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadyCondition {
    /// Fixed settle time after navigation
    Delay(Duration),
    /// Poll until an element matching `css` exists
    Selector { css: String, timeout: Duration },
}

/// One browser process and one page, owned by a single scrape attempt.
///
/// `close` consumes the session, so nothing can touch it after release.
#[async_trait]
pub trait BrowserSession: Send {
    async fn navigate(&mut self, url: &str, timeout: Duration) -> ScrapeResult<()>;
    async fn wait_until(&mut self, ready: &ReadyCondition) -> ScrapeResult<()>;
    async fn auto_scroll(&mut self, steps: usize) -> ScrapeResult<()>;
    async fn content(&mut self) -> ScrapeResult<String>;
    async fn close(self: Box<Self>) -> ScrapeResult<()>;
}

/// Produces a fresh, stealth-configured session per attempt
#[async_trait]
pub trait SessionLauncher: Send + Sync {
    async fn launch(&self) -> ScrapeResult<Box<dyn BrowserSession>>;
}
