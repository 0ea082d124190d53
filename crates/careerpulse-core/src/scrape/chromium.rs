use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig as ChromiumConfig};
use chromiumoxide::cdp::browser_protocol::network::SetUserAgentOverrideParams;
use chromiumoxide::cdp::browser_protocol::page::NavigateParams;
use chromiumoxide::handler::viewport::Viewport as ChromiumViewport;
use chromiumoxide::page::Page;
use futures::StreamExt;
use tokio::task::JoinHandle;
use tokio::time::{sleep, timeout, Instant};
use tracing::{debug, info, warn};

use crate::config::GatewayConfig;
use crate::constants::scrape::{
    SCROLL_PAUSE, SELECTOR_POLL_INTERVAL, USER_AGENT, VIEWPORT_HEIGHT, VIEWPORT_WIDTH,
};

use super::error::{ScrapeError, ScrapeResult};
use super::session::{BrowserSession, ReadyCondition, SessionLauncher};

#[derive(Debug, Clone)]
pub struct LaunchOptions {
    pub executable: Option<PathBuf>,
    pub headless: bool,
    pub sandbox: bool,
    pub user_agent: String,
    pub width: u32,
    pub height: u32,
}

impl Default for LaunchOptions {
    fn default() -> Self {
        Self {
            executable: None,
            headless: true,
            sandbox: false,
            user_agent: USER_AGENT.to_string(),
            width: VIEWPORT_WIDTH,
            height: VIEWPORT_HEIGHT,
        }
    }
}

impl LaunchOptions {
    pub fn from_gateway(config: &GatewayConfig) -> Self {
        Self {
            executable: config.chrome_executable.clone(),
            headless: config.headless,
            ..Default::default()
        }
    }
}

/// Launches one Chromium process per scrape attempt
#[derive(Debug, Clone, Default)]
pub struct ChromiumLauncher {
    options: LaunchOptions,
}

impl ChromiumLauncher {
    pub fn new(options: LaunchOptions) -> Self {
        Self { options }
    }

    fn build_chromium_config(&self) -> ScrapeResult<ChromiumConfig> {
        let LaunchOptions {
            executable,
            headless,
            sandbox,
            user_agent,
            width,
            height,
        } = &self.options;

        let mut builder = ChromiumConfig::builder().viewport(ChromiumViewport {
            width: *width,
            height: *height,
            device_scale_factor: Some(1.0),
            emulating_mobile: false,
            is_landscape: width >= height,
            has_touch: false,
        });

        if let Some(path) = executable {
            builder = builder.chrome_executable(path);
        }
        if !headless {
            builder = builder.with_head();
        }
        if !sandbox {
            builder = builder.no_sandbox();
        }

        builder = builder.args(vec![
            format!("--user-agent={user_agent}"),
            format!("--window-size={width},{height}"),
            "--disable-blink-features=AutomationControlled".to_string(),
            "--disable-features=AutomationControlled".to_string(),
            "--disable-gpu".to_string(),
            "--disable-dev-shm-usage".to_string(),
            "--no-first-run".to_string(),
            "--lang=en-US".to_string(),
        ]);

        builder.build().map_err(ScrapeError::Configuration)
    }
}

#[async_trait]
impl SessionLauncher for ChromiumLauncher {
    async fn launch(&self) -> ScrapeResult<Box<dyn BrowserSession>> {
        let config = self.build_chromium_config()?;
        info!(
            ua = %self.options.user_agent,
            width = self.options.width,
            height = self.options.height,
            headless = self.options.headless,
            "Launching Chromium instance"
        );

        let (mut browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|err| ScrapeError::Launch(err.to_string()))?;

        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(err) = event {
                    debug!(error = %err, "Chromium handler reported error");
                }
            }
        });

        let page = match open_stealth_page(&browser, &self.options.user_agent).await {
            Ok(page) => page,
            Err(err) => {
                // The process is already running; tear it down before reporting.
                if let Err(close_err) = browser.close().await {
                    warn!(error = %close_err, "Failed to close browser after page setup error");
                }
                handler_task.abort();
                return Err(err);
            }
        };

        Ok(Box::new(ChromiumSession {
            browser,
            page,
            handler_task: Some(handler_task),
        }))
    }
}

async fn open_stealth_page(browser: &Browser, user_agent: &str) -> ScrapeResult<Page> {
    let page = browser.new_page("about:blank").await?;
    page.enable_stealth_mode_with_agent(user_agent).await?;

    let params = SetUserAgentOverrideParams::builder()
        .user_agent(user_agent.to_string())
        .accept_language("en-US,en;q=0.9")
        .build()
        .map_err(ScrapeError::Configuration)?;
    page.set_user_agent(params).await?;
    Ok(page)
}

/// A live Chromium process plus the page the attempt drives
pub struct ChromiumSession {
    browser: Browser,
    page: Page,
    handler_task: Option<JoinHandle<()>>,
}

#[async_trait]
impl BrowserSession for ChromiumSession {
    async fn navigate(&mut self, url: &str, limit: Duration) -> ScrapeResult<()> {
        let params = NavigateParams::builder()
            .url(url)
            .build()
            .map_err(ScrapeError::Configuration)?;

        let page = &self.page;
        timeout(limit, async move {
            page.goto(params).await?;
            page.wait_for_navigation().await?;
            Ok::<_, ScrapeError>(())
        })
        .await
        .map_err(|_| ScrapeError::Timeout(format!("navigation to {url}")))??;

        debug!(url, "Navigation complete");
        Ok(())
    }

    async fn wait_until(&mut self, ready: &ReadyCondition) -> ScrapeResult<()> {
        match ready {
            ReadyCondition::Delay(delay) => {
                sleep(*delay).await;
                Ok(())
            }
            ReadyCondition::Selector { css, timeout } => {
                let deadline = Instant::now() + *timeout;
                loop {
                    if self.page.find_element(css.as_str()).await.is_ok() {
                        return Ok(());
                    }
                    if Instant::now() >= deadline {
                        return Err(ScrapeError::Timeout(format!("selector {css}")));
                    }
                    sleep(SELECTOR_POLL_INTERVAL).await;
                }
            }
        }
    }

    async fn auto_scroll(&mut self, steps: usize) -> ScrapeResult<()> {
        for step in 0..steps {
            self.page
                .evaluate("window.scrollBy(0, document.body.scrollHeight);")
                .await?;
            debug!(step, "Scrolled results page");
            sleep(SCROLL_PAUSE).await;
        }
        Ok(())
    }

    async fn content(&mut self) -> ScrapeResult<String> {
        Ok(self.page.content().await?)
    }

    async fn close(mut self: Box<Self>) -> ScrapeResult<()> {
        info!("Shutting down Chromium instance");
        let closed = self.browser.close().await;
        if let Err(err) = self.browser.wait().await {
            warn!(error = %err, "Failed waiting for Chromium to exit");
        }
        if let Some(handle) = self.handler_task.take() {
            if let Err(err) = handle.await {
                warn!(error = %err, "Browser handler join error");
            }
        }
        closed?;
        Ok(())
    }
}

impl Drop for ChromiumSession {
    fn drop(&mut self) {
        if let Some(handle) = self.handler_task.take() {
            if !handle.is_finished() {
                warn!("ChromiumSession dropped without explicit close");
                handle.abort();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_use_fixed_fingerprint() {
        let options = LaunchOptions::default();
        assert_eq!(options.user_agent, USER_AGENT);
        assert_eq!((options.width, options.height), (1366, 768));
        assert!(options.headless);
    }

    #[test]
    fn builds_config_with_explicit_executable() {
        let launcher = ChromiumLauncher::new(LaunchOptions {
            executable: Some(PathBuf::from("/usr/bin/chromium")),
            ..Default::default()
        });
        assert!(launcher.build_chromium_config().is_ok());
    }
}
