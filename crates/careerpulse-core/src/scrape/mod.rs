//! Headless-browser job scraping
//!
//! `ScrapeLoop` owns the retry policy and the browser lifecycle; `JobBoard`
//! implementations own the provider-specific URLs and selectors so markup
//! changes never touch the loop.

mod attempt_loop;
pub mod boards;
mod chromium;
mod error;
mod session;

pub use attempt_loop::{ScrapeConfig, ScrapeLoop};
pub use boards::{IndeedBoard, JobBoard, LinkedInBoard};
pub use chromium::{ChromiumLauncher, LaunchOptions};
pub use error::{ScrapeError, ScrapeResult};
pub use session::{BrowserSession, ReadyCondition, SessionLauncher};
