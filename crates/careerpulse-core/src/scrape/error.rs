use thiserror::Error;

pub type ScrapeResult<T> = Result<T, ScrapeError>;

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("browser launch failed: {0}")]
    Launch(String),
    #[error("cdp error: {0}")]
    Cdp(#[from] chromiumoxide::error::CdpError),
    #[error("timeout waiting for {0}")]
    Timeout(String),
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("no job listings extracted from {0}")]
    Empty(String),
    #[error("scrape failed after {attempts} attempts: {last}")]
    Exhausted {
        attempts: u32,
        last: Box<ScrapeError>,
    },
}
