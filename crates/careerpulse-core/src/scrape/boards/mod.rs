//! Provider-specific search URLs and extraction selectors

mod indeed;
mod linkedin;

pub use indeed::IndeedBoard;
pub use linkedin::LinkedInBoard;

use scraper::{ElementRef, Selector};

use super::session::ReadyCondition;
use crate::jobs::JobListing;

/// Narrow extraction interface over a job board's markup
pub trait JobBoard: Send + Sync {
    fn name(&self) -> &'static str;

    fn search_url(&self, query: &str) -> String;

    fn ready(&self) -> ReadyCondition;

    /// Scroll passes needed to trigger lazy-loaded results
    fn scroll_steps(&self) -> usize {
        0
    }

    fn extract(&self, html: &str) -> Vec<JobListing>;
}

pub(crate) fn encode_query(query: &str) -> String {
    url::form_urlencoded::byte_serialize(query.as_bytes()).collect()
}

/// Parse a selector, falling back to one that matches nothing.
pub(crate) fn parse_selector(css: &str, board: &str) -> Selector {
    Selector::parse(css).unwrap_or_else(|err| {
        tracing::error!(board, selector = css, "Failed to parse CSS selector: {}", err);
        Selector::parse("*:not(*)").unwrap_or_else(|_| unreachable!("fallback selector parses"))
    })
}

/// Whitespace-collapsed text of the first match under `element`
pub(crate) fn select_text(element: &ElementRef<'_>, selector: &Selector) -> Option<String> {
    element.select(selector).next().map(|node| {
        node.text()
            .flat_map(str::split_whitespace)
            .collect::<Vec<_>>()
            .join(" ")
    })
    .filter(|text| !text.is_empty())
}
