use std::time::Duration;

use scraper::{Html, Selector};

use super::{encode_query, parse_selector, select_text, JobBoard};
use crate::jobs::JobListing;
use crate::scrape::session::ReadyCondition;

const RESULTS_MARKER: &str = "#mosaic-provider-jobcards";

pub struct IndeedBoard {
    base_url: String,
    card: Selector,
    title: Selector,
    company: Selector,
    snippet: Selector,
}

impl Default for IndeedBoard {
    fn default() -> Self {
        Self::new("https://www.indeed.com")
    }
}

impl IndeedBoard {
    pub fn new(base_url: impl Into<String>) -> Self {
        let name = "indeed";
        Self {
            base_url: base_url.into(),
            card: parse_selector("div.job_seen_beacon", name),
            title: parse_selector("h2.jobTitle span[title], h2.jobTitle span", name),
            company: parse_selector(
                "[data-testid=\"company-name\"], span.companyName",
                name,
            ),
            snippet: parse_selector("div.job-snippet, [data-testid=\"jobsnippet_footer\"]", name),
        }
    }
}

impl JobBoard for IndeedBoard {
    fn name(&self) -> &'static str {
        "indeed"
    }

    fn search_url(&self, query: &str) -> String {
        format!(
            "{}/jobs?q={}",
            self.base_url.trim_end_matches('/'),
            encode_query(query)
        )
    }

    fn ready(&self) -> ReadyCondition {
        ReadyCondition::Selector {
            css: RESULTS_MARKER.to_string(),
            timeout: Duration::from_secs(15),
        }
    }

    fn extract(&self, html: &str) -> Vec<JobListing> {
        let document = Html::parse_document(html);
        document
            .select(&self.card)
            .filter_map(|card| {
                let title = select_text(&card, &self.title)?;
                let company = select_text(&card, &self.company).unwrap_or_else(|| "Unknown".into());
                let description = select_text(&card, &self.snippet).unwrap_or_default();
                Some(JobListing::new(title, company, description))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
<html><body><div id="mosaic-provider-jobcards">
  <div class="job_seen_beacon">
    <h2 class="jobTitle"><a><span title="Rust Engineer">Rust Engineer</span></a></h2>
    <span data-testid="company-name">Ferris Labs</span>
    <div class="job-snippet"><ul><li>Build   async services</li><li>Own CI</li></ul></div>
  </div>
  <div class="job_seen_beacon">
    <h2 class="jobTitle"><a><span>Backend Developer</span></a></h2>
  </div>
  <div class="job_seen_beacon"><span data-testid="company-name">No Title Inc</span></div>
</div></body></html>"#;

    #[test]
    fn builds_search_url() {
        assert_eq!(
            IndeedBoard::default().search_url("data analyst"),
            "https://www.indeed.com/jobs?q=data+analyst"
        );
    }

    #[test]
    fn extracts_cards_with_titles() {
        let jobs = IndeedBoard::default().extract(PAGE);
        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].title, "Rust Engineer");
        assert_eq!(jobs[0].company, "Ferris Labs");
        assert_eq!(jobs[0].description, "Build async services Own CI");
        assert_eq!(jobs[1].company, "Unknown");
    }

    #[test]
    fn empty_page_yields_nothing() {
        assert!(IndeedBoard::default().extract("<html></html>").is_empty());
    }
}
