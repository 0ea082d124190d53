use std::time::Duration;

use scraper::{Html, Selector};

use super::{encode_query, parse_selector, select_text, JobBoard};
use crate::jobs::JobListing;
use crate::scrape::session::ReadyCondition;

/// LinkedIn guest job search (no login wall for the first page)
pub struct LinkedInBoard {
    base_url: String,
    card: Selector,
    title: Selector,
    company: Selector,
    location: Selector,
    listed: Selector,
}

impl Default for LinkedInBoard {
    fn default() -> Self {
        Self::new("https://www.linkedin.com")
    }
}

impl LinkedInBoard {
    pub fn new(base_url: impl Into<String>) -> Self {
        let name = "linkedin";
        Self {
            base_url: base_url.into(),
            card: parse_selector("ul.jobs-search__results-list li", name),
            title: parse_selector("h3.base-search-card__title", name),
            company: parse_selector("h4.base-search-card__subtitle", name),
            location: parse_selector("span.job-search-card__location", name),
            listed: parse_selector("time", name),
        }
    }
}

impl JobBoard for LinkedInBoard {
    fn name(&self) -> &'static str {
        "linkedin"
    }

    fn search_url(&self, query: &str) -> String {
        format!(
            "{}/jobs/search?keywords={}&location=United%20States",
            self.base_url.trim_end_matches('/'),
            encode_query(query)
        )
    }

    fn ready(&self) -> ReadyCondition {
        ReadyCondition::Delay(Duration::from_secs(3))
    }

    fn scroll_steps(&self) -> usize {
        3
    }

    fn extract(&self, html: &str) -> Vec<JobListing> {
        let document = Html::parse_document(html);
        document
            .select(&self.card)
            .filter_map(|card| {
                let title = select_text(&card, &self.title)?;
                let company = select_text(&card, &self.company).unwrap_or_else(|| "Unknown".into());
                // Cards carry no summary; describe where and when it was posted.
                let description = match (
                    select_text(&card, &self.location),
                    select_text(&card, &self.listed),
                ) {
                    (Some(location), Some(listed)) => format!("{location} - listed {listed}"),
                    (Some(location), None) => location,
                    (None, Some(listed)) => format!("Listed {listed}"),
                    (None, None) => String::new(),
                };
                Some(JobListing::new(title, company, description))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_search_url() {
        assert_eq!(
            LinkedInBoard::default().search_url("c++ developer"),
            "https://www.linkedin.com/jobs/search?keywords=c%2B%2B+developer&location=United%20States"
        );
    }

    #[test]
    fn extracts_guest_cards() {
        let html = r#"
<ul class="jobs-search__results-list">
  <li><div class="base-search-card">
    <h3 class="base-search-card__title"> Site Reliability Engineer </h3>
    <h4 class="base-search-card__subtitle"><a>Acme Cloud</a></h4>
    <span class="job-search-card__location">Austin, TX</span>
    <time datetime="2024-05-01">2 days ago</time>
  </div></li>
</ul>"#;
        let jobs = LinkedInBoard::default().extract(html);
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].title, "Site Reliability Engineer");
        assert_eq!(jobs[0].company, "Acme Cloud");
        assert_eq!(jobs[0].description, "Austin, TX - listed 2 days ago");
    }
}
