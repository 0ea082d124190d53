use super::JobListing;

/// Static listings served by `GET /jobs`
pub fn fallback_jobs() -> Vec<JobListing> {
    vec![
        JobListing::new(
            "Investment Banker",
            "Goldman Sachs",
            "Analyze financial data and manage client portfolios.",
        ),
        JobListing::new(
            "Financial Analyst",
            "JPMorgan Chase",
            "Prepare reports and forecasts for investment decisions.",
        ),
    ]
}
