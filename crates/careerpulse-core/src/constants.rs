//! Shared constants

pub mod retry {
    use std::time::Duration;

    /// Retries allowed after the first rate-limited attempt
    pub const MAX_RETRIES: u32 = 3;
    pub const INITIAL_DELAY: Duration = Duration::from_millis(1000);
}

pub mod ai {
    pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
    pub const DEFAULT_API_URL: &str = "https://api.openai.com/v1/chat/completions";

    pub const EMAIL_MAX_TOKENS: usize = 150;
    pub const INTERVIEW_MAX_TOKENS: usize = 100;
    pub const MOCK_INTERVIEW_MAX_TOKENS: usize = 200;
    pub const CAREER_PLAN_MAX_TOKENS: usize = 300;
}

pub mod jobs {
    /// Listings returned to clients per search
    pub const MAX_RESULTS: usize = 5;
    /// Characters of the description kept before the ellipsis
    pub const DESCRIPTION_CHARS: usize = 200;
    pub const ADZUNA_BASE_URL: &str = "http://api.adzuna.com";
    pub const ADZUNA_COUNTRY: &str = "us";
}

pub mod scrape {
    use std::time::Duration;

    pub const MAX_ATTEMPTS: u32 = 3;
    pub const INITIAL_DELAY: Duration = Duration::from_millis(2000);
    pub const NAVIGATION_TIMEOUT: Duration = Duration::from_secs(60);
    pub const SELECTOR_POLL_INTERVAL: Duration = Duration::from_millis(250);
    pub const SCROLL_PAUSE: Duration = Duration::from_millis(400);

    pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
    pub const VIEWPORT_WIDTH: u32 = 1366;
    pub const VIEWPORT_HEIGHT: u32 = 768;
}

pub mod billing {
    pub const STRIPE_BASE_URL: &str = "https://api.stripe.com";
    pub const DEFAULT_FRONTEND_URL: &str = "https://careerpulseai.netlify.app";
}
