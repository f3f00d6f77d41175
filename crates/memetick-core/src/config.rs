use std::env;

/// Community whose hot posts are harvested.
pub const DEFAULT_COMMUNITY: &str = "wallstreetbets";
/// Sentiment-aggregation page scanned for ticker mentions.
pub const DEFAULT_SENTIMENT_URL: &str =
    "https://swaggystocks.com/dashboard/wallstreetbets/ticker-sentiment";
/// How many hot posts are pulled per run.
pub const DEFAULT_POST_LIMIT: usize = 30;

/// Environment-derived configuration, read once at startup.
///
/// Credentials and tokens arrive ready-made; no auth flows are modeled here.
#[derive(Debug, Clone)]
pub struct DigestConfig {
    pub community: String,
    pub post_limit: usize,
    pub sentiment_url: String,
    pub alphavantage_api_key: Option<String>,
    pub mail_access_token: Option<String>,
    pub email_to: Option<String>,
    pub email_from: Option<String>,
}

impl DigestConfig {
    pub fn from_env() -> Self {
        Self {
            community: env_or("MEMETICK_COMMUNITY", DEFAULT_COMMUNITY),
            post_limit: env::var("MEMETICK_POST_LIMIT")
                .ok()
                .and_then(|raw| raw.parse().ok())
                .unwrap_or(DEFAULT_POST_LIMIT),
            sentiment_url: env_or("MEMETICK_SENTIMENT_URL", DEFAULT_SENTIMENT_URL),
            alphavantage_api_key: non_empty(env::var("MEMETICK_ALPHAVANTAGE_API_KEY").ok()),
            mail_access_token: non_empty(env::var("MEMETICK_MAIL_ACCESS_TOKEN").ok()),
            email_to: non_empty(env::var("MEMETICK_EMAIL_TO").ok()),
            email_from: non_empty(env::var("MEMETICK_EMAIL_FROM").ok()),
        }
    }
}

impl Default for DigestConfig {
    fn default() -> Self {
        Self {
            community: String::from(DEFAULT_COMMUNITY),
            post_limit: DEFAULT_POST_LIMIT,
            sentiment_url: String::from(DEFAULT_SENTIMENT_URL),
            alphavantage_api_key: None,
            mail_access_token: None,
            email_to: None,
            email_from: None,
        }
    }
}

fn env_or(name: &str, fallback: &str) -> String {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => value,
        _ => String::from(fallback),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|raw| !raw.trim().is_empty())
}
