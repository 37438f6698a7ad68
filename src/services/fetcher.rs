//! HTTP page fetching for the scraper, with headers that keep storefronts
//! from serving the bot-detection interstitial.

use std::time::Duration;

use reqwest::{
    Client, redirect,
    header::{HeaderMap, HeaderValue},
};

use crate::error::{AppError, AppResult};

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

const DEFAULT_TIMEOUT_SECS: u64 = 15;
const MAX_REDIRECTS: usize = 5;

#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: Client,
}

impl PageFetcher {
    pub fn new(timeout: Duration) -> AppResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "Accept",
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
            ),
        );
        headers.insert(
            "Accept-Language",
            HeaderValue::from_static("en-US,en;q=0.9"),
        );
        headers.insert("Cache-Control", HeaderValue::from_static("no-cache"));

        let client = Client::builder()
            .user_agent(BROWSER_USER_AGENT)
            .default_headers(headers)
            .timeout(timeout)
            .redirect(redirect::Policy::limited(MAX_REDIRECTS))
            .build()
            .map_err(|err| AppError::Internal(format!("http client build failed: {}", err)))?;

        Ok(Self { client })
    }

    pub fn from_env() -> AppResult<Self> {
        let timeout_secs = std::env::var("FETCH_TIMEOUT_SECS")
            .ok()
            .and_then(|value| value.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        Self::new(Duration::from_secs(timeout_secs))
    }

    /// Fetch a page body as text. Non-success statuses are errors; the
    /// caller decides whether to degrade to a fallback record.
    pub async fn fetch_page(&self, url: &str) -> AppResult<String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| AppError::Fetch(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Fetch(format!("HTTP {}", status.as_u16())));
        }

        response
            .text()
            .await
            .map_err(|err| AppError::Fetch(err.to_string()))
    }
}
