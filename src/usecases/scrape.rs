use url::Url;

use crate::dto::scrape::ScrapeFailure;
use crate::error::{AppError, AppResult};
use crate::extract::{self, urls};
use crate::models::product::ProductRecord;
use crate::services::fetcher::PageFetcher;

/// Outcome of a scrape. Fetch failures are not transport errors: the caller
/// still gets a usable fallback record to pin.
#[derive(Debug)]
pub enum ScrapeOutcome {
    Scraped(ProductRecord),
    Failed(ScrapeFailure),
}

pub struct ScrapeService;

impl ScrapeService {
    pub async fn scrape(fetcher: &PageFetcher, url: &str) -> AppResult<ScrapeOutcome> {
        let url = url.trim();
        if url.is_empty() {
            return Err(AppError::BadRequest("URL is required".to_string()));
        }
        if Url::parse(url).is_err() {
            return Err(AppError::BadRequest("Invalid URL".to_string()));
        }

        let html = match fetcher.fetch_page(url).await {
            Ok(html) => html,
            Err(err) => {
                tracing::warn!(url, error = %err, "Page fetch failed, returning fallback record");
                return Ok(ScrapeOutcome::Failed(ScrapeFailure {
                    error: "Failed to fetch product page".to_string(),
                    details: err.to_string(),
                    fallback: ProductRecord::fallback(&urls::extract_domain(url)),
                }));
            }
        };

        let record = extract::extract(&html, url);
        tracing::info!(url, title = %record.title, price = %record.price, "Scraped product page");
        Ok(ScrapeOutcome::Scraped(record))
    }
}
