use serde::{Deserialize, Serialize};

use crate::models::product::ProductRecord;

#[derive(Debug, Deserialize)]
pub struct ScrapeRequest {
    pub url: String,
}

/// Body returned alongside a 502 when the page could not be fetched. The
/// fallback record lets the client pin a link-only card anyway.
#[derive(Debug, Serialize)]
pub struct ScrapeFailure {
    pub error: String,
    pub details: String,
    pub fallback: ProductRecord,
}
