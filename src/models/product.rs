use serde::{Deserialize, Serialize};

pub const PRICE_NOT_FOUND: &str = "Price not found";
pub const DEFAULT_CURRENCY: &str = "USD";

/// Structured result of metadata extraction from a product page.
///
/// Immutable once produced; extraction never fails, it degrades field by
/// field (empty image, "Price not found", "Untitled Item", ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    pub title: String,
    pub price: String,
    pub currency: String,
    pub image_url: String,
    pub store: String,
    pub sizes: Vec<String>,
    /// No heuristic populates colors yet; kept so stored boards keep their
    /// shape once one does.
    pub colors: Vec<String>,
    pub description: String,
}

impl ProductRecord {
    /// Degraded record handed back when the product page could not be
    /// fetched. Carries enough to still be usable on the board.
    pub fn fallback(store: &str) -> Self {
        Self {
            title: format!("{store} Item"),
            price: PRICE_NOT_FOUND.to_string(),
            currency: DEFAULT_CURRENCY.to_string(),
            image_url: String::new(),
            store: store.to_string(),
            sizes: Vec::new(),
            colors: Vec::new(),
            description: "Could not fetch details. Click to visit the product page.".to_string(),
        }
    }
}
