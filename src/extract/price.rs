//! Price and currency resolution: four short-circuiting tiers over meta
//! tags, JSON-LD, DOM text and microdata.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};
use serde_json::Value;

use super::first_meta;
use crate::models::product::{DEFAULT_CURRENCY, PRICE_NOT_FOUND};

static PRICE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[$€£₹]?\s?[\d,]+\.?\d*|[\d,]+\.?\d*\s?(?:USD|EUR|GBP|INR|₹)")
        .expect("price pattern compiles")
});

const PRICE_META_TAGS: [&str; 4] = [
    "product:price:amount",
    "og:price:amount",
    "product:price",
    "og:price",
];

const CURRENCY_META_TAGS: [&str; 2] = ["product:price:currency", "og:price:currency"];

/// Price-bearing selectors, ordered. The second entry deliberately excludes
/// struck-through "old price" variants.
const PRICE_SELECTORS: [&str; 11] = [
    r#"[class*="price"] .amount"#,
    r#"[class*="price"]:not([class*="old"]):not([class*="was"]):not([class*="original"])"#,
    r#"[data-testid*="price"]"#,
    r#"[class*="product-price"]"#,
    r#"[class*="product_price"]"#,
    r#"[class*="current-price"]"#,
    r#"[class*="sale-price"]"#,
    r#"[class*="selling-price"]"#,
    ".price",
    "#price",
    r#"[itemprop="price"]"#,
];

const CURRENCY_SYMBOLS: [(&str, &str); 4] =
    [("USD", "$"), ("EUR", "€"), ("GBP", "£"), ("INR", "₹")];

/// Recursion guard for JSON-LD documents; offer data never nests deeper in
/// practice.
const MAX_JSON_LD_DEPTH: usize = 16;

/// Resolve `(price, currency)` for the document. The price string is ready
/// for display: prefixed with a currency symbol when the markup did not
/// already carry one, or the literal "Price not found".
pub(super) fn resolve(document: &Html) -> (String, String) {
    let mut currency = DEFAULT_CURRENCY.to_string();
    let mut price: Option<String> = None;

    // Tier 1: product/Open-Graph price metas.
    if let Some(amount) = first_meta(document, &PRICE_META_TAGS) {
        if let Some(code) = first_meta(document, &CURRENCY_META_TAGS) {
            currency = code;
        }
        price = Some(amount);
    }

    // Tier 2: JSON-LD offers.
    if price.is_none() {
        if let Some((amount, code)) = json_ld_price(document) {
            if let Some(code) = code {
                currency = code;
            }
            price = Some(amount);
        }
    }

    // Tier 3: DOM text scan.
    if price.is_none() {
        price = dom_price(document);
    }

    // Tier 4: microdata.
    if price.is_none() {
        if let Some((amount, code)) = microdata_price(document) {
            if let Some(code) = code {
                currency = code;
            }
            price = Some(amount);
        }
    }

    match price {
        Some(amount) if has_currency_symbol(&amount) => (amount, currency),
        Some(amount) => (format!("{}{amount}", symbol_for(&currency)), currency),
        None => (PRICE_NOT_FOUND.to_string(), currency),
    }
}

/// Scan `application/ld+json` blocks for the first offer price. Invalid
/// JSON blocks are skipped, not fatal.
fn json_ld_price(document: &Html) -> Option<(String, Option<String>)> {
    let selector = Selector::parse(r#"script[type="application/ld+json"]"#).ok()?;
    for script in document.select(&selector) {
        let raw = script.text().collect::<String>();
        let Ok(data) = serde_json::from_str::<Value>(&raw) else {
            continue;
        };
        if let Some(found) = offer_price(&data, 0) {
            return Some(found);
        }
    }
    None
}

/// Depth-bounded search for an `offers` shape; also recurses into `@graph`
/// arrays. Never assumes schema conformance: non-object nodes are ignored.
fn offer_price(node: &Value, depth: usize) -> Option<(String, Option<String>)> {
    if depth > MAX_JSON_LD_DEPTH {
        return None;
    }
    let object = node.as_object()?;

    if let Some(offers) = object.get("offers") {
        let offers: Vec<&Value> = match offers {
            Value::Array(list) => list.iter().collect(),
            single => vec![single],
        };
        for offer in offers {
            for key in ["price", "lowPrice"] {
                if let Some(amount) = offer.get(key).and_then(scalar_to_string) {
                    let code = offer
                        .get("priceCurrency")
                        .and_then(Value::as_str)
                        .filter(|code| !code.is_empty())
                        .map(str::to_string);
                    return Some((amount, code));
                }
            }
        }
    }

    if let Some(Value::Array(graph)) = object.get("@graph") {
        for entry in graph {
            if let Some(found) = offer_price(entry, depth + 1) {
                return Some(found);
            }
        }
    }

    None
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(text) if !text.is_empty() => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

fn dom_price(document: &Html) -> Option<String> {
    for query in PRICE_SELECTORS {
        let Ok(selector) = Selector::parse(query) else {
            continue;
        };
        let Some(element) = document.select(&selector).next() else {
            continue;
        };
        let text = element
            .value()
            .attr("content")
            .map(str::to_string)
            .filter(|content| !content.is_empty())
            .unwrap_or_else(|| element.text().collect::<String>().trim().to_string());
        if text.is_empty() {
            continue;
        }
        if let Some(found) = PRICE_PATTERN.find(&text) {
            return Some(found.as_str().trim().to_string());
        }
    }
    None
}

fn microdata_price(document: &Html) -> Option<(String, Option<String>)> {
    let price_selector = Selector::parse(r#"[itemprop="price"]"#).ok()?;
    let element = document.select(&price_selector).next()?;
    let amount = element
        .value()
        .attr("content")
        .map(str::to_string)
        .filter(|content| !content.is_empty())
        .unwrap_or_else(|| element.text().collect::<String>().trim().to_string());
    if amount.is_empty() {
        return None;
    }

    let code = Selector::parse(r#"[itemprop="priceCurrency"]"#)
        .ok()
        .and_then(|selector| document.select(&selector).next())
        .and_then(|element| {
            element
                .value()
                .attr("content")
                .map(str::to_string)
                .filter(|content| !content.is_empty())
                .or_else(|| {
                    let text = element.text().collect::<String>().trim().to_string();
                    (!text.is_empty()).then_some(text)
                })
        });

    Some((amount, code))
}

fn has_currency_symbol(price: &str) -> bool {
    price.chars().any(|c| matches!(c, '$' | '€' | '£' | '₹'))
}

fn symbol_for(currency: &str) -> String {
    CURRENCY_SYMBOLS
        .iter()
        .find(|(code, _)| *code == currency)
        .map(|(_, symbol)| (*symbol).to_string())
        .unwrap_or_else(|| format!("{currency} "))
}
