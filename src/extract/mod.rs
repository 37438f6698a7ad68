//! Heuristic product-metadata extraction over arbitrary HTML.
//!
//! Every field is resolved through an ordered fallback chain (meta tags,
//! structured data, CSS-selector scans) with first-match-wins semantics.
//! Malformed markup or absent fields degrade to placeholder values; this
//! module never fails.

use scraper::{Html, Selector};

use crate::models::product::ProductRecord;

mod price;
pub mod urls;

const MAX_TITLE_CHARS: usize = 200;
const MAX_DESCRIPTION_CHARS: usize = 500;
const MAX_SIZES: usize = 20;
const MAX_SIZE_LABEL_CHARS: usize = 10;

const FALLBACK_TITLE: &str = "Untitled Item";

const TITLE_META_TAGS: [&str; 3] = ["og:title", "twitter:title", "product:title"];

/// Product-heading patterns tried after the meta tags, most specific first.
const TITLE_SELECTORS: [&str; 9] = [
    "h1.product-title",
    "h1.product_title",
    r#"h1[class*="product"]"#,
    r#"h1[class*="name"]"#,
    r#"[data-testid="product-title"]"#,
    r#"[class*="product-name"]"#,
    r#"[class*="product-title"]"#,
    "h1",
    "title",
];

const IMAGE_META_TAGS: [&str; 5] = [
    "og:image",
    "og:image:secure_url",
    "twitter:image",
    "twitter:image:src",
    "product:image",
];

const IMAGE_SELECTORS: [&str; 10] = [
    r#"[class*="product-image"] img"#,
    r#"[class*="product-gallery"] img"#,
    r#"[class*="product_image"] img"#,
    r#"[data-testid*="image"] img"#,
    r#"[class*="woocommerce-product-gallery"] img"#,
    ".gallery-image img",
    "#product-image img",
    ".product img",
    r#"img[class*="product"]"#,
    "main img",
];

/// Lazy-loading galleries stash the real source in data attributes.
const IMAGE_SRC_ATTRS: [&str; 4] = ["src", "data-src", "data-lazy-src", "data-original"];

const DESCRIPTION_META_TAGS: [&str; 3] = ["og:description", "description", "twitter:description"];

const SIZE_SELECTOR: &str =
    r#"[class*="size"] button, [class*="size"] option, [data-testid*="size"]"#;

/// Extract product metadata from raw HTML. Deterministic, total: any input
/// yields a record, with per-field placeholders where nothing matched.
pub fn extract(html: &str, source_url: &str) -> ProductRecord {
    let document = Html::parse_document(html);

    let image_url = resolve_image(&document)
        .map(|src| urls::resolve_url(source_url, &src))
        .unwrap_or_default();
    let (price, currency) = price::resolve(&document);
    let description = first_meta(&document, &DESCRIPTION_META_TAGS).unwrap_or_default();

    ProductRecord {
        title: truncate_chars(&resolve_title(&document), MAX_TITLE_CHARS),
        price,
        currency,
        image_url,
        store: urls::extract_domain(source_url),
        sizes: collect_sizes(&document),
        colors: Vec::new(),
        description: truncate_chars(&description, MAX_DESCRIPTION_CHARS),
    }
}

fn resolve_title(document: &Html) -> String {
    if let Some(title) = first_meta(document, &TITLE_META_TAGS) {
        return title;
    }
    for query in TITLE_SELECTORS {
        if let Some(text) = select_text(document, query) {
            return text;
        }
    }
    FALLBACK_TITLE.to_string()
}

fn resolve_image(document: &Html) -> Option<String> {
    if let Some(src) = first_meta(document, &IMAGE_META_TAGS) {
        return Some(src);
    }
    for query in IMAGE_SELECTORS {
        let Ok(selector) = Selector::parse(query) else {
            continue;
        };
        let Some(img) = document.select(&selector).next() else {
            continue;
        };
        let src = IMAGE_SRC_ATTRS
            .iter()
            .find_map(|attr| img.value().attr(attr))
            .unwrap_or("");
        if !src.is_empty() && !src.contains("placeholder") && !src.contains("spinner") {
            return Some(src.to_string());
        }
    }
    None
}

fn collect_sizes(document: &Html) -> Vec<String> {
    let Ok(selector) = Selector::parse(SIZE_SELECTOR) else {
        return Vec::new();
    };
    let mut sizes: Vec<String> = Vec::new();
    for element in document.select(&selector) {
        if sizes.len() == MAX_SIZES {
            break;
        }
        let text = element.text().collect::<String>().trim().to_string();
        if !text.is_empty() && text.chars().count() < MAX_SIZE_LABEL_CHARS && !sizes.contains(&text)
        {
            sizes.push(text);
        }
    }
    sizes
}

/// Content of the first matching `<meta>` tag, looked up by `property` then
/// `name`. Empty content counts as absent so the fallback chain continues.
pub(crate) fn meta_content(document: &Html, tag: &str) -> Option<String> {
    let queries = [
        format!(r#"meta[property="{tag}"]"#),
        format!(r#"meta[name="{tag}"]"#),
    ];
    for query in &queries {
        let Ok(selector) = Selector::parse(query) else {
            continue;
        };
        let content = document
            .select(&selector)
            .next()
            .and_then(|element| element.value().attr("content"))
            .map(str::trim)
            .filter(|content| !content.is_empty());
        if let Some(content) = content {
            return Some(content.to_string());
        }
    }
    None
}

pub(crate) fn first_meta(document: &Html, tags: &[&str]) -> Option<String> {
    tags.iter().find_map(|tag| meta_content(document, tag))
}

/// Trimmed text of the first element matching `query`, if non-empty.
fn select_text(document: &Html, query: &str) -> Option<String> {
    let selector = Selector::parse(query).ok()?;
    document
        .select(&selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|text| !text.is_empty())
}

/// Character-based truncation; slicing bytes could split a code point.
fn truncate_chars(value: &str, max: usize) -> String {
    if value.chars().count() <= max {
        return value.to_string();
    }
    value.chars().take(max).collect()
}
