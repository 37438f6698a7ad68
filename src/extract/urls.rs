use url::Url;

/// Hostname of the product URL with a leading `www.` stripped, or
/// `"Unknown"` when the URL does not parse.
pub fn extract_domain(source_url: &str) -> String {
    Url::parse(source_url)
        .ok()
        .and_then(|parsed| parsed.host_str().map(str::to_string))
        .map(|host| host.trim_start_matches("www.").to_string())
        .unwrap_or_else(|| "Unknown".to_string())
}

/// Resolve a possibly-relative image source against the page URL.
///
/// Absolute http(s) URLs pass through, protocol-relative ones get an
/// `https:` prefix, everything else joins against the base. Strings that
/// cannot be resolved are returned verbatim rather than dropped.
pub fn resolve_url(base: &str, relative: &str) -> String {
    if relative.is_empty() {
        return String::new();
    }
    if relative.starts_with("http") {
        return relative.to_string();
    }
    if relative.starts_with("//") {
        return format!("https:{relative}");
    }
    match Url::parse(base).and_then(|parsed| parsed.join(relative)) {
        Ok(joined) => joined.to_string(),
        Err(_) => relative.to_string(),
    }
}
