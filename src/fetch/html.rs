// src/fetch/html.rs
// =============================================================================
// This module pulls what the crawler needs out of an HTML page:
// - the <title>, used as the short content summary of a page
// - every <a href> link, resolved to an absolute URL
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
//
// We also use the `url` crate to:
// - Resolve relative URLs to absolute URLs
// - Strip #fragments so "/docs#intro" and "/docs" are the same page
// =============================================================================

use std::collections::HashSet;

use scraper::{Html, Selector};
use url::Url;

// Extracts all crawlable links from HTML content
//
// Parameters:
//   html: the HTML content to parse
//   base: the URL of the page (for resolving relative links)
//
// Returns: absolute http(s) URLs without fragments, each one only once,
// in the order they first appear in the document
//
// Example:
//   html = "<a href='/docs'>Docs</a><a href='/docs#top'>Top</a>"
//   base = "https://example.com"
//   result = ["https://example.com/docs"]
pub fn extract_html_links(html: &str, base: &Url) -> Vec<String> {
    let document = Html::parse_document(html);

    // Our selector is a constant, so failing to parse it is a programmer error
    let selector = Selector::parse("a[href]").expect("'a[href]' is a valid selector");

    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for element in document.select(&selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };

        if let Some(absolute_url) = resolve_url(base, href) {
            if seen.insert(absolute_url.clone()) {
                links.push(absolute_url);
            }
        }
    }

    links
}

// Returns the trimmed text of the first <title>, or "" when there is none
pub fn extract_title(html: &str) -> String {
    let document = Html::parse_document(html);
    let selector = Selector::parse("title").expect("'title' is a valid selector");

    document
        .select(&selector)
        .next()
        .map(|title| title.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}

// Resolves a possibly-relative href to an absolute crawlable URL
//
// Examples:
//   base = "https://example.com/page"
//   href = "/docs" -> Some("https://example.com/docs")
//   href = "../other#x" -> Some("https://example.com/other")
//   href = "javascript:void(0)" -> None (not HTTP)
//   href = "#section" -> None (same page)
fn resolve_url(base: &Url, href: &str) -> Option<String> {
    if href.starts_with('#') {
        return None;
    }

    // Url::join handles absolute hrefs too (they simply replace the base)
    let mut url = base.join(href).ok()?;
    if !is_crawlable(&url) {
        return None;
    }

    url.set_fragment(None);
    Some(url.to_string())
}

// Only http and https pages can be fetched
// (skips mailto:, tel:, javascript:, data:, file:, ...)
fn is_crawlable(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https")
}
