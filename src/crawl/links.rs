// src/crawl/links.rs
// =============================================================================
// This module pulls anchor links out of an HTML page.
//
// We use the `scraper` crate to parse the body into a DOM and select every
// <a href="..."> element in document order.
//
// Link resolution is deliberately narrow:
// - "/docs" is glued onto the crawl's base URL -> "http://site/docs"
// - anything else ("https://other.site/", "about.html", "#top") is handed
//   back exactly as written
//
// So a relative link like "about.html" is NOT resolved against the page it
// appears on. It comes back unchanged, fails to parse later on, and is
// skipped by the crawler.
// =============================================================================

use scraper::{Html, Selector};

// Extracts all anchor hrefs from HTML content
//
// Parameters:
//   html: the HTML content to parse
//   base_url: the URL the crawl started from (used for "/..." links)
//
// Returns: hrefs in document order, duplicates kept
//
// Example:
//   html = "<a href='/search'></a>"
//   base_url = "http://dev.test/"
//   result = ["http://dev.test/search"]
pub fn extract_links(html: &str, base_url: &str) -> Vec<String> {
    let document = Html::parse_document(html);

    // Constant selector, parsing it cannot fail.
    // Anchors without an href are not matched at all.
    let selector = Selector::parse("a[href]").unwrap();

    document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .map(|href| resolve_link(href, base_url))
        .collect()
}

// "/rest" -> "<base without trailing slash>/rest", everything else as-is
fn resolve_link(href: &str, base_url: &str) -> String {
    match href.strip_prefix('/') {
        Some(rest) => format!("{}/{}", base_url.trim_end_matches('/'), rest),
        None => href.to_string(),
    }
}
