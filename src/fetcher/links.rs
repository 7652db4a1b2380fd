// src/fetcher/links.rs
// =============================================================================
// This module extracts links from rendered HTML pages.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Is built on html5ever (Mozilla's HTML parser)
//
// We also use the `url` crate to:
// - Resolve relative URLs ("/docs", "../other") against the page URL
// - Drop things that aren't web links at all (mailto:, javascript:, #anchor)
//
// The output is deliberately RAW: every resolvable http(s) link on the
// page, duplicates and off-domain links included. Filtering is the crawl
// controller's job, not ours.
// =============================================================================

use scraper::{Html, Selector};
use url::Url;

// Extracts all candidate links from HTML content
//
// Parameters:
//   html: the rendered HTML to parse (borrowed as &str)
//   page_url: the URL of the page (for resolving relative links)
//
// Returns: Vec<String> of absolute http(s) URLs, in document order
//
// Example:
//   html = "<a href='/docs.html'>Docs</a>"
//   page_url = "https://example.com"
//   result = ["https://example.com/docs.html"]
pub fn extract_links(html: &str, page_url: &str) -> Vec<String> {
    let mut links = Vec::new();

    // Parse the HTML into a document
    let document = Html::parse_document(html);

    // Create a CSS selector to find all <a> tags with an href
    // Selector::parse returns Result, so we use .unwrap() which panics on
    // error. This is OK here because the selector is a constant and known
    // to be valid.
    let selector = Selector::parse("a[href]").unwrap();

    // Parse the page URL once - we need it to resolve relative links
    let base = match Url::parse(page_url) {
        Ok(url) => url,
        Err(_) => {
            // If the page URL is invalid we can't resolve relative links
            eprintln!("Warning: Invalid page URL: {}", page_url);
            return links;
        }
    };

    for element in document.select(&selector) {
        if let Some(href) = element.value().attr("href") {
            if let Some(absolute_url) = resolve_url(&base, href) {
                // Only keep HTTP/HTTPS links
                if absolute_url.starts_with("http://") || absolute_url.starts_with("https://") {
                    links.push(absolute_url);
                }
            }
        }
    }

    links
}

// Resolves a possibly-relative href to an absolute URL
//
// Returns: Some(absolute_url) or None if the href can't become a URL
//
// Examples:
//   base = "https://example.com/page"
//   href = "/docs.html" -> Some("https://example.com/docs.html")
//   href = "#section" -> None (same-page anchor, not a new page)
//   href = "javascript:void(0)" -> filtered later (not http)
fn resolve_url(base: &Url, href: &str) -> Option<String> {
    // Same-page anchors never lead anywhere new
    if href.starts_with('#') {
        return None;
    }

    // If it's already absolute (has a scheme), parsing works directly;
    // if it's relative, parsing fails and we join it with the base URL
    match Url::parse(href) {
        Ok(url) => Some(url.to_string()),
        Err(_) => match base.join(href) {
            Ok(url) => Some(url.to_string()),
            Err(_) => None, // Invalid URL, skip it
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_absolute_link() {
        let html = r#"<a href="https://www.rust-lang.org">Rust</a>"#;
        let links = extract_links(html, "https://example.com");
        assert_eq!(links, vec!["https://www.rust-lang.org/"]);
    }

    #[test]
    fn test_resolve_relative_link() {
        let html = r#"<a href="/docs.html">Docs</a>"#;
        let links = extract_links(html, "https://example.com/page.html");
        assert_eq!(links, vec!["https://example.com/docs.html"]);
    }

    #[test]
    fn test_skip_mailto_and_anchor() {
        // Double-hash raw string: the anchor href contains `"#`, which
        // would end a plain r#"..."# literal early
        let html = r##"
            <a href="mailto:test@example.com">Email</a>
            <a href="#top">Top</a>
            <a href="javascript:void(0)">Click</a>
        "##;
        let links = extract_links(html, "https://example.com");
        assert_eq!(links.len(), 0);
    }

    #[test]
    fn test_keeps_duplicates_and_off_domain() {
        // Deduplication and domain scoping happen in the controller,
        // so this function must report everything it sees
        let html = r#"
            <a href="https://other.test/a.html">A</a>
            <a href="/b.html">B</a>
            <a href="/b.html">B again</a>
        "#;
        let links = extract_links(html, "https://example.com/page/");
        assert_eq!(
            links,
            vec![
                "https://other.test/a.html",
                "https://example.com/b.html",
                "https://example.com/b.html",
            ]
        );
    }
}
