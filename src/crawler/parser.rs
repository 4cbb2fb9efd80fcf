//! Link extraction
//!
//! Parses fetched HTML permissively and yields normalized absolute hyperlink
//! targets for crawl expansion. Malformed markup never fails: scraper's
//! html5ever front end produces a best-effort tree for any input.

use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

/// Extracts all outbound hyperlinks from an HTML document
///
/// # Link Rules
///
/// - Only `<a href="...">` is considered
/// - Relative, protocol-relative, and absolute hrefs resolve against
///   `base_url`
/// - Fragments are stripped, so `/a#top` and `/a#bottom` are the same link
/// - `javascript:`, `mailto:`, `tel:`, and `data:` hrefs are dropped, as is
///   anything that does not resolve to http(s)
/// - Each distinct absolute URL appears at most once, in first-occurrence
///   order
///
/// # Arguments
///
/// * `html` - The HTML content to parse
/// * `base_url` - The base URL for resolving relative links (the page's
///   final URL after redirects)
///
/// # Example
///
/// ```
/// use sitecheck::crawler::extract_links;
/// use url::Url;
///
/// let base = Url::parse("https://x.test/").unwrap();
/// let links = extract_links("<a href='/a'></a><a href='/a'></a>", &base);
/// assert_eq!(links, vec!["https://x.test/a"]);
/// ```
pub fn extract_links(html: &str, base_url: &Url) -> Vec<String> {
    let document = Html::parse_document(html);

    let selector = match Selector::parse("a[href]") {
        Ok(s) => s,
        Err(_) => return Vec::new(),
    };

    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for element in document.select(&selector) {
        let href = match element.value().attr("href") {
            Some(h) => h,
            None => continue,
        };

        if let Some(absolute) = resolve_link(href, base_url) {
            if seen.insert(absolute.clone()) {
                links.push(absolute);
            }
        }
    }

    links
}

/// Resolves an href to an absolute, fragment-free URL string
///
/// Returns None for hrefs that should be excluded:
/// - javascript:, mailto:, tel:, data: schemes
/// - Unresolvable hrefs
/// - Non-HTTP(S) URLs after resolution
fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    match base_url.join(href) {
        Ok(mut absolute) => {
            if absolute.scheme() != "http" && absolute.scheme() != "https" {
                return None;
            }
            absolute.set_fragment(None);
            Some(absolute.to_string())
        }
        Err(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_url() -> Url {
        Url::parse("https://example.com/page").unwrap()
    }

    fn links(html: &str) -> Vec<String> {
        extract_links(html, &base_url())
    }

    #[test]
    fn test_extract_absolute_link() {
        let found = links(r#"<a href="https://other.com/page">Link</a>"#);
        assert_eq!(found, vec!["https://other.com/page"]);
    }

    #[test]
    fn test_extract_relative_link() {
        let found = links(r#"<a href="/other">Link</a>"#);
        assert_eq!(found, vec!["https://example.com/other"]);
    }

    #[test]
    fn test_extract_relative_path_link() {
        let found = links(r#"<a href="other">Link</a>"#);
        assert_eq!(found, vec!["https://example.com/other"]);
    }

    #[test]
    fn test_protocol_relative_link() {
        let found = links(r#"<a href="//cdn.example.com/x">Link</a>"#);
        assert_eq!(found, vec!["https://cdn.example.com/x"]);
    }

    #[test]
    fn test_duplicate_hrefs_yield_one_entry() {
        let found = links(r#"<a href='/a'></a><a href='/a'></a>"#);
        assert_eq!(found, vec!["https://example.com/a"]);
    }

    #[test]
    fn test_fragment_stripped_and_deduplicated() {
        let found = links(r##"<a href="/a#top"></a><a href="/a#bottom"></a>"##);
        assert_eq!(found, vec!["https://example.com/a"]);
    }

    #[test]
    fn test_first_occurrence_order_preserved() {
        let found = links(r#"<a href="/b"></a><a href="/a"></a><a href="/b"></a>"#);
        assert_eq!(
            found,
            vec!["https://example.com/b", "https://example.com/a"]
        );
    }

    #[test]
    fn test_skip_javascript_link() {
        assert!(links(r#"<a href="javascript:void(0)">Link</a>"#).is_empty());
    }

    #[test]
    fn test_skip_mailto_link() {
        assert!(links(r#"<a href="mailto:test@example.com">Email</a>"#).is_empty());
    }

    #[test]
    fn test_skip_tel_link() {
        assert!(links(r#"<a href="tel:+1234567890">Call</a>"#).is_empty());
    }

    #[test]
    fn test_skip_data_uri() {
        assert!(links(r#"<a href="data:text/html,<h1>x</h1>">Data</a>"#).is_empty());
    }

    #[test]
    fn test_fragment_only_href_resolves_to_page_itself() {
        // "#section" resolves to the base URL with the fragment stripped
        let found = links(r##"<a href="#section">Jump</a>"##);
        assert_eq!(found, vec!["https://example.com/page"]);
    }

    #[test]
    fn test_malformed_markup_does_not_panic() {
        let found = links("<a href='/ok'><div><<<>>>broken</a <a href=");
        assert_eq!(found, vec!["https://example.com/ok"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(links("").is_empty());
    }

    #[test]
    fn test_non_anchor_urls_ignored() {
        let html = r#"
            <link rel="stylesheet" href="/style.css">
            <script src="/app.js"></script>
            <img src="/pic.png">
        "#;
        assert!(links(html).is_empty());
    }
}
