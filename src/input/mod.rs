//! Input classification
//!
//! Decides whether the positional input string is a URL to crawl, a
//! filesystem path to validate, or a raw HTML fragment.

use std::path::PathBuf;
use url::Url;

/// The three kinds of top-level input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputKind {
    /// An http(s) URL - the seed of a crawl
    Url(Url),

    /// A file or directory path
    Path(PathBuf),

    /// A raw HTML fragment to validate as-is
    Html(String),
}

/// Classifies an input string
///
/// Rules, in priority order:
/// 1. Parses as an absolute `http`/`https` URL → [`InputKind::Url`]
/// 2. Starts with `<` after trimming → [`InputKind::Html`]
/// 3. Anything else → [`InputKind::Path`] (a missing path surfaces later as
///    `PathNotFound` naming the input, which is the most useful failure for
///    an ambiguous string)
///
/// Returns `None` for empty/blank input; the caller maps that to
/// `InvalidInput` before any async work starts.
pub fn classify_input(input: &str) -> Option<InputKind> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(url) = Url::parse(trimmed) {
        if url.scheme() == "http" || url.scheme() == "https" {
            return Some(InputKind::Url(url));
        }
    }

    if trimmed.starts_with('<') {
        return Some(InputKind::Html(input.to_string()));
    }

    Some(InputKind::Path(PathBuf::from(trimmed)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_https_url() {
        let kind = classify_input("https://example.com/page").unwrap();
        assert!(matches!(kind, InputKind::Url(_)));
    }

    #[test]
    fn test_classify_http_url() {
        let kind = classify_input("http://example.com/").unwrap();
        assert!(matches!(kind, InputKind::Url(_)));
    }

    #[test]
    fn test_non_http_scheme_is_not_a_url() {
        // ftp parses as a URL but is not crawlable, so it falls through to
        // the path branch
        let kind = classify_input("ftp://example.com/file").unwrap();
        assert!(matches!(kind, InputKind::Path(_)));
    }

    #[test]
    fn test_classify_html_fragment() {
        let kind = classify_input("<!DOCTYPE html><html></html>").unwrap();
        assert!(matches!(kind, InputKind::Html(_)));
    }

    #[test]
    fn test_classify_html_with_leading_whitespace() {
        let kind = classify_input("  \n<html></html>").unwrap();
        assert!(matches!(kind, InputKind::Html(_)));
    }

    #[test]
    fn test_classify_path() {
        let kind = classify_input("./docs/index.html").unwrap();
        assert_eq!(kind, InputKind::Path(PathBuf::from("./docs/index.html")));
    }

    #[test]
    fn test_empty_input() {
        assert!(classify_input("").is_none());
        assert!(classify_input("   \t\n").is_none());
    }

    #[test]
    fn test_windows_drive_path_is_not_a_url() {
        // "C:\..." parses as a URL with scheme "c"; must classify as a path
        let kind = classify_input("C:\\pages\\index.html").unwrap();
        assert!(matches!(kind, InputKind::Path(_)));
    }
}
