//! Deterministic artifact filenames for fetched pages
//!
//! Each crawled page is persisted to disk so the checker can run against a
//! file and so error locations are clickable. The filename is derived from
//! the URL: stable across runs, distinct for typical same-host paths, and
//! always carrying an HTML extension.

use url::Url;

/// Tokens substituted for URL metacharacters so that
/// `/page?a=1` and `/page/a/1` derive different names.
const TOKEN_QUERY: &str = "_query_";
const TOKEN_AMP: &str = "_and_";
const TOKEN_EQ: &str = "_eq_";
const TOKEN_HASH: &str = "_hash_";

/// Fallback name when nothing usable remains after sanitizing
const DEFAULT_NAME: &str = "page";

/// Derives a filesystem-safe filename from a URL
///
/// Host, path, and query all contribute. `?`, `&`, `=`, and `#` map to fixed
/// literal tokens; every other character outside `[A-Za-z0-9.-]` becomes an
/// underscore; underscore runs collapse; the result always ends in `.html`.
///
/// # Example
///
/// ```
/// use sitecheck::urlutil::url_to_filename;
/// use url::Url;
///
/// let url = Url::parse("https://x.test/docs/intro?lang=en").unwrap();
/// assert_eq!(url_to_filename(&url), "x.test_docs_intro_query_lang_eq_en.html");
/// ```
pub fn url_to_filename(url: &Url) -> String {
    let mut raw = String::new();
    raw.push_str(url.host_str().unwrap_or(""));
    raw.push_str(url.path());
    if let Some(query) = url.query() {
        raw.push('?');
        raw.push_str(query);
    }

    let mut name = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '?' => name.push_str(TOKEN_QUERY),
            '&' => name.push_str(TOKEN_AMP),
            '=' => name.push_str(TOKEN_EQ),
            '#' => name.push_str(TOKEN_HASH),
            c if c.is_ascii_alphanumeric() || c == '-' || c == '.' => name.push(c),
            _ => name.push('_'),
        }
    }

    let mut collapsed = String::with_capacity(name.len());
    for ch in name.chars() {
        if ch == '_' && collapsed.ends_with('_') {
            continue;
        }
        collapsed.push(ch);
    }
    let trimmed = collapsed.trim_matches(|c| c == '_' || c == '.');

    let stem = if trimmed.is_empty() {
        DEFAULT_NAME
    } else {
        trimmed
    };

    if stem.ends_with(".html") || stem.ends_with(".htm") {
        stem.to_string()
    } else {
        format!("{}.html", stem)
    }
}
