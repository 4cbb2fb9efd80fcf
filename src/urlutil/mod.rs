//! URL utilities: origin comparison, crawl eligibility, artifact filenames

mod filename;
mod filter;

pub use filename::url_to_filename;
pub use filter::{is_crawlable, CrawlPolicy};

use url::Url;

/// Returns the origin of a URL as a `scheme://host:port` string
///
/// Two URLs are same-origin exactly when their origins compare equal. The
/// port is the effective port, so `https://x.test/` and `https://x.test:443/`
/// share an origin.
pub fn origin_of(url: &Url) -> String {
    let host = url.host_str().unwrap_or("");
    match url.port_or_known_default() {
        Some(port) => format!("{}://{}:{}", url.scheme(), host, port),
        None => format!("{}://{}", url.scheme(), host),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_includes_scheme_host_port() {
        let url = Url::parse("https://example.com:8443/path?q=1").unwrap();
        assert_eq!(origin_of(&url), "https://example.com:8443");
    }

    #[test]
    fn test_default_port_normalized() {
        let explicit = Url::parse("https://example.com:443/").unwrap();
        let implicit = Url::parse("https://example.com/other").unwrap();
        assert_eq!(origin_of(&explicit), origin_of(&implicit));
    }

    #[test]
    fn test_different_schemes_differ() {
        let http = Url::parse("http://example.com/").unwrap();
        let https = Url::parse("https://example.com/").unwrap();
        assert_ne!(origin_of(&http), origin_of(&https));
    }
}
