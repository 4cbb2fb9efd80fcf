//! Crawl eligibility filter
//!
//! A pure predicate deciding whether a discovered URL may be enqueued.
//! Rules apply in a fixed order and short-circuit on the first rejection,
//! so flipping one policy flag only affects its own rule.

use url::Url;

/// Policy knobs for [`is_crawlable`]
#[derive(Debug, Clone, Default)]
pub struct CrawlPolicy {
    /// Reject URLs whose origin differs from the seed's
    pub same_origin: bool,

    /// Reject URLs containing a query string
    pub strip_query: bool,

    /// Reject URLs containing any of these substrings
    pub exclude: Vec<String>,
}

/// Decides whether a candidate URL is eligible for enqueuing
///
/// Rules, in order:
/// 1. Empty or unparsable candidates are rejected
/// 2. Only `http` and `https` schemes are accepted
/// 3. With `same_origin`, the candidate's origin must equal `seed_origin`
/// 4. With `strip_query`, candidates containing `?` are rejected
/// 5. Candidates containing any exclusion substring are rejected
///
/// # Arguments
///
/// * `candidate` - The discovered URL as an absolute string
/// * `policy` - The active crawl policy
/// * `seed_origin` - The seed's origin as produced by [`super::origin_of`]
pub fn is_crawlable(candidate: &str, policy: &CrawlPolicy, seed_origin: &str) -> bool {
    if candidate.is_empty() {
        return false;
    }

    let parsed = match Url::parse(candidate) {
        Ok(url) => url,
        Err(_) => return false,
    };

    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return false;
    }

    if policy.same_origin && super::origin_of(&parsed) != seed_origin {
        return false;
    }

    if policy.strip_query && candidate.contains('?') {
        return false;
    }

    if policy.exclude.iter().any(|s| candidate.contains(s.as_str())) {
        return false;
    }

    true
}
