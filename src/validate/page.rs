//! Single-page validation
//!
//! The per-URL unit of work driven by the crawl orchestrator: fetch the
//! page, persist its HTML under the work directory, run the checker on the
//! file, parse issues, and extract outbound links. Failures propagate as
//! ordinary errors; the orchestrator converts them into failed results so
//! one bad page never aborts a batch.

use crate::checker::{parse_issues, run_checker, CheckerHandle};
use crate::config::ValidateOptions;
use crate::crawler::{extract_links, fetch_page};
use crate::report::PageResult;
use crate::urlutil::url_to_filename;
use crate::Result;
use reqwest::Client;
use std::path::Path;
use url::Url;

/// Decides a result's pass/fail from its collected issues
///
/// A page passes with zero errors and zero collected warnings; with
/// `errors_only`, collected warnings are reported but do not fail the page.
pub fn is_ok(errors_len: usize, warnings_len: usize, options: &ValidateOptions) -> bool {
    errors_len == 0 && (options.errors_only || warnings_len == 0)
}

/// Validates one URL end to end
///
/// # Arguments
///
/// * `client` - Shared HTTP client for the run
/// * `checker` - Resolved checker handle
/// * `url` - The page URL (a normalized absolute http(s) URL)
/// * `depth` - BFS distance from the seed, carried into the result
/// * `options` - Run options (warnings flag, pass/fail policy)
/// * `work_dir` - Directory where the fetched HTML is persisted
pub async fn validate_one_url(
    client: &Client,
    checker: &CheckerHandle,
    url: &str,
    depth: u32,
    options: &ValidateOptions,
    work_dir: &Path,
) -> Result<PageResult> {
    let page = fetch_page(client, url).await?;
    tracing::debug!(
        "Fetched {} ({}, {} bytes)",
        page.final_url,
        page.status_code,
        page.body.len()
    );

    let parsed_url = Url::parse(url)?;
    let saved_path = work_dir.join(url_to_filename(&parsed_url));
    tokio::fs::write(&saved_path, &page.body).await?;

    let outcome = run_checker(checker, &saved_path).await?;
    let issues = parse_issues(&outcome, options.warnings_enabled(), &saved_path)?;

    let final_url = Url::parse(&page.final_url)?;
    let links = extract_links(&page.body, &final_url);

    Ok(PageResult {
        url: url.to_string(),
        final_url: page.final_url,
        ok: is_ok(issues.errors.len(), issues.warnings.len(), options),
        errors: issues.errors,
        warnings: issues.warnings,
        links,
        depth,
        saved_path: Some(saved_path),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_requires_zero_errors() {
        let options = ValidateOptions::default();
        assert!(is_ok(0, 0, &options));
        assert!(!is_ok(1, 0, &options));
    }

    #[test]
    fn test_collected_warnings_fail_the_page() {
        let options = ValidateOptions {
            warnings: 1,
            ..Default::default()
        };
        assert!(!is_ok(0, 1, &options));
    }

    #[test]
    fn test_errors_only_ignores_warnings() {
        let options = ValidateOptions {
            warnings: 1,
            errors_only: true,
            ..Default::default()
        };
        assert!(is_ok(0, 3, &options));
        assert!(!is_ok(1, 0, &options));
    }
}
