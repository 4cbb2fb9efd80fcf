//! Top-level validation entry point
//!
//! Classifies the input string and dispatches to the crawl orchestrator,
//! the file-set validator, or a single inline-HTML check. This is the one
//! function the rest of the crate exists to serve.

mod files;
mod page;

pub use files::{validate_files, validate_one_file};
pub use page::validate_one_url;

use crate::checker::CheckerHandle;
use crate::config::ValidateOptions;
use crate::crawler::crawl;
use crate::input::{classify_input, InputKind};
use crate::report::{print_page_line, PageResult, RunSummary};
use crate::{Result, SitecheckError};
use std::path::PathBuf;

/// Result key for raw-HTML input; the temp file path would be run-specific
/// noise
const INLINE_KEY: &str = "inline";

/// Returns the directory where fetched/inline HTML is persisted for this run
fn work_dir_for_run(options: &ValidateOptions) -> Result<PathBuf> {
    let dir = match &options.output_dir {
        Some(dir) => dir.clone(),
        None => std::env::temp_dir().join(format!("sitecheck-{}", std::process::id())),
    };
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Validates one positional input: a URL to crawl, a path, or raw HTML
///
/// Fails synchronously with `InvalidInput` on empty input, and
/// asynchronously with `JavaRuntimeMissing`/`CheckerUnavailable` when the
/// checker cannot be run at all. Per-page and per-file failures never
/// surface here; they appear as failed entries in the summary.
///
/// # Example
///
/// ```no_run
/// use sitecheck::{run, ValidateOptions};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let summary = run("https://example.com/", &ValidateOptions::default()).await?;
/// println!("{} passed, {} failed", summary.passed, summary.failed);
/// # Ok(())
/// # }
/// ```
pub async fn run(input: &str, options: &ValidateOptions) -> Result<RunSummary> {
    let kind = classify_input(input).ok_or(SitecheckError::InvalidInput)?;

    let checker = CheckerHandle::acquire(options.checker_jar.as_deref()).await?;
    let work_dir = work_dir_for_run(options)?;

    match kind {
        InputKind::Url(seed) => crawl(&seed, options, &checker, &work_dir).await,
        InputKind::Path(path) => validate_files(&path, options, &checker).await,
        InputKind::Html(html) => {
            let file = work_dir.join("inline.html");
            tokio::fs::write(&file, &html).await?;

            let result = match validate_one_file(&checker, &file, INLINE_KEY, options).await {
                Ok(r) => r,
                Err(e) => PageResult::failed(INLINE_KEY, 0, e.to_string()),
            };

            let mut summary = RunSummary::default();
            summary.record(&result);
            if !options.json {
                print_page_line(&result);
            }
            Ok(summary)
        }
    }
}
