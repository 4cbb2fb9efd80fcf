//! Result data model and run reporting
//!
//! This module defines the per-page and per-run result types and the two
//! output modes: incremental human-readable lines and a single JSON document.

use serde::Serialize;
use std::path::PathBuf;

/// One diagnostic reported by the checker
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    /// Source line (0 when the checker reported none)
    pub line: u64,

    /// Source column (0 when the checker reported none)
    pub col: u64,

    /// Diagnostic message, whitespace-collapsed, never empty
    pub msg: String,
}

impl Issue {
    pub fn new(line: u64, col: u64, msg: impl Into<String>) -> Self {
        Self {
            line,
            col,
            msg: msg.into(),
        }
    }
}

/// Outcome of validating a single page or file
#[derive(Debug, Clone)]
pub struct PageResult {
    /// The URL (or path key) this result is for
    pub url: String,

    /// Final URL after redirects (equals `url` for files)
    pub final_url: String,

    /// True iff zero errors and (warnings disabled or zero warnings)
    pub ok: bool,

    pub errors: Vec<Issue>,
    pub warnings: Vec<Issue>,

    /// Outbound links extracted from the page (absolute URLs)
    pub links: Vec<String>,

    /// BFS distance from the seed (0 for the seed and for file inputs)
    pub depth: u32,

    /// Where the fetched HTML was persisted, for clickable path:line:col
    /// output. Carried on the result so concurrently validated pages share
    /// no mutable map.
    pub saved_path: Option<PathBuf>,
}

impl PageResult {
    /// Builds a synthetic failed result from a per-item error.
    ///
    /// Used by the orchestrator's failure-absorbing worker: a fetch, parse,
    /// or checker failure for one page becomes a single error issue at 0:0
    /// rather than aborting the batch.
    pub fn failed(url: impl Into<String>, depth: u32, reason: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            final_url: url.clone(),
            url,
            ok: false,
            errors: vec![Issue::new(0, 0, reason)],
            warnings: Vec::new(),
            links: Vec::new(),
            depth,
            saved_path: None,
        }
    }
}

/// One entry of [`RunSummary::results`]
#[derive(Debug, Clone, Serialize)]
pub struct PageOutcome {
    pub url: String,
    pub ok: bool,
    pub errors: Vec<Issue>,
    pub warnings: Vec<Issue>,
}

impl From<&PageResult> for PageOutcome {
    fn from(result: &PageResult) -> Self {
        Self {
            url: result.url.clone(),
            ok: result.ok,
            errors: result.errors.clone(),
            warnings: result.warnings.clone(),
        }
    }
}

/// Aggregated outcome of one validation run
///
/// Invariant: `passed + failed == results.len()`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    pub passed: usize,
    pub failed: usize,
    pub results: Vec<PageOutcome>,
}

impl RunSummary {
    /// Records one completed result, keeping the pass/fail counters in sync
    /// with the result list.
    pub fn record(&mut self, result: &PageResult) {
        if result.ok {
            self.passed += 1;
        } else {
            self.failed += 1;
        }
        self.results.push(PageOutcome::from(result));
    }
}

/// Renders the human-readable report for one page: a status line, then one
/// detail line per issue with a clickable `path:line:col` suffix for
/// failing pages. Warning-grade issues carry a `warning:` prefix so a page
/// failed only by warnings still explains itself.
pub fn format_page_report(result: &PageResult) -> String {
    if result.ok {
        return format!("✓ {}", result.url);
    }

    let location = result
        .saved_path
        .as_deref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| result.url.clone());

    let mut report = format!("✗ {}", result.url);
    for issue in &result.errors {
        report.push_str(&format!(
            "\n    {} ({}:{}:{})",
            issue.msg, location, issue.line, issue.col
        ));
    }
    for issue in &result.warnings {
        report.push_str(&format!(
            "\n    warning: {} ({}:{}:{})",
            issue.msg, location, issue.line, issue.col
        ));
    }
    report
}

/// Prints one page's report.
///
/// Suppressed entirely in JSON mode; the orchestrator calls this as each
/// batch completes so output is incremental.
pub fn print_page_line(result: &PageResult) {
    println!("{}", format_page_report(result));
}

/// Serializes the whole run as a single pretty-printed JSON document.
pub fn to_json(summary: &RunSummary) -> serde_json::Result<String> {
    serde_json::to_string_pretty(summary)
}
