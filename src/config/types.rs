use serde::Deserialize;
use std::path::PathBuf;

/// Options controlling one validation run
///
/// All fields have defaults so an empty TOML document (or `Default::default()`)
/// yields a usable configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ValidateOptions {
    /// Crawl expansion ceiling: pages discovered at this depth are validated
    /// but never expanded further
    pub depth: u32,

    /// Maximum simultaneous in-flight fetches + checker subprocesses
    pub concurrency: usize,

    /// 0 disables warning collection, any other value enables it
    pub warnings: u32,

    /// A URL is rejected if any of these substrings occurs in it
    #[serde(default)]
    pub exclude: Vec<String>,

    /// When true, pass/fail ignores warnings even if collected
    #[serde(rename = "errors-only")]
    pub errors_only: bool,

    /// Restrict the crawl to the seed's origin (scheme + host + port)
    #[serde(rename = "same-origin")]
    pub same_origin: bool,

    /// Reject any URL containing a query string
    #[serde(rename = "strip-query")]
    pub strip_query: bool,

    /// User-Agent header sent on page fetches
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Suppress incremental printing and emit one JSON document
    pub json: bool,

    /// Explicit path to the checker jar, bypassing cache/download
    #[serde(rename = "checker-jar")]
    pub checker_jar: Option<PathBuf>,

    /// Where fetched pages are persisted; defaults to a per-run directory
    /// under the system temp dir
    #[serde(rename = "output-dir")]
    pub output_dir: Option<PathBuf>,
}

impl Default for ValidateOptions {
    fn default() -> Self {
        Self {
            depth: 2,
            concurrency: 4,
            warnings: 0,
            exclude: Vec::new(),
            errors_only: false,
            same_origin: true,
            strip_query: false,
            user_agent: format!("sitecheck/{}", env!("CARGO_PKG_VERSION")),
            json: false,
            checker_jar: None,
            output_dir: None,
        }
    }
}

impl ValidateOptions {
    /// Returns true when warning-grade diagnostics should be collected
    pub fn warnings_enabled(&self) -> bool {
        self.warnings > 0
    }
}
