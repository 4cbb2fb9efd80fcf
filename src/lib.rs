//! Sitecheck: a crawling HTML validator
//!
//! This crate validates HTML documents — a single file, a directory tree, a raw
//! string, or a crawled website — through the Nu Html Checker (vnu.jar) invoked
//! as a subprocess, and aggregates per-page diagnostics into a run summary.

pub mod checker;
pub mod config;
pub mod crawler;
pub mod input;
pub mod report;
pub mod urlutil;
pub mod validate;

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for sitecheck operations
#[derive(Debug, Error)]
pub enum SitecheckError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Input is empty or not a string")]
    InvalidInput,

    #[error("No Java runtime found on this system (the checker runs on the JVM)")]
    JavaRuntimeMissing,

    #[error("Checker binary unavailable: {reason}")]
    CheckerUnavailable { reason: String },

    #[error("Checker produced no structured output for {}", path.display())]
    NoStructuredOutput { path: PathBuf },

    #[error("Path not found: {}", path.display())]
    PathNotFound { path: PathBuf },

    #[error("Not an HTML file: {}", path.display())]
    NotHtmlFile { path: PathBuf },

    #[error("Fetch failed for {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("HTTP {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for sitecheck operations
pub type Result<T> = std::result::Result<T, SitecheckError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::ValidateOptions;
pub use report::{Issue, PageResult, RunSummary};
pub use validate::run;
