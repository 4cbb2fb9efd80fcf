//! Sitecheck main entry point
//!
//! Command-line interface for the crawling HTML validator.

use clap::Parser;
use sitecheck::config::{load_options, validate as validate_options, ValidateOptions};
use sitecheck::report::to_json;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Sitecheck: validate HTML from a URL, file, directory, or raw string
///
/// URLs are crawled breadth-first up to the configured depth and every
/// reachable page is validated through the Nu Html Checker. Exit code is 0
/// when every page passes and 1 otherwise.
#[derive(Parser, Debug)]
#[command(name = "sitecheck")]
#[command(version)]
#[command(about = "Validate HTML documents and crawled websites", long_about = None)]
struct Cli {
    /// URL, file path, directory path, or raw HTML string
    #[arg(value_name = "INPUT")]
    input: String,

    /// Path to a TOML options file (flags below override it)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Crawl expansion ceiling (pages at this depth are not expanded)
    #[arg(short, long)]
    depth: Option<u32>,

    /// Maximum concurrent fetches + checker subprocesses
    #[arg(short, long)]
    concurrency: Option<usize>,

    /// Collect warning-grade diagnostics (they fail pages unless --errors-only)
    #[arg(short, long)]
    warnings: bool,

    /// Reject URLs containing this substring (repeatable)
    #[arg(short = 'x', long = "exclude", value_name = "SUBSTRING")]
    exclude: Vec<String>,

    /// Pass/fail ignores warnings even when collected
    #[arg(long)]
    errors_only: bool,

    /// Follow links to any origin, not just the seed's
    #[arg(long)]
    any_origin: bool,

    /// Reject URLs containing a query string
    #[arg(long)]
    strip_query: bool,

    /// User-Agent header sent on fetches
    #[arg(long, value_name = "STRING")]
    user_agent: Option<String>,

    /// Print one JSON document instead of incremental lines
    #[arg(long)]
    json: bool,

    /// Directory where fetched pages are saved
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Use this checker jar instead of the cached/downloaded one
    #[arg(long, value_name = "JAR")]
    checker_jar: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let options = build_options(&cli)?;

    let summary = match sitecheck::run(&cli.input, &options).await {
        Ok(summary) => summary,
        Err(e) => {
            tracing::error!("Run failed: {}", e);
            std::process::exit(1);
        }
    };

    if options.json {
        println!("{}", to_json(&summary)?);
    } else {
        println!();
        println!("{} passed, {} failed", summary.passed, summary.failed);
    }

    if summary.failed > 0 {
        std::process::exit(1);
    }

    Ok(())
}

/// Merges the optional TOML options file with command-line flags
///
/// Flags win over the file; the file wins over defaults.
fn build_options(cli: &Cli) -> anyhow::Result<ValidateOptions> {
    let mut options = match &cli.config {
        Some(path) => {
            tracing::info!("Loading options from: {}", path.display());
            load_options(path)?
        }
        None => ValidateOptions::default(),
    };

    if let Some(depth) = cli.depth {
        options.depth = depth;
    }
    if let Some(concurrency) = cli.concurrency {
        options.concurrency = concurrency;
    }
    if cli.warnings {
        options.warnings = 1;
    }
    if !cli.exclude.is_empty() {
        options.exclude = cli.exclude.clone();
    }
    if cli.errors_only {
        options.errors_only = true;
    }
    if cli.any_origin {
        options.same_origin = false;
    }
    if cli.strip_query {
        options.strip_query = true;
    }
    if let Some(user_agent) = &cli.user_agent {
        options.user_agent = user_agent.clone();
    }
    if cli.json {
        options.json = true;
    }
    if let Some(dir) = &cli.output_dir {
        options.output_dir = Some(dir.clone());
    }
    if let Some(jar) = &cli.checker_jar {
        options.checker_jar = Some(jar.clone());
    }

    validate_options(&options)?;
    Ok(options)
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sitecheck=warn"),
            1 => EnvFilter::new("sitecheck=info"),
            2 => EnvFilter::new("sitecheck=debug,info"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
