//! File and directory validation
//!
//! Validates HTML files already on disk: a single file, or every
//! HTML-extension file beneath a directory. Files run sequentially through
//! the checker (no pool); each result is keyed by the path relative to the
//! current working directory.

use crate::checker::{parse_issues, run_checker, CheckerHandle};
use crate::config::ValidateOptions;
use crate::report::{print_page_line, PageResult, RunSummary};
use crate::validate::page::is_ok;
use crate::{Result, SitecheckError};
use std::path::{Path, PathBuf};

/// Returns true for `.html`/`.htm` extensions, case-insensitively
fn has_html_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("html") || e.eq_ignore_ascii_case("htm"))
        .unwrap_or(false)
}

/// Recursively enumerates HTML files beneath `dir`, sorted for a
/// deterministic validation order
fn collect_html_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let mut pending = vec![dir.to_path_buf()];

    while let Some(current) = pending.pop() {
        for entry in std::fs::read_dir(&current)? {
            let path = entry?.path();
            if path.is_dir() {
                pending.push(path);
            } else if has_html_extension(&path) {
                files.push(path);
            }
        }
    }

    files.sort();
    Ok(files)
}

/// Resolves the target path to the list of files to validate
///
/// # Errors
///
/// * `PathNotFound` - the path does not exist
/// * `NotHtmlFile` - the path is a single file without an HTML extension
fn resolve_targets(path: &Path) -> Result<Vec<PathBuf>> {
    let absolute = std::fs::canonicalize(path).map_err(|_| SitecheckError::PathNotFound {
        path: path.to_path_buf(),
    })?;

    if absolute.is_file() {
        if !has_html_extension(&absolute) {
            return Err(SitecheckError::NotHtmlFile { path: absolute });
        }
        return Ok(vec![absolute]);
    }

    collect_html_files(&absolute)
}

/// Keys a result by the path relative to the current working directory,
/// falling back to the absolute path outside of it
fn relative_key(path: &Path) -> String {
    std::env::current_dir()
        .ok()
        .and_then(|cwd| cwd.canonicalize().ok())
        .and_then(|cwd| path.strip_prefix(&cwd).map(Path::to_path_buf).ok())
        .unwrap_or_else(|| path.to_path_buf())
        .display()
        .to_string()
}

/// Validates one on-disk file through the checker
pub async fn validate_one_file(
    checker: &CheckerHandle,
    file: &Path,
    key: &str,
    options: &ValidateOptions,
) -> Result<PageResult> {
    let outcome = run_checker(checker, file).await?;
    let issues = parse_issues(&outcome, options.warnings_enabled(), file)?;

    Ok(PageResult {
        url: key.to_string(),
        final_url: key.to_string(),
        ok: is_ok(issues.errors.len(), issues.warnings.len(), options),
        errors: issues.errors,
        warnings: issues.warnings,
        links: Vec::new(),
        depth: 0,
        saved_path: Some(file.to_path_buf()),
    })
}

/// Validates a file or directory tree
///
/// Path resolution failures are fatal; per-file checker failures are
/// absorbed into failed results and the run continues.
pub async fn validate_files(
    path: &Path,
    options: &ValidateOptions,
    checker: &CheckerHandle,
) -> Result<RunSummary> {
    let targets = resolve_targets(path)?;
    tracing::info!(
        "Validating {} file(s) under {}",
        targets.len(),
        path.display()
    );

    let mut summary = RunSummary::default();

    for file in &targets {
        let key = relative_key(file);
        let result = match validate_one_file(checker, file, &key, options).await {
            Ok(r) => r,
            Err(e) => {
                tracing::debug!("File {} failed: {}", key, e);
                PageResult::failed(&key, 0, e.to_string())
            }
        };
        summary.record(&result);
        if !options.json {
            print_page_line(&result);
        }
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_html_extension_detection() {
        assert!(has_html_extension(Path::new("a/index.html")));
        assert!(has_html_extension(Path::new("a/index.htm")));
        assert!(has_html_extension(Path::new("a/INDEX.HTML")));
        assert!(!has_html_extension(Path::new("a/style.css")));
        assert!(!has_html_extension(Path::new("a/README")));
    }

    #[test]
    fn test_missing_path_is_path_not_found() {
        let result = resolve_targets(Path::new("/nonexistent/site"));
        assert!(matches!(result, Err(SitecheckError::PathNotFound { .. })));
    }

    #[test]
    fn test_non_html_file_rejected() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("notes.txt");
        std::fs::write(&file, "hello").unwrap();

        let result = resolve_targets(&file);
        assert!(matches!(result, Err(SitecheckError::NotHtmlFile { .. })));
    }

    #[test]
    fn test_single_html_file_accepted() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("index.html");
        std::fs::write(&file, "<html></html>").unwrap();

        let targets = resolve_targets(&file).unwrap();
        assert_eq!(targets.len(), 1);
    }

    #[test]
    fn test_directory_enumeration_is_recursive_and_filtered() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("sub/deeper")).unwrap();
        std::fs::write(dir.path().join("a.html"), "x").unwrap();
        std::fs::write(dir.path().join("sub/b.htm"), "x").unwrap();
        std::fs::write(dir.path().join("sub/deeper/c.html"), "x").unwrap();
        std::fs::write(dir.path().join("sub/skip.css"), "x").unwrap();

        let targets = resolve_targets(dir.path()).unwrap();
        assert_eq!(targets.len(), 3);
        assert!(targets.iter().all(|p| has_html_extension(p)));
    }

    #[test]
    fn test_empty_directory_yields_no_targets() {
        let dir = TempDir::new().unwrap();
        let targets = resolve_targets(dir.path()).unwrap();
        assert!(targets.is_empty());
    }
}
