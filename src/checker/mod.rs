//! External checker management
//!
//! The actual HTML validation is done by the Nu Html Checker (vnu.jar),
//! an opaque subprocess running on the JVM. This module locates a Java
//! runtime, obtains and caches the jar, and exposes a [`CheckerHandle`]
//! that the rest of the crate passes around explicitly instead of reading
//! ambient global state.

mod diagnostics;
mod runner;

pub use diagnostics::{parse_issues, ParsedIssues};
pub use runner::{run_checker, CheckerOutcome};

use crate::{Result, SitecheckError};
use std::path::{Path, PathBuf};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::process::Command;

/// Pinned release of the Nu Html Checker
const VNU_DOWNLOAD_URL: &str =
    "https://github.com/validator/validator/releases/download/latest/vnu.jar";

/// Environment override for the jar location (useful in CI and tests)
const JAR_ENV_VAR: &str = "SITECHECK_VNU_JAR";

/// A jar file is a ZIP archive; anything not starting with this signature
/// is a corrupt or partial download
const ZIP_SIGNATURE: [u8; 4] = [0x50, 0x4b, 0x03, 0x04];

/// Resolved paths needed to invoke the checker
///
/// Acquired once per run and passed explicitly into every subprocess
/// invocation.
#[derive(Debug, Clone)]
pub struct CheckerHandle {
    /// The `java` executable (currently always discovered via PATH)
    pub java: PathBuf,

    /// The vnu.jar archive
    pub jar: PathBuf,
}

impl CheckerHandle {
    /// Locates a Java runtime and the checker jar
    ///
    /// Resolution order for the jar: the `jar_override` option, the
    /// `SITECHECK_VNU_JAR` environment variable, then the per-user cache
    /// (downloading on a miss).
    ///
    /// # Errors
    ///
    /// * `JavaRuntimeMissing` - no runnable `java` on PATH
    /// * `CheckerUnavailable` - the jar cannot be obtained or is corrupt
    pub async fn acquire(jar_override: Option<&Path>) -> Result<Self> {
        let java = find_java().await?;

        if let Some(jar) = jar_override {
            return Self::from_explicit_jar(java, jar).await;
        }
        if let Ok(jar) = std::env::var(JAR_ENV_VAR) {
            return Self::from_explicit_jar(java, Path::new(&jar)).await;
        }

        let jar = obtain_cached_jar().await?;
        Ok(Self { java, jar })
    }

    async fn from_explicit_jar(java: PathBuf, jar: &Path) -> Result<Self> {
        if !jar_is_valid(jar).await {
            return Err(SitecheckError::CheckerUnavailable {
                reason: format!("{} is missing or not a jar archive", jar.display()),
            });
        }
        Ok(Self {
            java,
            jar: jar.to_path_buf(),
        })
    }
}

/// Confirms a runnable Java by spawning `java -version`
async fn find_java() -> Result<PathBuf> {
    let probe = Command::new("java")
        .arg("-version")
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .status()
        .await;

    match probe {
        Ok(status) if status.success() => Ok(PathBuf::from("java")),
        _ => Err(SitecheckError::JavaRuntimeMissing),
    }
}

/// Returns the deterministic cache location for the jar
fn jar_cache_path() -> Result<PathBuf> {
    let base = dirs::cache_dir().ok_or_else(|| SitecheckError::CheckerUnavailable {
        reason: "no cache directory on this system".to_string(),
    })?;
    Ok(base.join("sitecheck").join("vnu.jar"))
}

/// Checks the jar's leading bytes against the ZIP signature
///
/// Only the signature-length prefix is read; the jar is tens of megabytes
/// and never needs to be in memory here.
async fn jar_is_valid(path: &Path) -> bool {
    let mut file = match tokio::fs::File::open(path).await {
        Ok(f) => f,
        Err(_) => return false,
    };
    let mut leading = [0u8; ZIP_SIGNATURE.len()];
    match file.read_exact(&mut leading).await {
        Ok(_) => leading == ZIP_SIGNATURE,
        Err(_) => false,
    }
}

/// Returns the cached jar, downloading and installing it if absent or corrupt
///
/// The download goes to a `.part` file first and is renamed into place only
/// after it validates, so a failed download never leaves a partial file at
/// the final name.
async fn obtain_cached_jar() -> Result<PathBuf> {
    let jar = jar_cache_path()?;

    if jar_is_valid(&jar).await {
        tracing::debug!("Using cached checker at {}", jar.display());
        return Ok(jar);
    }

    tracing::info!("Checker not cached, downloading from {}", VNU_DOWNLOAD_URL);

    if let Some(parent) = jar.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    let response = reqwest::get(VNU_DOWNLOAD_URL)
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|e| SitecheckError::CheckerUnavailable {
            reason: format!("download failed: {}", e),
        })?;

    let bytes = response
        .bytes()
        .await
        .map_err(|e| SitecheckError::CheckerUnavailable {
            reason: format!("download failed: {}", e),
        })?;

    if bytes.len() < ZIP_SIGNATURE.len() || bytes[..ZIP_SIGNATURE.len()] != ZIP_SIGNATURE {
        return Err(SitecheckError::CheckerUnavailable {
            reason: "downloaded artifact is not a jar archive".to_string(),
        });
    }

    let partial = jar.with_extension("jar.part");
    let mut file = tokio::fs::File::create(&partial).await?;
    file.write_all(&bytes).await?;
    file.flush().await?;
    drop(file);

    tokio::fs::rename(&partial, &jar).await?;
    tracing::info!("Checker installed at {}", jar.display());

    Ok(jar)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(bytes: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(bytes).unwrap();
        file.flush().unwrap();
        file
    }

    #[tokio::test]
    async fn test_zip_signature_accepted() {
        let file = write_temp(b"PK\x03\x04rest-of-archive");
        assert!(jar_is_valid(file.path()).await);
    }

    #[tokio::test]
    async fn test_non_zip_rejected() {
        let file = write_temp(b"<html>not a jar</html>");
        assert!(!jar_is_valid(file.path()).await);
    }

    #[tokio::test]
    async fn test_truncated_file_rejected() {
        let file = write_temp(b"PK");
        assert!(!jar_is_valid(file.path()).await);
    }

    #[tokio::test]
    async fn test_missing_file_rejected() {
        assert!(!jar_is_valid(Path::new("/nonexistent/vnu.jar")).await);
    }

    #[tokio::test]
    async fn test_explicit_invalid_jar_is_checker_unavailable() {
        let file = write_temp(b"garbage");
        let result =
            CheckerHandle::from_explicit_jar(PathBuf::from("java"), file.path()).await;
        assert!(matches!(
            result,
            Err(SitecheckError::CheckerUnavailable { .. })
        ));
    }
}
