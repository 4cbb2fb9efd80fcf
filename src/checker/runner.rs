//! Checker subprocess invocation
//!
//! Runs the checker against exactly one file and captures its streams.
//! The checker's exit code is not a reliable pass/fail signal (it can be
//! non-zero on malformed input while still emitting valid diagnostics), so
//! a non-zero exit is never treated as fatal here; interpretation belongs
//! to the diagnostics parser.

use crate::checker::CheckerHandle;
use crate::Result;
use std::path::Path;
use tokio::process::Command;

/// Proxy variables cleared from the child environment so the checker cannot
/// be redirected through an unexpected proxy
const PROXY_VARS: [&str; 6] = [
    "HTTP_PROXY",
    "HTTPS_PROXY",
    "http_proxy",
    "https_proxy",
    "NO_PROXY",
    "no_proxy",
];

/// Captured output of one checker invocation
#[derive(Debug, Clone)]
pub struct CheckerOutcome {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: Option<i32>,
}

/// Builds the checker invocation for one file
///
/// Arguments select JSON output and disable both language auto-detection
/// and JVM system-proxy usage; the proxy environment variables are removed
/// from the child environment.
fn checker_command(handle: &CheckerHandle, file: &Path) -> Command {
    let mut command = Command::new(&handle.java);
    command
        .arg("-Djava.net.useSystemProxies=false")
        .arg("-jar")
        .arg(&handle.jar)
        .arg("--format")
        .arg("json")
        .arg("--no-langdetect")
        .arg(file);

    for var in PROXY_VARS {
        command.env_remove(var);
    }

    command
}

/// Invokes the checker on a single file
///
/// # Arguments
///
/// * `handle` - Resolved java + jar paths
/// * `file` - The HTML file to check
///
/// # Returns
///
/// The captured streams and exit code; errors only if the subprocess could
/// not be spawned or waited on at all.
pub async fn run_checker(handle: &CheckerHandle, file: &Path) -> Result<CheckerOutcome> {
    tracing::debug!("Running checker on {}", file.display());
    let output = checker_command(handle, file).output().await?;

    Ok(CheckerOutcome {
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        exit_code: output.status.code(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsStr;
    use std::io::Write;
    use std::os::unix::fs::PermissionsExt;
    use std::path::PathBuf;
    use tempfile::TempDir;

    /// Builds a handle whose "java" is a shell script, so runner tests need
    /// neither a JVM nor the real jar
    fn stub_checker(dir: &TempDir, script_body: &str) -> CheckerHandle {
        let script = dir.path().join("fake-checker.sh");
        let mut file = std::fs::File::create(&script).unwrap();
        writeln!(file, "#!/bin/sh\n{}", script_body).unwrap();
        drop(file);
        let mut perms = std::fs::metadata(&script).unwrap().permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&script, perms).unwrap();

        CheckerHandle {
            java: script,
            jar: dir.path().join("vnu.jar"),
        }
    }

    #[tokio::test]
    async fn test_captures_stdout_and_exit_code() {
        let dir = TempDir::new().unwrap();
        let handle = stub_checker(&dir, r#"echo '{"messages":[]}'"#);
        let outcome = run_checker(&handle, Path::new("input.html")).await.unwrap();

        assert_eq!(outcome.stdout.trim(), r#"{"messages":[]}"#);
        assert_eq!(outcome.exit_code, Some(0));
    }

    #[tokio::test]
    async fn test_nonzero_exit_is_not_an_error() {
        let dir = TempDir::new().unwrap();
        let handle = stub_checker(&dir, "echo 'diagnostics' >&2; exit 1");
        let outcome = run_checker(&handle, Path::new("input.html")).await.unwrap();

        assert_eq!(outcome.exit_code, Some(1));
        assert!(outcome.stderr.contains("diagnostics"));
    }

    #[test]
    fn test_proxy_vars_removed_from_child_env() {
        let handle = CheckerHandle {
            java: PathBuf::from("java"),
            jar: PathBuf::from("vnu.jar"),
        };
        let command = checker_command(&handle, Path::new("input.html"));

        // An env_remove shows up as a (name, None) entry in the command's
        // captured environment; inspecting it avoids mutating the test
        // process's own environment
        let envs: Vec<(&OsStr, Option<&OsStr>)> = command.as_std().get_envs().collect();
        for var in PROXY_VARS {
            assert!(
                envs.contains(&(OsStr::new(var), None)),
                "{} should be cleared for the child",
                var
            );
        }
    }

    #[test]
    fn test_command_selects_json_and_disables_langdetect() {
        let handle = CheckerHandle {
            java: PathBuf::from("java"),
            jar: PathBuf::from("vnu.jar"),
        };
        let command = checker_command(&handle, Path::new("input.html"));

        let args: Vec<&OsStr> = command.as_std().get_args().collect();
        assert!(args.contains(&OsStr::new("--format")));
        assert!(args.contains(&OsStr::new("json")));
        assert!(args.contains(&OsStr::new("--no-langdetect")));
        assert!(args.contains(&OsStr::new("-Djava.net.useSystemProxies=false")));
        assert_eq!(args.last().copied(), Some(OsStr::new("input.html")));
    }

    #[tokio::test]
    async fn test_unspawnable_checker_is_io_error() {
        let handle = CheckerHandle {
            java: "/nonexistent/java".into(),
            jar: "/nonexistent/vnu.jar".into(),
        };
        assert!(run_checker(&handle, Path::new("input.html")).await.is_err());
    }
}
