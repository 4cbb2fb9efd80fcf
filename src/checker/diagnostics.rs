//! Checker diagnostic parsing
//!
//! The checker emits JSON diagnostics, but the payload can be wrapped in
//! preamble/postamble text (JVM warnings, progress lines) and appears either
//! as a top-level array or nested under a `messages` field. This module
//! locates the first well-formed payload in the captured streams and
//! normalizes each entry into an [`Issue`].

use crate::checker::CheckerOutcome;
use crate::report::Issue;
use crate::{Result, SitecheckError};
use serde::Deserialize;
use std::path::Path;

/// Diagnostics split by severity
#[derive(Debug, Clone, Default)]
pub struct ParsedIssues {
    pub errors: Vec<Issue>,
    pub warnings: Vec<Issue>,
}

/// The two payload shapes the checker is known to emit, resolved once at
/// parse time rather than by ad hoc property probing
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DiagnosticPayload {
    Nested { messages: Vec<RawDiagnostic> },
    TopLevel(Vec<RawDiagnostic>),
}

impl DiagnosticPayload {
    fn into_entries(self) -> Vec<RawDiagnostic> {
        match self {
            Self::Nested { messages } => messages,
            Self::TopLevel(entries) => entries,
        }
    }
}

/// One diagnostic entry as the checker reports it
///
/// Every field is optional; normalization decides the fallbacks.
#[derive(Debug, Deserialize)]
struct RawDiagnostic {
    #[serde(rename = "type")]
    kind: Option<String>,

    #[serde(rename = "subType")]
    sub_type: Option<String>,

    message: Option<String>,

    #[serde(rename = "lastLine")]
    last_line: Option<u64>,
    #[serde(rename = "firstLine")]
    first_line: Option<u64>,
    line: Option<u64>,

    #[serde(rename = "lastColumn")]
    last_column: Option<u64>,
    #[serde(rename = "firstColumn")]
    first_column: Option<u64>,
    column: Option<u64>,
}

impl RawDiagnostic {
    fn line(&self) -> u64 {
        self.last_line.or(self.first_line).or(self.line).unwrap_or(0)
    }

    fn col(&self) -> u64 {
        self.last_column
            .or(self.first_column)
            .or(self.column)
            .unwrap_or(0)
    }

    /// Whitespace-collapsed message; None when effectively empty
    fn normalized_message(&self) -> Option<String> {
        let msg = self
            .message
            .as_deref()?
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");
        if msg.is_empty() {
            None
        } else {
            Some(msg)
        }
    }
}

/// Parses the checker's captured output into classified issues
///
/// Scans stdout first, then stderr, for the first embedded payload. Entries
/// typed `error` become errors. Entries typed `info` or `warning` become
/// warnings only when warning collection is enabled AND the entry's
/// `subType` also marks it warning-grade; informational entries that are
/// not warning-grade are dropped even with warnings enabled. Entries with
/// empty messages are dropped silently.
///
/// # Errors
///
/// `NoStructuredOutput` when neither stream contains a parseable payload;
/// fatal for the single item being validated, not for the run.
pub fn parse_issues(
    outcome: &CheckerOutcome,
    warnings_enabled: bool,
    source: &Path,
) -> Result<ParsedIssues> {
    let payload = find_payload(&outcome.stdout)
        .or_else(|| find_payload(&outcome.stderr))
        .ok_or_else(|| SitecheckError::NoStructuredOutput {
            path: source.to_path_buf(),
        })?;

    let mut parsed = ParsedIssues::default();

    for entry in payload.into_entries() {
        let msg = match entry.normalized_message() {
            Some(m) => m,
            None => continue,
        };
        let issue = Issue::new(entry.line(), entry.col(), msg);

        match entry.kind.as_deref() {
            Some("error") => parsed.errors.push(issue),
            Some("info") | Some("warning") => {
                // Both the primary type and the sub-type must agree the
                // entry is warning-grade; plain informational messages are
                // dropped regardless of the warnings flag
                if warnings_enabled && entry.sub_type.as_deref() == Some("warning") {
                    parsed.warnings.push(issue);
                }
            }
            _ => {}
        }
    }

    Ok(parsed)
}

/// Finds the first well-formed diagnostic payload embedded in `text`
///
/// Tries every position that could start a JSON document; the stream
/// deserializer tolerates trailing text after a complete value, so
/// postamble noise is fine.
fn find_payload(text: &str) -> Option<DiagnosticPayload> {
    for (index, ch) in text.char_indices() {
        if ch != '{' && ch != '[' {
            continue;
        }
        let mut stream =
            serde_json::Deserializer::from_str(&text[index..]).into_iter::<DiagnosticPayload>();
        if let Some(Ok(payload)) = stream.next() {
            return Some(payload);
        }
    }
    None
}
