//! Human-readable descriptions of verification failures.
//!
//! Converts packguard-core's typed errors into the headline, finding list and
//! actionable hint printed by the human formatter.

use packguard_core::FailureCategory;
use packguard_core::VerifyError;

const FAILED: &str = "Public package check failed.";

/// A verification failure rendered for people.
#[derive(Debug, PartialEq, Eq)]
pub struct FailureReport {
    pub headline: String,
    pub findings: Vec<String>,
    pub hint: Option<&'static str>,
}

/// Describes a verification failure.
pub fn describe_failure(err: &VerifyError) -> FailureReport {
    let headline = match err {
        VerifyError::PathLeak { .. } => format!("{FAILED} Forbidden publish paths found:"),
        VerifyError::ContentLeak { .. } => {
            format!("{FAILED} Forbidden private/product code references found:")
        }
        VerifyError::ManifestMissing { path } => {
            format!("{FAILED} Missing {} for CommonJS runtime metadata.", path.display())
        }
        VerifyError::ManifestMalformed { path, .. } => {
            format!("{FAILED} {} is not valid JSON.", path.display())
        }
        VerifyError::ManifestFieldMismatch { path, expected, .. } => {
            format!("{FAILED} {} must set {{\"type\":\"{expected}\"}}.", path.display())
        }
        VerifyError::RequiredPathMissing { path } => {
            format!("{FAILED} npm pack output is missing {path}.")
        }
        VerifyError::Invocation { stderr, .. } if !stderr.is_empty() => {
            format!("{FAILED} {err}\n{stderr}")
        }
        other => format!("{FAILED} {other}"),
    };

    FailureReport {
        headline,
        findings: err.diagnostics(),
        hint: hint(err.category()),
    }
}

/// Suggested next step for each failure category.
pub const fn hint(category: FailureCategory) -> Option<&'static str> {
    match category {
        FailureCategory::Invocation => {
            Some("Make sure npm is installed and `npm pack --dry-run` succeeds in the package root.")
        }
        FailureCategory::MalformedOutput => {
            Some("npm did not print a JSON file list. Check that your npm version supports `--json`.")
        }
        FailureCategory::Manifest => {
            Some("Run the CJS build, then `packguard write-manifest` to emit the metadata file.")
        }
        FailureCategory::RequiredPath => {
            Some("Add the missing path to the `files` field of package.json.")
        }
        FailureCategory::PathLeak => {
            Some("Exclude these paths via the `files` field of package.json or .npmignore.")
        }
        FailureCategory::ContentLeak => {
            Some("Remove the references above before publishing.")
        }
        FailureCategory::Configuration | FailureCategory::Io => None,
    }
}
