//! Error types for package verification.

use crate::report::Violation;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `VerifyError`.
pub type Result<T> = std::result::Result<T, VerifyError>;

/// Coarse classification of a failed verification, used for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailureCategory {
    /// The packaging dry-run could not be run to completion.
    Invocation,
    /// The dry-run output carried no usable JSON payload.
    MalformedOutput,
    /// The build-output manifest is missing or wrong.
    Manifest,
    /// A required path is absent from the packaged file list.
    RequiredPath,
    /// A packaged path matches a forbidden path pattern.
    PathLeak,
    /// A source file references a forbidden name.
    ContentLeak,
    /// A forbidden pattern could not be compiled.
    Configuration,
    /// Reading the source tree failed.
    Io,
}

impl fmt::Display for FailureCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Invocation => "invocation",
            Self::MalformedOutput => "malformed-output",
            Self::Manifest => "manifest",
            Self::RequiredPath => "required-path",
            Self::PathLeak => "path-leak",
            Self::ContentLeak => "content-leak",
            Self::Configuration => "configuration",
            Self::Io => "io",
        };
        f.write_str(name)
    }
}

/// Errors that stop a verification run.
///
/// Every variant is fatal. The two leak variants carry the aggregated list
/// produced by their scanning pass; all others describe the first problem
/// encountered.
#[derive(Error, Debug)]
pub enum VerifyError {
    /// Packaging command could not be started, exited non-zero, or produced
    /// unreadable output.
    #[error("packaging command `{command}` {reason}")]
    Invocation {
        /// Rendered command line.
        command: String,
        /// What went wrong.
        reason: String,
        /// Captured standard error of the command (may be empty).
        stderr: String,
    },

    /// No `[` ... `]` pair in the dry-run output.
    #[error("could not find npm pack JSON payload in command output")]
    PayloadNotFound,

    /// The bracketed slice of the dry-run output is not valid JSON.
    #[error("npm pack JSON payload is malformed: {0}")]
    PayloadMalformed(#[source] serde_json::Error),

    /// Build output directory is absent, so no manifest can be written.
    #[error("{} directory does not exist. Run the CJS build first.", path.display())]
    BuildOutputMissing {
        /// The missing directory.
        path: PathBuf,
    },

    /// Build-output manifest file does not exist.
    #[error("missing {} for CommonJS runtime metadata", path.display())]
    ManifestMissing {
        /// Path of the expected manifest.
        path: PathBuf,
    },

    /// Build-output manifest is not valid JSON.
    #[error("{} is not valid JSON: {source}", path.display())]
    ManifestMalformed {
        /// Path of the manifest.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// Build-output manifest declares the wrong module type.
    #[error("{} must set {{\"type\":\"{expected}\"}}", path.display())]
    ManifestFieldMismatch {
        /// Path of the manifest.
        path: PathBuf,
        /// Required `type` value.
        expected: String,
        /// Value actually found, rendered as JSON for non-strings.
        found: Option<String>,
    },

    /// A path that must ship is absent from the dry-run file list.
    #[error("npm pack output is missing {path}")]
    RequiredPathMissing {
        /// The required path.
        path: String,
    },

    /// Packaged paths matched the forbidden path catalog.
    #[error("forbidden publish paths found ({})", paths.len())]
    PathLeak {
        /// Offending paths, in file-list order.
        paths: Vec<String>,
    },

    /// Source files matched the forbidden content catalog.
    #[error("forbidden private/product code references found ({})", violations.len())]
    ContentLeak {
        /// One violation per offending file, in traversal order.
        violations: Vec<Violation>,
    },

    /// A catalog entry failed to compile.
    #[error("invalid forbidden pattern '{label}': {source}")]
    InvalidPattern {
        /// Label of the offending entry.
        label: String,
        /// Underlying regex error.
        #[source]
        source: regex::Error,
    },

    /// File read or write failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// Path being accessed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Directory traversal failed.
    #[error("directory traversal failed: {0}")]
    Walk(#[from] walkdir::Error),
}

impl VerifyError {
    /// Returns the reporting category for this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use packguard_core::FailureCategory;
    /// use packguard_core::VerifyError;
    ///
    /// let err = VerifyError::RequiredPathMissing {
    ///     path: "dist-cjs/package.json".to_string(),
    /// };
    /// assert_eq!(err.category(), FailureCategory::RequiredPath);
    /// ```
    #[must_use]
    pub const fn category(&self) -> FailureCategory {
        match self {
            Self::Invocation { .. } => FailureCategory::Invocation,
            Self::PayloadNotFound | Self::PayloadMalformed(_) => FailureCategory::MalformedOutput,
            Self::BuildOutputMissing { .. }
            | Self::ManifestMissing { .. }
            | Self::ManifestMalformed { .. }
            | Self::ManifestFieldMismatch { .. } => FailureCategory::Manifest,
            Self::RequiredPathMissing { .. } => FailureCategory::RequiredPath,
            Self::PathLeak { .. } => FailureCategory::PathLeak,
            Self::ContentLeak { .. } => FailureCategory::ContentLeak,
            Self::InvalidPattern { .. } => FailureCategory::Configuration,
            Self::Io { .. } | Self::Walk(_) => FailureCategory::Io,
        }
    }

    /// Returns `true` for the two scanning failures that carry an aggregated
    /// list of findings.
    #[must_use]
    pub const fn is_leak(&self) -> bool {
        matches!(self, Self::PathLeak { .. } | Self::ContentLeak { .. })
    }

    /// Returns one line per finding for the leak variants, empty otherwise.
    ///
    /// Path leaks render as the bare path; content leaks as
    /// `file:line (label)`.
    #[must_use]
    pub fn diagnostics(&self) -> Vec<String> {
        match self {
            Self::PathLeak { paths } => paths.clone(),
            Self::ContentLeak { violations } => {
                violations.iter().map(ToString::to_string).collect()
            }
            _ => Vec::new(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
