//! Verification outcome and progress reporting.

use crate::error::Result;
use crate::error::VerifyError;
use serde::Serialize;
use std::fmt;
use std::path::Path;

/// A forbidden content reference found in a source file.
///
/// `line` is a 1-based index into the file that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// File path relative to the project root, forward-slash separated.
    pub file: String,
    /// Line on which the match starts.
    pub line: usize,
    /// Label of the pattern that matched.
    pub label: String,
}

impl Violation {
    /// Creates a new violation record.
    #[must_use]
    pub fn new(file: impl Into<String>, line: usize, label: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            line,
            label: label.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{} ({})", self.file, self.line, self.label)
    }
}

/// Counts gathered by a successful verification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct VerificationSummary {
    /// Entries in the dry-run file list.
    pub tarball_entries: usize,
    /// Source files whose contents were scanned.
    pub files_scanned: usize,
}

/// Terminal value of a verification run.
///
/// The process boundary maps this onto an exit status with
/// [`VerificationOutcome::exit_code`].
#[derive(Debug)]
pub enum VerificationOutcome {
    /// Every stage passed.
    Success(VerificationSummary),
    /// A stage failed; later stages did not run.
    Failure(VerifyError),
}

impl VerificationOutcome {
    /// Returns `true` if every stage passed.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Returns the failure, if any.
    #[must_use]
    pub const fn error(&self) -> Option<&VerifyError> {
        match self {
            Self::Success(_) => None,
            Self::Failure(err) => Some(err),
        }
    }

    /// Process exit status: 0 on success, 1 for every failure category.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Success(_) => 0,
            Self::Failure(_) => 1,
        }
    }
}

impl From<Result<VerificationSummary>> for VerificationOutcome {
    fn from(result: Result<VerificationSummary>) -> Self {
        match result {
            Ok(summary) => Self::Success(summary),
            Err(err) => Self::Failure(err),
        }
    }
}

/// Pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Running the packaging dry-run.
    Pack,
    /// Extracting the file list from the dry-run output.
    Parse,
    /// Checking the build-output manifest.
    Manifest,
    /// Checking that required paths are packaged.
    RequiredPath,
    /// Matching packaged paths against the path catalog.
    PathScan,
    /// Matching source file contents against the content catalog.
    ContentScan,
}

impl Stage {
    /// Short human-readable description of the stage.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Pack => "Running packaging dry-run",
            Self::Parse => "Reading dry-run file list",
            Self::Manifest => "Checking build metadata",
            Self::RequiredPath => "Checking required paths",
            Self::PathScan => "Scanning packaged paths",
            Self::ContentScan => "Scanning source files",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Observer for verification progress.
///
/// # Examples
///
/// ```
/// use packguard_core::Stage;
/// use packguard_core::VerifyProgress;
/// use std::path::Path;
///
/// struct StageLog(Vec<Stage>);
///
/// impl VerifyProgress for StageLog {
///     fn on_stage(&mut self, stage: Stage) {
///         self.0.push(stage);
///     }
///
///     fn on_file_scanned(&mut self, _path: &Path) {}
///
///     fn on_complete(&mut self) {}
/// }
/// ```
pub trait VerifyProgress {
    /// Called when a stage begins.
    fn on_stage(&mut self, stage: Stage);

    /// Called after a source file's contents have been scanned.
    fn on_file_scanned(&mut self, path: &Path);

    /// Called once when the run ends, whatever the outcome.
    fn on_complete(&mut self);
}

/// Progress observer that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopProgress;

impl VerifyProgress for NoopProgress {
    fn on_stage(&mut self, _stage: Stage) {}

    fn on_file_scanned(&mut self, _path: &Path) {}

    fn on_complete(&mut self) {}
}
