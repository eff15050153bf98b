//! Output formatter trait for CLI results.

use anyhow::Result;
use packguard_core::VerificationOutcome;
use serde::Serialize;

/// Common output formatter trait
pub trait OutputFormatter {
    /// Format the result of a verification run
    fn format_outcome(&self, outcome: &VerificationOutcome) -> Result<()>;

    /// Format a successfully written manifest
    fn format_manifest_written(&self, path: &str) -> Result<()>;

    /// Format error message
    fn format_error(&self, error: &anyhow::Error);
}

/// Generic JSON output structure
#[derive(Debug, Serialize)]
pub struct JsonOutput<T> {
    pub operation: String,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Failure,
    Error,
}

impl<T: Serialize> JsonOutput<T> {
    pub fn success(operation: impl Into<String>, data: T) -> Self {
        Self {
            operation: operation.into(),
            status: Status::Success,
            data: Some(data),
            error: None,
        }
    }

    /// A check that ran to completion and rejected the package.
    pub fn failure(operation: impl Into<String>, error: impl Into<String>, data: T) -> Self {
        Self {
            operation: operation.into(),
            status: Status::Failure,
            data: Some(data),
            error: Some(error.into()),
        }
    }

    pub fn error(operation: impl Into<String>, error: impl Into<String>) -> JsonOutput<()> {
        JsonOutput {
            operation: operation.into(),
            status: Status::Error,
            data: None,
            error: Some(error.into()),
        }
    }
}
