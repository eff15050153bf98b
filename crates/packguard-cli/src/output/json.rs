//! JSON output formatter for machine-readable results.

use super::formatter::JsonOutput;
use super::formatter::OutputFormatter;
use anyhow::Result;
use packguard_core::FailureCategory;
use packguard_core::VerificationOutcome;
use packguard_core::VerifyError;
use packguard_core::Violation;
use serde::Serialize;
use std::io::Write;
use std::io::{self};

pub struct JsonFormatter;

#[derive(Serialize)]
struct FailureData<'a> {
    category: FailureCategory,
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    paths: &'a [String],
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    violations: &'a [Violation],
}

impl JsonFormatter {
    fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }

    fn failure_data(err: &VerifyError) -> FailureData<'_> {
        let (paths, violations): (&[String], &[Violation]) = match err {
            VerifyError::PathLeak { paths } => (paths, &[]),
            VerifyError::ContentLeak { violations } => (&[], violations),
            _ => (&[], &[]),
        };
        FailureData {
            category: err.category(),
            paths,
            violations,
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_outcome(&self, outcome: &VerificationOutcome) -> Result<()> {
        match outcome {
            VerificationOutcome::Success(summary) => {
                Self::output(&JsonOutput::success("check", summary))
            }
            VerificationOutcome::Failure(err) => Self::output(&JsonOutput::failure(
                "check",
                err.to_string(),
                Self::failure_data(err),
            )),
        }
    }

    fn format_manifest_written(&self, path: &str) -> Result<()> {
        #[derive(Serialize)]
        struct ManifestData<'a> {
            path: &'a str,
        }

        Self::output(&JsonOutput::success("write-manifest", ManifestData { path }))
    }

    fn format_error(&self, error: &anyhow::Error) {
        let output = JsonOutput::<()>::error("error", format!("{error:#}"));
        let _ = Self::output(&output);
    }
}
