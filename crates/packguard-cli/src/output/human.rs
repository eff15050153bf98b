//! Human-readable output formatter with colors and styling.
//!
//! Success lines go to stdout; failure diagnostics always go to stderr,
//! even in quiet mode.

use super::formatter::OutputFormatter;
use crate::error::FailureReport;
use crate::error::describe_failure;
use anyhow::Result;
use console::Term;
use console::style;
use packguard_core::VerificationOutcome;
use packguard_core::VerificationSummary;

pub struct HumanFormatter {
    verbose: bool,
    quiet: bool,
    use_colors: bool,
    out: Term,
    err: Term,
}

impl HumanFormatter {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            use_colors: console::colors_enabled(),
            out: Term::stdout(),
            err: Term::stderr(),
        }
    }

    fn success_lines(summary: &VerificationSummary, verbose: bool) -> Vec<String> {
        let mut lines = vec!["Public package check passed.".to_string()];
        if verbose {
            lines.push(format!("  Tarball entries: {}", summary.tarball_entries));
            lines.push(format!("  Source files scanned: {}", summary.files_scanned));
        }
        lines
    }

    fn failure_lines(report: &FailureReport) -> Vec<String> {
        let mut lines = vec![report.headline.clone()];
        lines.extend(report.findings.iter().map(|f| format!("- {f}")));
        if let Some(hint) = report.hint {
            lines.push(format!("HINT: {hint}"));
        }
        lines
    }

    fn write_success(&self, summary: &VerificationSummary) {
        let lines = Self::success_lines(summary, self.verbose);
        for (i, line) in lines.iter().enumerate() {
            let line = if i == 0 && self.use_colors {
                format!("{} {line}", style("✓").green().bold())
            } else {
                line.clone()
            };
            let _ = self.out.write_line(&line);
        }
    }

    fn write_failure(&self, report: &FailureReport) {
        let lines = Self::failure_lines(report);
        let last = lines.len() - 1;
        for (i, line) in lines.iter().enumerate() {
            let styled = if !self.use_colors {
                line.clone()
            } else if i == 0 {
                style(line).red().bold().to_string()
            } else if i == last && report.hint.is_some() {
                style(line).yellow().to_string()
            } else {
                line.clone()
            };
            let _ = self.err.write_line(&styled);
        }
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_outcome(&self, outcome: &VerificationOutcome) -> Result<()> {
        match outcome {
            VerificationOutcome::Success(summary) => {
                if !self.quiet {
                    self.write_success(summary);
                }
            }
            VerificationOutcome::Failure(err) => self.write_failure(&describe_failure(err)),
        }
        Ok(())
    }

    fn format_manifest_written(&self, path: &str) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        if self.use_colors {
            let _ = self
                .out
                .write_line(&format!("{} Wrote {path}", style("✓").green().bold()));
        } else {
            let _ = self.out.write_line(&format!("Wrote {path}"));
        }
        Ok(())
    }

    fn format_error(&self, error: &anyhow::Error) {
        // Always show errors, even in quiet mode
        if self.use_colors {
            let _ = self
                .err
                .write_line(&format!("{} {error:?}", style("ERROR:").red().bold()));
        } else {
            let _ = self.err.write_line(&format!("ERROR: {error:?}"));
        }
    }
}
