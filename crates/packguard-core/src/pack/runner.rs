//! Sources of dry-run output.

use crate::config::PackCommand;
use crate::error::Result;
use crate::error::VerifyError;
use std::fs;
use std::path::Path;
use std::process::Command;
use std::process::Stdio;
use tracing::debug;

/// Produces the raw text output of a packaging dry-run.
pub trait PackRunner {
    /// Runs the dry-run and returns its output.
    fn dry_run(&self) -> Result<String>;
}

/// Runs the packaging command as a child process and captures its stdout.
///
/// The call blocks until the process exits. A non-zero exit status, a spawn
/// failure, or non-UTF-8 output is reported as `VerifyError::Invocation`
/// carrying the captured stderr.
#[derive(Debug, Clone)]
pub struct CommandRunner {
    command: PackCommand,
}

impl CommandRunner {
    /// Creates a runner for `command`.
    #[must_use]
    pub fn new(command: PackCommand) -> Self {
        Self { command }
    }

    fn failure(&self, reason: String, stderr: &[u8]) -> VerifyError {
        VerifyError::Invocation {
            command: self.command.to_string(),
            reason,
            stderr: String::from_utf8_lossy(stderr).trim().to_string(),
        }
    }
}

impl PackRunner for CommandRunner {
    fn dry_run(&self) -> Result<String> {
        debug!(command = %self.command, dir = %self.command.working_dir.display(), "running packaging dry-run");

        let output = Command::new(&self.command.program)
            .args(&self.command.args)
            .current_dir(&self.command.working_dir)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| self.failure(format!("could not be started: {e}"), &[]))?;

        if !output.status.success() {
            return Err(self.failure(format!("failed ({})", output.status), &output.stderr));
        }

        String::from_utf8(output.stdout)
            .map_err(|e| self.failure(format!("produced non-UTF-8 output: {e}"), &output.stderr))
    }
}

/// Replays previously captured dry-run output.
///
/// # Examples
///
/// ```
/// use packguard_core::CapturedOutput;
/// use packguard_core::PackRunner;
///
/// let runner = CapturedOutput::new(r#"[{"files":[]}]"#);
/// assert_eq!(runner.dry_run().unwrap(), r#"[{"files":[]}]"#);
/// ```
#[derive(Debug, Clone)]
pub struct CapturedOutput {
    text: String,
}

impl CapturedOutput {
    /// Wraps already captured output.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Reads captured output from a file, e.g. one written by
    /// `npm pack --dry-run --json > pack.json`.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|e| VerifyError::io(path, e))?;
        Ok(Self::new(String::from_utf8_lossy(&bytes)))
    }
}

impl PackRunner for CapturedOutput {
    fn dry_run(&self) -> Result<String> {
        Ok(self.text.clone())
    }
}
