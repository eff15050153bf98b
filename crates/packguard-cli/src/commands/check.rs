//! Check command implementation.

use crate::cli::CheckArgs;
use crate::commands::project_root;
use crate::output::OutputFormatter;
use crate::progress::CliProgress;
use anyhow::Result;
use packguard_core::CapturedOutput;
use packguard_core::CommandRunner;
use packguard_core::NoopProgress;
use packguard_core::PackRunner;
use packguard_core::VerifyConfig;
use packguard_core::verify_package;
use std::path::Path;
use std::process::ExitCode;

pub fn execute(
    args: &CheckArgs,
    root: Option<&Path>,
    formatter: &dyn OutputFormatter,
    show_progress: bool,
) -> Result<ExitCode> {
    let mut config = VerifyConfig::for_project(project_root(root)?);
    config.pack.program.clone_from(&args.npm);

    let runner: Box<dyn PackRunner> = match &args.pack_output {
        Some(file) => Box::new(CapturedOutput::from_file(file)?),
        None => Box::new(CommandRunner::new(config.pack.clone())),
    };

    let outcome = if show_progress {
        let mut progress = CliProgress::new();
        verify_package(&config, &*runner, &mut progress)
    } else {
        verify_package(&config, &*runner, &mut NoopProgress)
    };

    formatter.format_outcome(&outcome)?;

    Ok(ExitCode::from(outcome.exit_code()))
}
