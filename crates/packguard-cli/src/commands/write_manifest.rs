//! Write-manifest command implementation.

use crate::commands::project_root;
use crate::output::OutputFormatter;
use anyhow::Result;
use packguard_core::VerifyConfig;
use packguard_core::scan::relative_display;
use packguard_core::write_manifest;
use std::path::Path;
use std::process::ExitCode;

pub fn execute(root: Option<&Path>, formatter: &dyn OutputFormatter) -> Result<ExitCode> {
    let config = VerifyConfig::for_project(project_root(root)?);

    let written = write_manifest(&config)?;

    formatter.format_manifest_written(&relative_display(&written, &config.project_root))?;

    Ok(ExitCode::SUCCESS)
}
