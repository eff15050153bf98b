//! Subcommand implementations.

pub mod check;
pub mod completion;
pub mod write_manifest;

use anyhow::Context;
use anyhow::Result;
use std::env;
use std::path::Path;
use std::path::PathBuf;

/// Resolves `--root` to an absolute path, defaulting to the current directory.
pub fn project_root(root: Option<&Path>) -> Result<PathBuf> {
    match root {
        Some(dir) => dir
            .canonicalize()
            .with_context(|| format!("cannot access package root {}", dir.display())),
        None => env::current_dir().context("failed to get current directory"),
    }
}
