//! Packguard CLI - Pre-publish gate that keeps private paths and references
//! out of npm packages.

mod cli;
mod commands;
mod error;
mod logging;
mod output;
mod progress;

use clap::Parser;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();

    logging::init(cli.verbose);

    let formatter = output::create_formatter(cli.json, cli.verbose, cli.quiet);
    let show_progress = !cli.quiet && !cli.json && progress::CliProgress::should_show();
    let root = cli.root.clone();

    let result = match cli.resolved_command() {
        cli::Commands::Check(args) => {
            commands::check::execute(&args, root.as_deref(), &*formatter, show_progress)
        }
        cli::Commands::WriteManifest => {
            commands::write_manifest::execute(root.as_deref(), &*formatter)
        }
        cli::Commands::Completion(args) => {
            commands::completion::execute(args.shell);
            Ok(ExitCode::SUCCESS)
        }
    };

    match result {
        Ok(code) => code,
        Err(err) => {
            formatter.format_error(&err);
            ExitCode::FAILURE
        }
    }
}
