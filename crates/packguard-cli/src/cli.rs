//! CLI argument parsing using clap.

use clap::Parser;
use clap::Subcommand;
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "packguard")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Arguments for the default `check` command
    #[command(flatten)]
    pub check: CheckArgs,

    /// Package root (default: current directory)
    #[arg(short = 'C', long, global = true, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Enable verbose output and debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

impl Cli {
    /// Subcommand to run; a bare invocation means `check`.
    pub fn resolved_command(self) -> Commands {
        self.command.unwrap_or(Commands::Check(self.check))
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Verify the package is safe to publish (default)
    Check(CheckArgs),
    /// Write the CommonJS build metadata file
    WriteManifest,
    /// Generate shell completions
    Completion(CompletionArgs),
}

#[derive(clap::Args)]
pub struct CheckArgs {
    /// Packaging executable used for the dry-run
    #[arg(long, value_name = "PROGRAM", default_value = "npm")]
    pub npm: String,

    /// Read dry-run output from a file instead of running npm
    #[arg(long, value_name = "FILE", conflicts_with = "npm")]
    pub pack_output: Option<PathBuf>,
}

#[derive(clap::Args)]
pub struct CompletionArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_bare_invocation_is_check() {
        let cli = Cli::try_parse_from(["packguard"]).unwrap();
        match cli.resolved_command() {
            Commands::Check(args) => {
                assert_eq!(args.npm, "npm");
                assert!(args.pack_output.is_none());
            }
            _ => panic!("expected check"),
        }
    }

    #[test]
    fn test_top_level_check_flags() {
        let cli = Cli::try_parse_from(["packguard", "--pack-output", "pack.json", "-C", "pkg"]).unwrap();
        assert_eq!(cli.root, Some(PathBuf::from("pkg")));
        match cli.resolved_command() {
            Commands::Check(args) => assert_eq!(args.pack_output, Some(PathBuf::from("pack.json"))),
            _ => panic!("expected check"),
        }
    }

    #[test]
    fn test_explicit_subcommands() {
        let cli = Cli::try_parse_from(["packguard", "check", "--npm", "pnpm"]).unwrap();
        assert!(matches!(cli.resolved_command(), Commands::Check(ref a) if a.npm == "pnpm"));

        let cli = Cli::try_parse_from(["packguard", "write-manifest", "--json"]).unwrap();
        assert!(cli.json);
        assert!(matches!(cli.resolved_command(), Commands::WriteManifest));
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["packguard", "-q", "-v"]).is_err());
    }
}
