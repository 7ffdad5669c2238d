//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Recommend movies from a Plex library and request them through Radarr.
///
/// Reads the library, asks a language model for similar movies, and adds
/// each suggestion to Radarr unless it is already there. Service settings
/// come from the environment or a .env file.
#[derive(Parser, Debug)]
#[command(name = "recommendarr")]
#[command(author, version, about)]
pub struct Args {
    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Env file read for settings not present in the environment (skipped if missing)
    #[arg(long, value_name = "PATH", default_value = ".env", global = true)]
    pub env_file: PathBuf,

    /// Run the pipeline a single time even if RUN_INTERVAL_DAYS is set
    #[arg(long)]
    pub once: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Auxiliary commands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List Radarr quality profiles and root folders
    Profiles,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_default_args_parses_successfully() {
        let args = Args::try_parse_from(["recommendarr"]).unwrap();
        assert_eq!(args.verbose, 0);
        assert!(!args.quiet);
        assert!(!args.once);
        assert_eq!(args.env_file, PathBuf::from(".env"));
        assert!(args.command.is_none());
    }

    #[test]
    fn test_cli_verbose_flag_increments_count() {
        let args = Args::try_parse_from(["recommendarr", "-v"]).unwrap();
        assert_eq!(args.verbose, 1);

        let args = Args::try_parse_from(["recommendarr", "-vv"]).unwrap();
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn test_cli_quiet_flag_sets_quiet() {
        let args = Args::try_parse_from(["recommendarr", "--quiet"]).unwrap();
        assert!(args.quiet);
    }

    #[test]
    fn test_cli_env_file_and_once() {
        let args =
            Args::try_parse_from(["recommendarr", "--env-file", "/etc/recommendarr.env", "--once"])
                .unwrap();
        assert_eq!(args.env_file, PathBuf::from("/etc/recommendarr.env"));
        assert!(args.once);
    }

    #[test]
    fn test_cli_profiles_subcommand_accepts_global_flags() {
        let args = Args::try_parse_from(["recommendarr", "profiles", "-v", "--env-file", "x.env"])
            .unwrap();
        assert_eq!(args.command, Some(Command::Profiles));
        assert_eq!(args.verbose, 1);
        assert_eq!(args.env_file, PathBuf::from("x.env"));
    }

    #[test]
    fn test_cli_help_flag_shows_usage() {
        let err = Args::try_parse_from(["recommendarr", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_cli_invalid_flag_returns_error() {
        let err = Args::try_parse_from(["recommendarr", "--invalid-flag"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::UnknownArgument);
    }
}
