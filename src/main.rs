//! CLI entry point for recommendarr.

use std::process::ExitCode;

use clap::Parser;
use tracing::error;

mod app;
mod cli;

use cli::Args;

/// Process outcome mapped to an exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ProcessExit {
    Success,
    Failure,
}

impl From<ProcessExit> for ExitCode {
    fn from(exit: ProcessExit) -> Self {
        match exit {
            ProcessExit::Success => ExitCode::SUCCESS,
            ProcessExit::Failure => ExitCode::FAILURE,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    let default_level = app::terminal::default_log_level(args.verbose, args.quiet);
    app::terminal::init_tracing(default_level);

    match app::runtime::run_recommendarr(args).await {
        Ok(exit) => exit.into(),
        Err(err) => {
            error!(error = %format!("{err:#}"), "Fatal error, exiting");
            ProcessExit::Failure.into()
        }
    }
}
