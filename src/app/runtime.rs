//! Run-once and periodic execution of the pipeline.

use anyhow::{Context, Result};
use recommendarr_core::{Config, Pipeline};
use tracing::{debug, info};

use crate::ProcessExit;
use crate::app::inspect;
use crate::cli::{Args, Command};

pub(crate) async fn run_recommendarr(args: Args) -> Result<ProcessExit> {
    let config = Config::load(Some(&args.env_file)).context("Failed to load configuration")?;
    let config = if args.once { config.run_once() } else { config };
    debug!(?config, "Configuration loaded");

    if let Some(Command::Profiles) = args.command {
        return inspect::run_profiles(&config).await;
    }

    let pipeline = Pipeline::from_config(&config)?;
    info!("Recommendarr starting");

    match config.schedule.interval() {
        None => {
            pipeline.run_once().await?;
        }
        Some(interval) => {
            info!(schedule = ?config.schedule, "Running periodically");
            pipeline.run_every(interval, None).await;
        }
    }
    Ok(ProcessExit::Success)
}
