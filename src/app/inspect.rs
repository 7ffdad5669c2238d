//! `profiles` subcommand: shows what Radarr offers for the quality-profile
//! and root-folder settings.

use anyhow::{Context, Result};
use recommendarr_core::{Config, RadarrClient};

use crate::ProcessExit;

pub(crate) async fn run_profiles(config: &Config) -> Result<ProcessExit> {
    let radarr = RadarrClient::new(&config.radarr)?;

    let profiles = radarr
        .quality_profiles()
        .await
        .context("Failed to list quality profiles")?;
    println!("Quality profiles:");
    for profile in &profiles {
        let selected = config
            .radarr
            .quality_profile
            .as_deref()
            .is_some_and(|name| name.to_lowercase() == profile.name.to_lowercase());
        let marker = if selected { " (selected)" } else { "" };
        println!("  {:>4}  {}{marker}", profile.id, profile.name);
    }

    let folders = radarr
        .root_folders()
        .await
        .context("Failed to list root folders")?;
    println!("Root folders:");
    for folder in &folders {
        let marker = if folder.path == config.radarr.root_folder {
            " (selected)"
        } else {
            ""
        };
        let access = if folder.accessible { "accessible" } else { "inaccessible" };
        println!("  {}  [{access}]{marker}", folder.path);
    }

    Ok(ProcessExit::Success)
}
