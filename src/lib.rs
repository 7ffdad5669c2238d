//! Recommendarr Core Library
//!
//! Reads a movie library from Plex, asks a chat-completion model for
//! recommendations based on it, and requests each recommendation through
//! Radarr.
//!
//! # Architecture
//!
//! - [`config`] - Configuration assembled once from the environment and `.env`
//! - [`library`] - Plex section listing and XML parsing
//! - [`recommend`] - Chat-completion client and suggestion splitting
//! - [`acquire`] - Radarr client and the per-suggestion request flow
//! - [`pipeline`] - Sequential orchestration of the three services

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod acquire;
pub mod config;
pub mod env_file;
pub mod http_client;
pub mod library;
pub mod pipeline;
pub mod recommend;
mod user_agent;

// Re-export commonly used types
pub use acquire::{
    AcquireError, AcquireOutcome, AcquireStatus, CatalogEntry, MovieRequester, RadarrClient,
};
pub use config::{Config, ConfigError, Schedule};
pub use library::{FetchError, LibraryItem, PlexClient};
pub use pipeline::{IterationTally, Pipeline, PipelineError, RunSummary};
pub use recommend::{OpenAiClient, PromptSource, RecommendError, split_suggestions};
