//! The fetch → recommend → request pipeline.
//!
//! Library and recommendation failures abort the run with a
//! [`PipelineError`]. Per-suggestion failures are logged, counted in the
//! [`RunSummary`] and never abort. [`Pipeline::run_every`] repeats runs on
//! a fixed interval and survives failed iterations.

use std::time::Duration;

use thiserror::Error;
use tracing::{error, info, warn};

use crate::acquire::{AcquireError, AcquireOutcome, AcquireStatus, MovieRequester};
use crate::config::Config;
use crate::library::{FetchError, PlexClient, library_titles};
use crate::recommend::{OpenAiClient, PromptSource, RecommendError, split_suggestions};

/// Errors that stop a whole run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The Plex library could not be read.
    #[error("failed to fetch library")]
    Fetch(#[from] FetchError),

    /// No recommendations could be obtained.
    #[error("failed to get recommendations")]
    Recommend(#[from] RecommendError),

    /// The Radarr client could not be constructed.
    #[error("failed to set up Radarr client")]
    Setup(#[from] AcquireError),
}

/// Result for one suggestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionResult {
    /// Suggestion text exactly as split from the model answer.
    pub suggestion: String,
    /// Terminal state it reached.
    pub status: AcquireStatus,
}

/// What a single run did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Number of items read from the library.
    pub library_size: usize,
    /// Per-suggestion results in processing order.
    pub results: Vec<SuggestionResult>,
}

impl RunSummary {
    fn count(&self, status: AcquireStatus) -> usize {
        self.results.iter().filter(|r| r.status == status).count()
    }

    #[must_use]
    pub fn added(&self) -> usize {
        self.count(AcquireStatus::Added)
    }

    #[must_use]
    pub fn already_present(&self) -> usize {
        self.count(AcquireStatus::AlreadyPresent)
    }

    #[must_use]
    pub fn not_found(&self) -> usize {
        self.count(AcquireStatus::NotFound)
    }

    #[must_use]
    pub fn failed(&self) -> usize {
        self.count(AcquireStatus::Failed)
    }

    /// Number of suggestions processed.
    #[must_use]
    pub fn total(&self) -> usize {
        self.results.len()
    }
}

/// Iteration counts from [`Pipeline::run_every`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IterationTally {
    /// Iterations that returned a [`RunSummary`].
    pub succeeded: u64,
    /// Iterations that stopped with a [`PipelineError`].
    pub failed: u64,
}

/// The three service clients, built once and reused across runs.
#[derive(Debug)]
pub struct Pipeline {
    plex: PlexClient,
    section_key: String,
    openai: OpenAiClient,
    prompt: PromptSource,
    requester: MovieRequester,
}

impl Pipeline {
    /// Builds every client from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError`] if any client cannot be constructed.
    pub fn from_config(config: &Config) -> Result<Self, PipelineError> {
        Ok(Self::new(
            PlexClient::new(&config.plex)?,
            config.plex.section_key.clone(),
            OpenAiClient::new(&config.openai)?,
            config.openai.prompt.clone(),
            MovieRequester::new(&config.radarr)?,
        ))
    }

    /// Assembles a pipeline from pre-built parts.
    #[must_use]
    pub fn new(
        plex: PlexClient,
        section_key: impl Into<String>,
        openai: OpenAiClient,
        prompt: PromptSource,
        requester: MovieRequester,
    ) -> Self {
        Self {
            plex,
            section_key: section_key.into(),
            openai,
            prompt,
            requester,
        }
    }

    /// Runs fetch → recommend → request once.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Fetch`] or [`PipelineError::Recommend`];
    /// suggestion-level failures are reported in the summary instead.
    #[tracing::instrument(skip(self), fields(section_key = %self.section_key))]
    pub async fn run_once(&self) -> Result<RunSummary, PipelineError> {
        let items = self.plex.fetch_section(&self.section_key).await?;
        info!(count = items.len(), "Found movies in library");
        let titles = library_titles(&items);

        let prompt = self.prompt.load()?;
        let answer = self.openai.suggest_movies(&prompt, &titles).await?;
        let suggestions = split_suggestions(&answer);
        info!(count = suggestions.len(), ?suggestions, "Received suggestions");

        let mut summary = RunSummary {
            library_size: items.len(),
            results: Vec::with_capacity(suggestions.len()),
        };
        for suggestion in suggestions {
            let outcome = self.requester.request_movie(&suggestion).await;
            log_outcome(&suggestion, &outcome);
            summary.results.push(SuggestionResult {
                status: outcome.status(),
                suggestion,
            });
        }

        info!(
            added = summary.added(),
            already_present = summary.already_present(),
            not_found = summary.not_found(),
            failed = summary.failed(),
            total = summary.total(),
            "Run complete"
        );
        Ok(summary)
    }

    /// Runs, sleeps `interval`, and repeats. A failed iteration is logged
    /// and the next one still starts.
    ///
    /// With `max_iterations` the loop returns after that many runs without
    /// a trailing sleep; with `None` it never returns.
    pub async fn run_every(
        &self,
        interval: Duration,
        max_iterations: Option<u64>,
    ) -> IterationTally {
        let mut tally = IterationTally::default();
        let mut iteration: u64 = 0;
        loop {
            iteration += 1;
            match self.run_once().await {
                Ok(summary) => {
                    tally.succeeded += 1;
                    info!(
                        iteration,
                        added = summary.added(),
                        total = summary.total(),
                        "Iteration finished"
                    );
                }
                Err(err) => {
                    tally.failed += 1;
                    error!(
                        iteration,
                        error = &err as &dyn std::error::Error,
                        "Iteration failed"
                    );
                }
            }
            if max_iterations.is_some_and(|max| iteration >= max) {
                return tally;
            }
            info!(interval_secs = interval.as_secs(), "Sleeping until next run");
            tokio::time::sleep(interval).await;
        }
    }
}

fn log_outcome(suggestion: &str, outcome: &AcquireOutcome) {
    match outcome {
        AcquireOutcome::Added(movie) => info!(
            suggestion,
            title = %movie.title,
            year = movie.year,
            tmdb_id = movie.tmdb_id,
            "Requested movie in Radarr"
        ),
        AcquireOutcome::AlreadyPresent(movie) => info!(
            suggestion,
            title = %movie.title,
            tmdb_id = movie.tmdb_id,
            "Movie already in Radarr library"
        ),
        AcquireOutcome::NotFound => warn!(suggestion, "No Radarr lookup results"),
        AcquireOutcome::Failed(error) => warn!(
            suggestion,
            error = error as &dyn std::error::Error,
            "Failed to request movie"
        ),
    }
}
