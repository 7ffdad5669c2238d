//! Movie acquisition through Radarr.
//!
//! [`MovieRequester`] drives one suggestion through
//! search → first match → duplicate check → quality profile → add.
//! Every failure stays local to that suggestion and is reported as an
//! [`AcquireOutcome`]; nothing here aborts a run.

mod client;
mod error;
mod models;

pub use client::RadarrClient;
pub use error::AcquireError;
pub use models::{AddMovieRequest, AddOptions, CatalogEntry, QualityProfile, RootFolder};

use std::fmt;

use tracing::{info, warn};

use crate::config::RadarrSettings;

/// Quality profile id used when no override is configured or the override cannot be resolved.
pub const DEFAULT_QUALITY_PROFILE_ID: i64 = 1;

/// Terminal state of one suggestion.
#[derive(Debug)]
pub enum AcquireOutcome {
    /// The movie was submitted and Radarr answered 201.
    Added(CatalogEntry),
    /// Radarr already has a movie with the candidate's TMDB id.
    AlreadyPresent(CatalogEntry),
    /// The lookup returned no results.
    NotFound,
    /// A call failed; the suggestion was skipped.
    Failed(AcquireError),
}

/// Outcome without payload, for counting and reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AcquireStatus {
    Added,
    AlreadyPresent,
    NotFound,
    Failed,
}

impl AcquireOutcome {
    /// Payload-free status.
    #[must_use]
    pub fn status(&self) -> AcquireStatus {
        match self {
            Self::Added(_) => AcquireStatus::Added,
            Self::AlreadyPresent(_) => AcquireStatus::AlreadyPresent,
            Self::NotFound => AcquireStatus::NotFound,
            Self::Failed(_) => AcquireStatus::Failed,
        }
    }
}

impl AcquireStatus {
    /// Stable label for log output.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Added => "added",
            Self::AlreadyPresent => "already_present",
            Self::NotFound => "not_found",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for AcquireStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Requests suggested movies from Radarr.
#[derive(Debug)]
pub struct MovieRequester {
    radarr: RadarrClient,
    quality_profile: Option<String>,
    root_folder: String,
}

impl MovieRequester {
    /// Creates a requester from resolved settings.
    ///
    /// # Errors
    ///
    /// Returns [`AcquireError::Client`] if HTTP client construction fails.
    pub fn new(settings: &RadarrSettings) -> Result<Self, AcquireError> {
        Ok(Self::with_client(
            RadarrClient::new(settings)?,
            settings.quality_profile.clone(),
            settings.root_folder.clone(),
        ))
    }

    /// Creates a requester around an existing client.
    #[must_use]
    pub fn with_client(
        radarr: RadarrClient,
        quality_profile: Option<String>,
        root_folder: impl Into<String>,
    ) -> Self {
        Self {
            radarr,
            quality_profile,
            root_folder: root_folder.into(),
        }
    }

    /// Drives `title` to a terminal [`AcquireOutcome`].
    #[tracing::instrument(skip(self), fields(service = "radarr"))]
    pub async fn request_movie(&self, title: &str) -> AcquireOutcome {
        let results = match self.radarr.search_movies(title).await {
            Ok(results) => results,
            Err(error) => return AcquireOutcome::Failed(error),
        };

        // First lookup result is the candidate; no scoring.
        let Some(candidate) = results.into_iter().next() else {
            info!("No movies found in Radarr lookup");
            return AcquireOutcome::NotFound;
        };
        info!(
            found = %candidate.title,
            year = candidate.year,
            tmdb_id = candidate.tmdb_id,
            "Found movie"
        );

        let existing = match self.radarr.list_movies().await {
            Ok(existing) => existing,
            Err(error) => return AcquireOutcome::Failed(error),
        };
        if existing.iter().any(|movie| movie.tmdb_id == candidate.tmdb_id) {
            return AcquireOutcome::AlreadyPresent(candidate);
        }

        let quality_profile_id = self.resolve_quality_profile_id().await;
        let request = AddMovieRequest::for_entry(&candidate, quality_profile_id, &self.root_folder);
        match self.radarr.add_movie(&request).await {
            Ok(()) => AcquireOutcome::Added(candidate),
            Err(error) => AcquireOutcome::Failed(error),
        }
    }

    /// Resolves the configured profile name, falling back to
    /// [`DEFAULT_QUALITY_PROFILE_ID`] on any failure.
    pub async fn resolve_quality_profile_id(&self) -> i64 {
        let Some(name) = self.quality_profile.as_deref() else {
            return DEFAULT_QUALITY_PROFILE_ID;
        };
        match self.radarr.quality_profile_id_by_name(name).await {
            Ok(id) => id,
            Err(error) => {
                warn!(
                    error = &error as &dyn std::error::Error,
                    profile = name,
                    fallback_id = DEFAULT_QUALITY_PROFILE_ID,
                    "Falling back to default quality profile"
                );
                DEFAULT_QUALITY_PROFILE_ID
            }
        }
    }
}
