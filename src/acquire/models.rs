//! Radarr API v3 payloads.

use serde::{Deserialize, Serialize};

/// A movie as returned by the lookup and listing endpoints.
///
/// Every field is defaulted so partial lookup results still decode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CatalogEntry {
    /// Display title.
    pub title: String,
    /// Release year.
    pub year: i32,
    /// External (TMDB) identifier, the only key used for duplicate detection.
    pub tmdb_id: i64,
    /// URL slug Radarr uses for the movie.
    pub title_slug: String,
    /// Whether Radarr monitors the movie.
    pub monitored: bool,
    /// Whether a file is already on disk.
    pub has_file: bool,
    /// Whether the movie is considered released.
    pub is_available: bool,
}

/// A named download-quality policy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct QualityProfile {
    /// Profile id sent in add requests.
    pub id: i64,
    /// Display name.
    pub name: String,
}

/// A storage location configured in Radarr.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RootFolder {
    /// Folder id.
    pub id: i64,
    /// Filesystem path.
    pub path: String,
    /// Whether Radarr can currently reach the path.
    pub accessible: bool,
    /// Free space in bytes, when reported.
    pub free_space: Option<i64>,
}

/// Options applied when a movie is added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddOptions {
    /// Start searching for a release immediately.
    pub search_for_movie: bool,
}

/// Body for `POST /api/v3/movie`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddMovieRequest {
    pub title: String,
    pub title_slug: String,
    pub tmdb_id: i64,
    pub year: i32,
    pub monitored: bool,
    pub quality_profile_id: i64,
    pub root_folder_path: String,
    pub add_options: AddOptions,
}

impl AddMovieRequest {
    /// Builds a monitored, search-on-add request for `entry`.
    #[must_use]
    pub fn for_entry(
        entry: &CatalogEntry,
        quality_profile_id: i64,
        root_folder_path: &str,
    ) -> Self {
        Self {
            title: entry.title.clone(),
            title_slug: entry.title_slug.clone(),
            tmdb_id: entry.tmdb_id,
            year: entry.year,
            monitored: true,
            quality_profile_id,
            root_folder_path: root_folder_path.to_string(),
            add_options: AddOptions {
                search_for_movie: true,
            },
        }
    }
}
