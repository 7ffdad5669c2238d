//! Plex library listing.
//!
//! [`PlexClient`] lists every item of one library section and turns the
//! XML answer into [`LibraryItem`]s. Parsing is lenient: missing `title`
//! or `year` attributes become empty strings, and items keep document
//! order, duplicates included.

mod client;
mod error;

pub use client::PlexClient;
pub use error::FetchError;

use std::fmt;

use serde::Deserialize;

/// A single movie from the media server listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryItem {
    /// Title attribute as returned by Plex.
    pub title: String,
    /// Year attribute as returned by Plex; may be empty.
    pub year: String,
}

impl fmt::Display for LibraryItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.title, self.year)
    }
}

/// Root `<MediaContainer>` element.
#[derive(Debug, Deserialize)]
struct MediaContainer {
    #[serde(rename = "Video", default)]
    videos: Vec<VideoNode>,
}

/// One `<Video>` child; other attributes and children are ignored.
#[derive(Debug, Deserialize)]
struct VideoNode {
    #[serde(rename = "@title", default)]
    title: String,
    #[serde(rename = "@year", default)]
    year: String,
}

/// Parses a Plex section listing into library items.
///
/// # Errors
///
/// Returns [`FetchError::Parse`] when the body is not a well-formed container document.
pub fn parse_media_container(xml: &str) -> Result<Vec<LibraryItem>, FetchError> {
    let container: MediaContainer =
        quick_xml::de::from_str(xml).map_err(|source| FetchError::Parse { source })?;
    Ok(container
        .videos
        .into_iter()
        .map(|video| LibraryItem {
            title: video.title,
            year: video.year,
        })
        .collect())
}

/// Renders items as `"Title (Year)"` strings, preserving order.
#[must_use]
pub fn library_titles(items: &[LibraryItem]) -> Vec<String> {
    items.iter().map(ToString::to_string).collect()
}
