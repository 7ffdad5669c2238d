//! Error types for library fetching.

use thiserror::Error;

/// Errors that abort a run while reading the Plex library.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport failure (DNS, connection refused, body read).
    #[error("network error fetching Plex section {section_key}")]
    Network {
        /// Section that was being listed.
        section_key: String,
        /// Underlying transport error.
        #[source]
        source: reqwest::Error,
    },

    /// Plex answered with a non-success status.
    #[error("Plex returned HTTP {status} for section {section_key}: {body}")]
    HttpStatus {
        /// Section that was being listed.
        section_key: String,
        /// HTTP status code.
        status: u16,
        /// Response body snippet.
        body: String,
    },

    /// The listing body was not the expected XML document.
    #[error("failed to parse Plex section listing")]
    Parse {
        /// Underlying XML deserialization error.
        #[source]
        source: quick_xml::DeError,
    },

    /// The Plex client could not be constructed.
    #[error(transparent)]
    Client(#[from] crate::http_client::ClientBuildError),
}

impl FetchError {
    /// Creates a network error for `section_key`.
    pub fn network(section_key: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Network {
            section_key: section_key.into(),
            source,
        }
    }

    /// Creates an HTTP status error carrying a body snippet.
    pub fn http_status(
        section_key: impl Into<String>,
        status: u16,
        body: impl Into<String>,
    ) -> Self {
        Self::HttpStatus {
            section_key: section_key.into(),
            status,
            body: body.into(),
        }
    }
}
