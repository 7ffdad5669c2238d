//! Error types for Radarr operations.

use thiserror::Error;

/// Errors from a single Radarr call. None of these abort a run.
#[derive(Debug, Error)]
pub enum AcquireError {
    /// Transport failure.
    #[error("network error during Radarr {operation}")]
    Network {
        /// Operation label, e.g. `movie lookup`.
        operation: &'static str,
        /// Underlying transport error.
        #[source]
        source: reqwest::Error,
    },

    /// Radarr answered with an unexpected status.
    #[error("Radarr {operation} returned HTTP {status}, body: {body}")]
    HttpStatus {
        /// Operation label.
        operation: &'static str,
        /// HTTP status code.
        status: u16,
        /// Response body snippet.
        body: String,
    },

    /// The response body did not match the expected JSON shape.
    #[error("failed to decode Radarr {operation} response")]
    Decode {
        /// Operation label.
        operation: &'static str,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// No quality profile matched the configured name.
    #[error("quality profile '{name}' not found")]
    ProfileNotFound {
        /// Name that was looked up.
        name: String,
    },

    /// The Radarr client could not be constructed.
    #[error(transparent)]
    Client(#[from] crate::http_client::ClientBuildError),
}

impl AcquireError {
    /// Creates a network error for `operation`.
    pub fn network(operation: &'static str, source: reqwest::Error) -> Self {
        Self::Network { operation, source }
    }

    /// Creates an unexpected-status error carrying a body snippet.
    pub fn http_status(operation: &'static str, status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            operation,
            status,
            body: body.into(),
        }
    }
}
