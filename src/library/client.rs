//! HTTP client for the Plex section listing endpoint.

use reqwest::Client;
use tracing::{debug, warn};

use crate::config::PlexSettings;
use crate::http_client::{build_service_client, error_body};

use super::{FetchError, LibraryItem, parse_media_container};

/// Lists library sections on a Plex media server.
///
/// The token travels as the `X-Plex-Token` query parameter; no auth header
/// is attached.
pub struct PlexClient {
    client: Client,
    base_url: String,
    token: String,
}

impl PlexClient {
    /// Creates a client for the server described by `settings`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Client`] if HTTP client construction fails.
    pub fn new(settings: &PlexSettings) -> Result<Self, FetchError> {
        Self::with_base_url(settings.base_url(), settings.token.clone())
    }

    /// Creates a client against an explicit base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Client`] if HTTP client construction fails.
    pub fn with_base_url(
        base_url: impl Into<String>,
        token: impl Into<String>,
    ) -> Result<Self, FetchError> {
        let client = build_service_client("plex", None)?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        })
    }

    /// Fetches every item in `section_key`, in server order.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] on transport failure, a non-success status,
    /// or an unparseable body.
    #[tracing::instrument(skip(self), fields(service = "plex"))]
    pub async fn fetch_section(&self, section_key: &str) -> Result<Vec<LibraryItem>, FetchError> {
        let url = format!(
            "{}/library/sections/{}/all?X-Plex-Token={}",
            self.base_url,
            urlencoding::encode(section_key),
            urlencoding::encode(&self.token)
        );
        debug!(base_url = %self.base_url, "Listing Plex library section");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::network(section_key, e.without_url()))?;

        let status = response.status();
        if !status.is_success() {
            let body = error_body(response).await;
            warn!(status = status.as_u16(), "Plex section listing failed");
            return Err(FetchError::http_status(section_key, status.as_u16(), body));
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::network(section_key, e.without_url()))?;
        let items = parse_media_container(&body)?;
        debug!(count = items.len(), "Parsed Plex section listing");
        Ok(items)
    }
}

impl std::fmt::Debug for PlexClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlexClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}
