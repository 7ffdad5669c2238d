//! Radarr API v3 client.

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::RadarrSettings;
use crate::http_client::{AuthHeader, build_service_client, error_body};

use super::models::{AddMovieRequest, CatalogEntry, QualityProfile, RootFolder};
use super::AcquireError;

/// Client for the Radarr endpoints this tool uses. Every request carries `X-Api-Key`.
pub struct RadarrClient {
    client: Client,
    base_url: String,
}

impl RadarrClient {
    /// Creates a client from resolved settings.
    ///
    /// # Errors
    ///
    /// Returns [`AcquireError::Client`] if HTTP client construction fails.
    pub fn new(settings: &RadarrSettings) -> Result<Self, AcquireError> {
        Self::with_base_url(settings.base_url.clone(), &settings.api_key)
    }

    /// Creates a client against an explicit base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`AcquireError::Client`] if HTTP client construction fails.
    pub fn with_base_url(base_url: impl Into<String>, api_key: &str) -> Result<Self, AcquireError> {
        let client = build_service_client("radarr", Some(AuthHeader::api_key(api_key)))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Searches Radarr's metadata source for `query`.
    ///
    /// # Errors
    ///
    /// Returns [`AcquireError`] on transport, status or decode failure.
    #[tracing::instrument(skip(self), fields(service = "radarr"))]
    pub async fn search_movies(&self, query: &str) -> Result<Vec<CatalogEntry>, AcquireError> {
        let path = format!("/api/v3/movie/lookup?term={}", urlencoding::encode(query));
        self.get_json("movie lookup", &path).await
    }

    /// Lists every movie already in Radarr.
    ///
    /// # Errors
    ///
    /// Returns [`AcquireError`] on transport, status or decode failure.
    pub async fn list_movies(&self) -> Result<Vec<CatalogEntry>, AcquireError> {
        self.get_json("movie list", "/api/v3/movie").await
    }

    /// Lists configured quality profiles.
    ///
    /// # Errors
    ///
    /// Returns [`AcquireError`] on transport, status or decode failure.
    pub async fn quality_profiles(&self) -> Result<Vec<QualityProfile>, AcquireError> {
        self.get_json("quality profile list", "/api/v3/qualityprofile")
            .await
    }

    /// Lists configured root folders.
    ///
    /// # Errors
    ///
    /// Returns [`AcquireError`] on transport, status or decode failure.
    pub async fn root_folders(&self) -> Result<Vec<RootFolder>, AcquireError> {
        self.get_json("root folder list", "/api/v3/rootfolder").await
    }

    /// Finds the id of the quality profile named `name`, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns [`AcquireError::ProfileNotFound`] when nothing matches, or
    /// the listing error when profiles cannot be fetched.
    pub async fn quality_profile_id_by_name(&self, name: &str) -> Result<i64, AcquireError> {
        let profiles = self.quality_profiles().await?;
        find_profile_id(&profiles, name).ok_or_else(|| AcquireError::ProfileNotFound {
            name: name.to_string(),
        })
    }

    /// Adds a movie. Radarr answers 201 Created on success.
    ///
    /// # Errors
    ///
    /// Returns [`AcquireError::HttpStatus`] with the response body for any
    /// other status, or [`AcquireError::Network`] on transport failure.
    #[tracing::instrument(skip_all, fields(service = "radarr", tmdb_id = request.tmdb_id))]
    pub async fn add_movie(&self, request: &AddMovieRequest) -> Result<(), AcquireError> {
        const OPERATION: &str = "add movie";
        let url = format!("{}/api/v3/movie", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| AcquireError::network(OPERATION, e))?;

        let status = response.status();
        if status != StatusCode::CREATED {
            let body = error_body(response).await;
            return Err(AcquireError::http_status(OPERATION, status.as_u16(), body));
        }
        Ok(())
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        path: &str,
    ) -> Result<T, AcquireError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(api_url = %url, operation, "Calling Radarr");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AcquireError::network(operation, e))?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = error_body(response).await;
            return Err(AcquireError::http_status(operation, status.as_u16(), body));
        }

        let body = response
            .text()
            .await
            .map_err(|e| AcquireError::network(operation, e))?;
        serde_json::from_str(&body).map_err(|source| AcquireError::Decode { operation, source })
    }
}

impl std::fmt::Debug for RadarrClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RadarrClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

/// Case-insensitive profile lookup; the first match wins.
pub(crate) fn find_profile_id(profiles: &[QualityProfile], name: &str) -> Option<i64> {
    let wanted = name.to_lowercase();
    profiles
        .iter()
        .find(|profile| profile.name.to_lowercase() == wanted)
        .map(|profile| profile.id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profiles() -> Vec<QualityProfile> {
        vec![
            QualityProfile { id: 1, name: "Any".to_string() },
            QualityProfile { id: 4, name: "HD-1080p".to_string() },
            QualityProfile { id: 5, name: "Ultra-HD".to_string() },
        ]
    }

    #[test]
    fn test_find_profile_id_exact() {
        assert_eq!(find_profile_id(&profiles(), "HD-1080p"), Some(4));
    }

    #[test]
    fn test_find_profile_id_case_insensitive() {
        assert_eq!(find_profile_id(&profiles(), "hd-1080p"), Some(4));
        assert_eq!(find_profile_id(&profiles(), "ULTRA-HD"), Some(5));
    }

    #[test]
    fn test_find_profile_id_no_match() {
        assert_eq!(find_profile_id(&profiles(), "HD-720p"), None);
        assert_eq!(find_profile_id(&[], "Any"), None);
    }
}
