//! Shared HTTP client construction for the three downstream services.
//!
//! Every service gets exactly one reusable [`Client`] built here, so the
//! user agent and credential headers stay consistent. No request timeout
//! is configured: calls run under the transport defaults.

use std::panic::{AssertUnwindSafe, catch_unwind};

use reqwest::Client;
use reqwest::Response;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use thiserror::Error;

use crate::user_agent;

/// Upper bound on response-body characters carried inside error values.
pub const MAX_BODY_SNIPPET_CHARS: usize = 512;

/// Errors raised while constructing a service client.
#[derive(Debug, Error)]
pub enum ClientBuildError {
    /// A credential could not be encoded as an HTTP header value.
    #[error(
        "invalid value for {header} header of {service} client\n  \
         Suggestion: Check the configured key for stray control characters"
    )]
    InvalidHeader {
        /// Service the client was being built for.
        service: &'static str,
        /// Header name that failed to encode.
        header: String,
    },

    /// reqwest rejected the builder configuration.
    #[error("HTTP client construction failed for {service}")]
    Build {
        /// Service the client was being built for.
        service: &'static str,
        /// Underlying builder error.
        #[source]
        source: reqwest::Error,
    },

    /// Client construction panicked (seen in sandboxes that block system proxy lookup).
    #[error("HTTP client construction panicked while initializing {service} networking")]
    Panic {
        /// Service the client was being built for.
        service: &'static str,
    },
}

/// Credential header attached to every request a client sends.
#[derive(Debug, Clone)]
pub struct AuthHeader {
    name: HeaderName,
    value: String,
}

impl AuthHeader {
    /// `Authorization: Bearer {token}`.
    #[must_use]
    pub fn bearer(token: &str) -> Self {
        Self {
            name: reqwest::header::AUTHORIZATION,
            value: format!("Bearer {token}"),
        }
    }

    /// `X-Api-Key: {key}` as used by the *arr family of services.
    #[must_use]
    pub fn api_key(key: &str) -> Self {
        Self {
            name: HeaderName::from_static("x-api-key"),
            value: key.to_string(),
        }
    }
}

/// Builds the client for `service`, optionally attaching a credential header.
///
/// # Errors
///
/// Returns [`ClientBuildError`] when the header value is not encodable or
/// reqwest fails to build the client.
pub fn build_service_client(
    service: &'static str,
    auth: Option<AuthHeader>,
) -> Result<Client, ClientBuildError> {
    let mut headers = HeaderMap::new();
    if let Some(auth) = auth {
        let mut value =
            HeaderValue::from_str(&auth.value).map_err(|_| ClientBuildError::InvalidHeader {
                service,
                header: auth.name.to_string(),
            })?;
        value.set_sensitive(true);
        headers.insert(auth.name, value);
    }

    let user_agent = user_agent::default_user_agent();
    catch_unwind(AssertUnwindSafe(move || {
        Client::builder()
            .user_agent(user_agent)
            .default_headers(headers)
            .gzip(true)
            .build()
    }))
    .map_err(|_| ClientBuildError::Panic { service })?
    .map_err(|source| ClientBuildError::Build { service, source })
}

/// Truncates a response body to [`MAX_BODY_SNIPPET_CHARS`] characters.
#[must_use]
pub fn body_snippet(body: &str) -> String {
    match body.char_indices().nth(MAX_BODY_SNIPPET_CHARS) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}

/// Reads an error response body for diagnostics; unreadable bodies become empty.
pub(crate) async fn error_body(response: Response) -> String {
    response
        .text()
        .await
        .map(|body| body_snippet(&body))
        .unwrap_or_default()
}
