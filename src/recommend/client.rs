//! Chat-completion client.

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::OpenAiSettings;
use crate::http_client::{AuthHeader, build_service_client, error_body};

use super::RecommendError;

/// A single chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    /// `system`, `user` or `assistant`.
    pub role: String,
    /// Message text.
    pub content: String,
}

impl ChatMessage {
    /// A `system` role message.
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    /// A `user` role message.
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Request body for `POST /chat/completions`.
#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    /// Model identifier.
    pub model: String,
    /// Conversation, system message first.
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct Usage {
    #[serde(default)]
    prompt_tokens: u64,
    #[serde(default)]
    completion_tokens: u64,
    #[serde(default)]
    total_tokens: u64,
}

/// Client for an OpenAI-compatible chat-completion API.
///
/// One blocking round trip per call: no retries, no streaming.
pub struct OpenAiClient {
    client: Client,
    base_url: String,
    model: String,
}

impl OpenAiClient {
    /// Creates a client from resolved settings.
    ///
    /// # Errors
    ///
    /// Returns [`RecommendError::MissingApiKey`] for an empty key, or
    /// [`RecommendError::Client`] if HTTP client construction fails.
    pub fn new(settings: &OpenAiSettings) -> Result<Self, RecommendError> {
        Self::with_base_url(&settings.api_key, &settings.model, &settings.base_url)
    }

    /// Creates a client against an explicit base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Same as [`OpenAiClient::new`].
    pub fn with_base_url(
        api_key: &str,
        model: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, RecommendError> {
        if api_key.trim().is_empty() {
            return Err(RecommendError::MissingApiKey);
        }
        let client = build_service_client("openai", Some(AuthHeader::bearer(api_key)))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
        })
    }

    /// Asks the model for movies that fit `library_titles`.
    ///
    /// Returns the first choice's content verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`RecommendError`] on transport failure, a non-200 status,
    /// malformed JSON, or a response without choices.
    #[tracing::instrument(
        skip_all,
        fields(service = "openai", model = %self.model, library_len = library_titles.len())
    )]
    pub async fn suggest_movies(
        &self,
        system_prompt: &str,
        library_titles: &[String],
    ) -> Result<String, RecommendError> {
        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage::system(system_prompt),
                ChatMessage::user(library_titles.join(",")),
            ],
        };
        self.complete(&request).await
    }

    /// Sends one chat-completion request and returns the first choice's content.
    ///
    /// # Errors
    ///
    /// See [`OpenAiClient::suggest_movies`].
    pub async fn complete(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<String, RecommendError> {
        let url = format!("{}/chat/completions", self.base_url);
        debug!(api_url = %url, "Calling chat completions");

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|source| RecommendError::Network { source })?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = error_body(response).await;
            warn!(status = status.as_u16(), "Chat completions request failed");
            return Err(RecommendError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|source| RecommendError::Network { source })?;
        let parsed: ChatCompletionResponse =
            serde_json::from_str(&body).map_err(|source| RecommendError::Parse { source })?;

        if let Some(usage) = &parsed.usage {
            debug!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                total_tokens = usage.total_tokens,
                "Chat completion token usage"
            );
        }

        let first = parsed
            .choices
            .into_iter()
            .next()
            .ok_or(RecommendError::EmptyResponse)?;
        Ok(first.message.content.unwrap_or_default())
    }
}

impl std::fmt::Debug for OpenAiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiClient")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}
