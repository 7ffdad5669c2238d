//! Error types for the recommendation client.

use thiserror::Error;

/// Errors that abort a run while asking for recommendations.
#[derive(Debug, Error)]
pub enum RecommendError {
    /// No API key was supplied.
    #[error(
        "missing OpenAI API key\n  \
         Suggestion: Set OPENAI_API_KEY in the environment or .env file"
    )]
    MissingApiKey,

    /// The system instruction could not be read.
    #[error("failed to read prompt file '{path}'")]
    Prompt {
        /// Prompt file path.
        path: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Transport failure talking to the completion endpoint.
    #[error("network error calling chat completions")]
    Network {
        /// Underlying transport error.
        #[source]
        source: reqwest::Error,
    },

    /// The completion endpoint answered with a status other than 200.
    #[error("chat completions returned HTTP {status}, body: {body}")]
    HttpStatus {
        /// HTTP status code.
        status: u16,
        /// Response body snippet.
        body: String,
    },

    /// The response body was not a chat-completion document.
    #[error("failed to parse chat completion response")]
    Parse {
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// The response contained no choices.
    #[error("no choices in chat completion response")]
    EmptyResponse,

    /// The client could not be constructed.
    #[error(transparent)]
    Client(#[from] crate::http_client::ClientBuildError),
}
