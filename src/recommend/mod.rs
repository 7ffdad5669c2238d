//! Movie recommendations from a chat-completion model.
//!
//! The model receives a fixed system instruction plus the library titles
//! joined by commas, and answers with a comma-separated list of titles.
//! [`split_suggestions`] turns that answer into individual suggestions.

mod client;
mod error;

pub use client::{ChatCompletionRequest, ChatMessage, OpenAiClient};
pub use error::RecommendError;

use std::fs;
use std::path::PathBuf;

/// System instruction compiled into the binary.
pub const EMBEDDED_PROMPT: &str = include_str!("../../prompts/movie_recommendations.txt");

/// Where the system instruction is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptSource {
    /// The compiled-in instruction.
    Embedded,
    /// An operator-provided file, read on every run.
    File(PathBuf),
}

impl PromptSource {
    /// Returns the instruction text.
    ///
    /// # Errors
    ///
    /// Returns [`RecommendError::Prompt`] when a prompt file cannot be read.
    pub fn load(&self) -> Result<String, RecommendError> {
        match self {
            Self::Embedded => Ok(EMBEDDED_PROMPT.to_string()),
            Self::File(path) => fs::read_to_string(path).map_err(|source| RecommendError::Prompt {
                path: path.display().to_string(),
                source,
            }),
        }
    }
}

/// Splits a model answer on commas.
///
/// Segments are returned exactly as written: surrounding whitespace is not
/// trimmed and empty segments are kept.
#[must_use]
pub fn split_suggestions(response: &str) -> Vec<String> {
    response.split(',').map(str::to_string).collect()
}
