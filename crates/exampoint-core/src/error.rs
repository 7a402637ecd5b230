//! Error types for session actions and study generation.

use thiserror::Error;

/// Rejected session actions. State is left untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("{0} is required")]
    MissingField(&'static str),
}

/// Failures of the keyword-matched (mock) study workflows.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MockError {
    #[error("Please enter {0}")]
    EmptyInput(&'static str),

    #[error("Failed to read file: {0}")]
    Unreadable(String),
}

/// Failures of chat-completion backed generation. Each one is terminal for the request.
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("{0}")]
    MissingInput(&'static str),

    #[error("Difficulty must be easy, medium, or hard")]
    InvalidDifficulty(String),

    #[error("chat completion endpoint is not configured")]
    NotConfigured,

    #[error("Failed to generate {what}: {detail}")]
    Upstream { what: &'static str, detail: String },

    #[error("No response data received")]
    NoData,

    #[error("No content in AI response")]
    NoContent,

    #[error("Failed to parse AI response as {0}")]
    Parse(&'static str),
}

impl GenerationError {
    /// True for errors caused by the caller's input rather than the upstream service.
    pub fn is_input_error(&self) -> bool {
        matches!(self, GenerationError::MissingInput(_) | GenerationError::InvalidDifficulty(_))
    }
}

/// Result type alias for chat-completion generation.
pub type GenerationResult<T> = Result<T, GenerationError>;
