//! Completion client error types.

use thiserror::Error;

/// Result type for completion operations.
pub type CompletionResult<T> = Result<T, CompletionError>;

/// Errors that can occur while calling the completion service.
///
/// Every upstream failure collapses into this one kind; callers only see
/// that generation failed and why.
#[derive(Debug, Error)]
pub enum CompletionError {
    /// HTTP request failed.
    #[error("completion request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// The service returned an error response. The upstream message is kept
    /// verbatim.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// Failed to parse the response body.
    #[error("failed to parse completion response: {0}")]
    ParseError(String),

    /// The response contained no generated text.
    #[error("completion response contained no candidates")]
    EmptyResponse,
}
