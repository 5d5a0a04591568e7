//! Conversation error types.

use thiserror::Error;

use crate::gemini::CompletionError;

/// Result type for conversation operations.
pub type ChatResult<T> = Result<T, ChatError>;

/// Errors that can occur while handling a conversation request.
#[derive(Debug, Error)]
pub enum ChatError {
    /// Input message was empty after trimming.
    #[error("Message is required")]
    EmptyMessage,

    /// The persistence layer failed.
    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),

    /// The completion service call failed. The upstream message is passed
    /// through verbatim.
    #[error("{0}")]
    Completion(#[from] CompletionError),
}
