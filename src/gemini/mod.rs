//! Gemini completion client module.
//!
//! Wraps the Generative Language `generateContent` endpoint behind a minimal
//! trait so the orchestrator can be tested with a stub.

mod client;
mod error;
mod types;

use async_trait::async_trait;

pub use client::{DEFAULT_BASE_URL, DEFAULT_MODEL, GeminiClient};
pub use error::{CompletionError, CompletionResult};
pub use types::*;

/// Minimal completion API abstraction for testability.
#[async_trait]
pub trait CompletionApi: Send + Sync {
    async fn generate(&self, turns: &[PromptTurn]) -> CompletionResult<String>;
}

#[async_trait]
impl CompletionApi for GeminiClient {
    async fn generate(&self, turns: &[PromptTurn]) -> CompletionResult<String> {
        self.generate(turns).await
    }
}
