//! Test utilities and common setup.

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use tokio::sync::Mutex;

use chatterd::api::{self, AppState};
use chatterd::chat::{ChatService, TurnRepository};
use chatterd::db::Database;
use chatterd::gemini::{CompletionApi, CompletionError, CompletionResult, PromptTurn};

/// Completion stub returning a canned reply and recording every call.
pub struct StubCompletion {
    reply: Result<String, String>,
    pub calls: Mutex<Vec<Vec<PromptTurn>>>,
}

impl StubCompletion {
    /// Stub that replies with the given text.
    pub fn replying(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(reply.to_string()),
            calls: Mutex::new(Vec::new()),
        })
    }

    /// Stub that fails with the given upstream message.
    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Err(message.to_string()),
            calls: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl CompletionApi for StubCompletion {
    async fn generate(&self, turns: &[PromptTurn]) -> CompletionResult<String> {
        self.calls.lock().await.push(turns.to_vec());
        match &self.reply {
            Ok(reply) => Ok(reply.clone()),
            Err(message) => Err(CompletionError::Api {
                status: 503,
                message: message.clone(),
            }),
        }
    }
}

/// Create a test application backed by an in-memory store.
pub async fn test_app(completion: Arc<StubCompletion>) -> Router {
    let db = Database::in_memory().await.unwrap();
    let store = TurnRepository::new(db.pool().clone());
    let service = ChatService::new(store, completion);
    let state = AppState::new(service, Vec::new());
    api::create_router(state)
}
