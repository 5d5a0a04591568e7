//! Conversation orchestration service.

use std::sync::Arc;

use tracing::info;

use crate::gemini::CompletionApi;

use super::error::{ChatError, ChatResult};
use super::history::assemble;
use super::models::{MessageRole, Turn};
use super::repository::TurnRepository;

/// Service coordinating the conversation log and the completion client.
///
/// Stateless across requests beyond the shared store; every request runs
/// validate -> persist user turn -> assemble -> generate -> persist reply.
pub struct ChatService {
    store: TurnRepository,
    completion: Arc<dyn CompletionApi>,
}

impl ChatService {
    /// Create a new service instance.
    pub fn new(store: TurnRepository, completion: Arc<dyn CompletionApi>) -> Self {
        Self { store, completion }
    }

    /// Handle one inbound chat message and return the generated reply.
    ///
    /// The user turn is persisted before the completion call and is not
    /// rolled back if that call fails: an unanswered user turn stays in
    /// history.
    pub async fn send_message(&self, text: &str) -> ChatResult<String> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ChatError::EmptyMessage);
        }

        self.store.append(MessageRole::User, text).await?;

        let turns = self.store.read_all().await?;
        let context = assemble(&turns);

        let reply = self.completion.generate(&context).await?;

        self.store.append(MessageRole::Assistant, &reply).await?;

        Ok(reply)
    }

    /// Get the full conversation history in append order.
    pub async fn history(&self) -> ChatResult<Vec<Turn>> {
        self.store.read_all().await
    }

    /// Clear the conversation log. Returns the number of turns removed.
    pub async fn clear(&self) -> ChatResult<u64> {
        let removed = self.store.clear().await?;
        info!("Cleared conversation history ({} turns)", removed);
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use crate::gemini::{CompletionError, CompletionResult, PromptTurn};
    use async_trait::async_trait;
    use tokio::sync::Mutex;

    /// Stub completion client recording the context it was called with.
    struct StubCompletion {
        reply: Result<String, String>,
        calls: Mutex<Vec<Vec<PromptTurn>>>,
    }

    impl StubCompletion {
        fn replying(reply: &str) -> Self {
            Self {
                reply: Ok(reply.to_string()),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                reply: Err(message.to_string()),
                calls: Mutex::new(Vec::new()),
            }
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

    async fn setup(completion: Arc<StubCompletion>) -> ChatService {
        let db = Database::in_memory().await.unwrap();
        let store = TurnRepository::new(db.pool().clone());
        ChatService::new(store, completion)
    }

    #[tokio::test]
    async fn test_send_message_happy_path() {
        let stub = Arc::new(StubCompletion::replying("Hi there"));
        let service = setup(stub.clone()).await;

        let reply = service.send_message("Hello").await.unwrap();
        assert_eq!(reply, "Hi there");

        // The completion client saw the just-appended user turn
        let calls = stub.calls.lock().await;
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].len(), 1);
        assert_eq!(calls[0][0].role, "user");
        assert_eq!(calls[0][0].content, "Hello");
        drop(calls);

        let history = service.history().await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].role, "user");
        assert_eq!(history[0].message, "Hello");
        assert_eq!(history[1].role, "assistant");
        assert_eq!(history[1].message, "Hi there");
    }

    #[tokio::test]
    async fn test_send_message_rejects_empty() {
        let stub = Arc::new(StubCompletion::replying("unused"));
        let service = setup(stub.clone()).await;

        assert!(matches!(
            service.send_message("   ").await,
            Err(ChatError::EmptyMessage)
        ));

        // Nothing was persisted and the completion client was never called
        assert!(service.history().await.unwrap().is_empty());
        assert!(stub.calls.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_completion_failure_leaves_orphaned_user_turn() {
        let stub = Arc::new(StubCompletion::failing("quota exceeded"));
        let service = setup(stub).await;

        let err = service.send_message("Hello").await.unwrap_err();
        assert!(matches!(err, ChatError::Completion(_)));
        assert_eq!(err.to_string(), "quota exceeded");

        // The user turn is not rolled back
        let history = service.history().await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].role, "user");
        assert_eq!(history[0].message, "Hello");
    }

    #[tokio::test]
    async fn test_context_includes_prior_turns() {
        let stub = Arc::new(StubCompletion::replying("ok"));
        let service = setup(stub.clone()).await;

        service.send_message("first").await.unwrap();
        service.send_message("second").await.unwrap();

        let calls = stub.calls.lock().await;
        assert_eq!(calls.len(), 2);
        // Second call saw user, assistant, user in order
        let roles: Vec<&str> = calls[1].iter().map(|t| t.role.as_str()).collect();
        assert_eq!(roles, vec!["user", "assistant", "user"]);
    }

    #[tokio::test]
    async fn test_clear_empties_history() {
        let stub = Arc::new(StubCompletion::replying("ok"));
        let service = setup(stub).await;

        service.send_message("one").await.unwrap();
        service.send_message("two").await.unwrap();
        assert_eq!(service.history().await.unwrap().len(), 4);

        let removed = service.clear().await.unwrap();
        assert_eq!(removed, 4);
        assert!(service.history().await.unwrap().is_empty());
    }
}
