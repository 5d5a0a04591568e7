//! Application state shared across handlers.

use std::sync::Arc;

use crate::chat::ChatService;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Conversation orchestration service.
    pub chat: Arc<ChatService>,
    /// Origins allowed by the CORS layer (empty means allow any).
    pub allowed_origins: Vec<String>,
}

impl AppState {
    /// Create new application state.
    pub fn new(chat: ChatService, allowed_origins: Vec<String>) -> Self {
        Self {
            chat: Arc::new(chat),
            allowed_origins,
        }
    }
}
