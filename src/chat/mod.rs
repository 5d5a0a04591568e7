//! Conversation log and orchestration module.
//!
//! The store is an append-only, strictly ordered log of role-tagged turns
//! persisted in SQLite. There is a single global conversation shared by all
//! callers; no per-client isolation exists.

mod error;
mod history;
mod models;
mod repository;
mod service;

pub use error::{ChatError, ChatResult};
pub use history::assemble;
pub use models::{MessageRole, Turn};
pub use repository::TurnRepository;
pub use service::ChatService;
