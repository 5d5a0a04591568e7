//! Conversation data models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;

/// Role of a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageRole {
    User,
    Assistant,
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Assistant => write!(f, "assistant"),
        }
    }
}

impl std::str::FromStr for MessageRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(Self::User),
            "assistant" => Ok(Self::Assistant),
            _ => Err(format!("Unknown message role: {}", s)),
        }
    }
}

/// A turn stored in the conversation log. Immutable once appended.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Turn {
    /// Auto-incrementing ID; defines the total order of the conversation
    pub id: i64,
    /// Turn role (user, assistant)
    pub role: String,
    /// Message text
    pub message: String,
    /// RFC 3339 timestamp assigned at append time
    pub timestamp: String,
}
