//! Repository for conversation log database operations.

use chrono::Utc;
use sqlx::SqlitePool;

use super::error::{ChatError, ChatResult};
use super::models::{MessageRole, Turn};

/// Append-only store for conversation turns.
///
/// Turns are never updated; the only destructive operation is a full clear.
#[derive(Debug, Clone)]
pub struct TurnRepository {
    pool: SqlitePool,
}

impl TurnRepository {
    /// Create a new repository instance.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Append a turn to the log.
    ///
    /// The message must be non-empty after trimming. The insert is committed
    /// before this returns, so a crash immediately afterwards never loses
    /// the turn.
    pub async fn append(&self, role: MessageRole, message: &str) -> ChatResult<Turn> {
        let message = message.trim();
        if message.is_empty() {
            return Err(ChatError::EmptyMessage);
        }

        let timestamp = Utc::now().to_rfc3339();
        let role = role.to_string();

        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO turns (role, message, timestamp)
            VALUES (?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(&role)
        .bind(message)
        .bind(&timestamp)
        .fetch_one(&self.pool)
        .await?;

        self.get_by_id(id).await
    }

    /// Get a turn by ID.
    pub async fn get_by_id(&self, id: i64) -> ChatResult<Turn> {
        let turn = sqlx::query_as::<_, Turn>(
            "SELECT id, role, message, timestamp FROM turns WHERE id = ?",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(turn)
    }

    /// Get all turns in append order.
    pub async fn read_all(&self) -> ChatResult<Vec<Turn>> {
        let turns = sqlx::query_as::<_, Turn>(
            r#"
            SELECT id, role, message, timestamp
            FROM turns
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(turns)
    }

    /// Delete all turns. Returns the number of rows removed.
    pub async fn clear(&self) -> ChatResult<u64> {
        let result = sqlx::query("DELETE FROM turns").execute(&self.pool).await?;
        Ok(result.rows_affected())
    }
}
