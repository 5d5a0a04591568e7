//! Projection of stored turns into completion-service context.

use crate::gemini::PromptTurn;

use super::models::Turn;

/// Map stored turns to role/content pairs, preserving store order.
///
/// No filtering happens here: both user and assistant turns are included.
/// The full history is sent to the completion service on every call, so
/// context grows without bound as the conversation gets longer.
pub fn assemble(turns: &[Turn]) -> Vec<PromptTurn> {
    turns
        .iter()
        .map(|turn| PromptTurn {
            role: turn.role.clone(),
            content: turn.message.clone(),
        })
        .collect()
}
