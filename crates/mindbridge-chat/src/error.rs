//! Error types for the chat assistant.
//!
//! None of these reach the presentation layer. They describe why a scheduled
//! reply was dropped and are only logged.

/// Errors from delivering an assistant turn.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("session closed: {0}")]
    SessionClosed(uuid::Uuid),
    #[error("no pending turn in session {0}")]
    NoPendingTurn(uuid::Uuid),
}
