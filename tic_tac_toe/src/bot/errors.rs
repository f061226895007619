//! Bot error types.

use thiserror::Error;

/// Bot errors
#[derive(Debug, Error)]
pub enum BotError {
    /// Asked for a move on a board with no empty cells. The orchestrator
    /// never calls the bot on a full board, so reaching this is a
    /// programming error, not a user-facing condition.
    #[error("no valid bot moves available")]
    NoValidMoves,
}

/// Result type for bot operations
pub type BotResult<T> = Result<T, BotError>;
