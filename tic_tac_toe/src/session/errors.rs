//! Game session error types.

use thiserror::Error;

use crate::bot::BotError;
use crate::game::board::Position;

/// Game session errors
#[derive(Debug, Error)]
pub enum GameError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// No game with the requested id
    #[error("Game not found.")]
    GameNotFound,

    /// No in-progress game exists
    #[error("No in-progress game found.")]
    NoActiveGame,

    /// Move submitted against a finished game
    #[error("This game has already finished.")]
    GameFinished { valid_moves: Vec<Position> },

    /// Coordinates outside the board
    #[error("Coordinates must be in range 0-2 for both x and y.")]
    OutOfBounds { valid_moves: Vec<Position> },

    /// It is the bot's turn, not the human's
    #[error("Please wait for the bot to move.")]
    NotYourTurn { valid_moves: Vec<Position> },

    /// Target cell already carries a mark
    #[error("That cell is already taken. Try another move.")]
    CellOccupied { valid_moves: Vec<Position> },

    /// Bot failure; unreachable while the orchestrator keeps the board
    /// non-full before asking for a bot move
    #[error(transparent)]
    Bot(#[from] BotError),
}

impl GameError {
    /// Stable wire code for the error, as carried in the `error` field of
    /// HTTP error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            GameError::GameNotFound | GameError::NoActiveGame => "game_not_found",
            GameError::GameFinished { .. } => "game_finished",
            GameError::OutOfBounds { .. } => "out_of_bounds",
            GameError::NotYourTurn { .. } => "not_your_turn",
            GameError::CellOccupied { .. } => "cell_occupied",
            GameError::Database(_) | GameError::Bot(_) => "internal_error",
        }
    }

    /// Get a client-safe error message that doesn't leak internal details.
    ///
    /// Database and bot errors are sanitized; everything else is worded for
    /// the player already.
    pub fn client_message(&self) -> String {
        match self {
            GameError::Database(_) | GameError::Bot(_) => "Internal server error".to_string(),
            _ => self.to_string(),
        }
    }

    /// Remediation data: the currently playable cells, present on every
    /// rule-violation error.
    pub fn valid_moves(&self) -> Option<&[Position]> {
        match self {
            GameError::GameFinished { valid_moves }
            | GameError::OutOfBounds { valid_moves }
            | GameError::NotYourTurn { valid_moves }
            | GameError::CellOccupied { valid_moves } => Some(valid_moves),
            _ => None,
        }
    }
}

/// Result type for game session operations
pub type GameResult<T> = Result<T, GameError>;
