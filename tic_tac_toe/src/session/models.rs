//! Results returned by the game session orchestrator.

use crate::game::board::{Board, Position};
use crate::game::entities::{Game, GameStatus, MoveRecord, Player};

/// Outcome of creating a game, including the opening bot move when the bot
/// starts.
#[derive(Clone, Debug)]
pub struct CreatedGame {
    pub game: Game,
    pub board: Board,
    pub current_turn: Option<Player>,
    pub bot_move: Option<Position>,
}

/// Outcome of a human move and the bot's reply, if the game went on.
#[derive(Clone, Debug)]
pub struct MoveOutcome {
    pub board: Board,
    pub status: GameStatus,
    pub current_turn: Option<Player>,
    pub bot_move: Option<Position>,
}

/// A game with its replayed board.
#[derive(Clone, Debug)]
pub struct GameDetail {
    pub game: Game,
    pub board: Board,
    pub current_turn: Option<Player>,
}

/// A game as listed in the history: move count always, the final board only
/// once the game is settled.
#[derive(Clone, Debug)]
pub struct GameSummary {
    pub game: Game,
    pub move_count: i64,
    pub final_board: Option<Board>,
}

/// A stored move together with the player derived from its number.
#[derive(Clone, Debug)]
pub struct PlayedMove {
    pub record: MoveRecord,
    pub player: Player,
}
