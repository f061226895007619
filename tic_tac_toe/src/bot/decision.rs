//! Bot move selection.

use rand::Rng;
use rand::seq::IndexedRandom;

use super::errors::{BotError, BotResult};
use crate::game::board::{self, Board, Position};
use crate::game::entities::{BotVariant, Player};

/// Probability that a newly created game gets the chaos bot.
const CHAOS_PROBABILITY: f64 = 0.1;

/// Pick the bot's move for the given board.
///
/// The smart variant takes an immediate win when one exists, otherwise
/// blocks an immediate human win, otherwise plays a uniformly random empty
/// cell. The chaos variant always plays randomly. Candidate cells are
/// scanned in row-major order, so the win/block picks are deterministic.
///
/// # Errors
///
/// * `BotError::NoValidMoves` - the board has no empty cell
pub fn choose_bot_move(board: &Board, variant: BotVariant) -> BotResult<Position> {
    let empty = board::empty_cells(board);
    if empty.is_empty() {
        return Err(BotError::NoValidMoves);
    }

    if variant == BotVariant::Smart {
        if let Some(winning) = find_winning_move(board, Player::O) {
            return Ok(winning);
        }
        if let Some(blocking) = find_winning_move(board, Player::X) {
            return Ok(blocking);
        }
    }

    let mut rng = rand::rng();
    empty
        .choose(&mut rng)
        .copied()
        .ok_or(BotError::NoValidMoves)
}

/// Pick the bot variant for a new game: chaos with probability
/// `CHAOS_PROBABILITY`, smart otherwise, independently per game.
pub fn choose_bot_variant() -> BotVariant {
    if rand::rng().random_bool(CHAOS_PROBABILITY) {
        BotVariant::Chaos
    } else {
        BotVariant::Smart
    }
}

/// First empty cell, in row-major scan order, whose occupation would give
/// `player` a completed line.
fn find_winning_move(board: &Board, player: Player) -> Option<Position> {
    board::empty_cells(board).into_iter().find(|cell| {
        let candidate = board::apply_move(board, cell.x, cell.y, player);
        board::check_winner(&candidate) == Some(player)
    })
}
