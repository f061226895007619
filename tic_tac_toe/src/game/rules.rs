//! Turn and session rules: who moves when, and how a board is rebuilt
//! from a move log.

use super::board::{self, Board};
use super::entities::{GameStatus, MoveRecord, Player};

/// Player who made the move with the given 1-based number. Odd numbers
/// belong to the starting player, even numbers to the other side.
pub fn derive_player(starting_player: Player, move_number: i64) -> Player {
    if move_number % 2 == 1 {
        starting_player
    } else {
        starting_player.other()
    }
}

/// Whose turn it is after `move_count` moves, or `None` once the game has
/// reached a terminal status.
pub fn current_turn(
    status: GameStatus,
    starting_player: Player,
    move_count: i64,
) -> Option<Player> {
    if status.is_terminal() {
        None
    } else {
        Some(derive_player(starting_player, move_count + 1))
    }
}

/// Replay a move log onto an empty board. Moves must already be sorted by
/// `move_number` ascending; this function does not sort.
pub fn reconstruct_board(starting_player: Player, moves: &[MoveRecord]) -> Board {
    let mut grid = board::empty_board();
    for mv in moves {
        let player = derive_player(starting_player, mv.move_number);
        grid = board::apply_move(&grid, mv.x as usize, mv.y as usize, player);
    }
    grid
}

/// Starting player for a new game: O for the very first game, otherwise the
/// opposite of the most recently created game's starting player. Alternation
/// is keyed to creation order, not to how the previous game ended.
pub fn choose_starting_player(previous: Option<Player>) -> Player {
    match previous {
        None => Player::O,
        Some(player) => player.other(),
    }
}
