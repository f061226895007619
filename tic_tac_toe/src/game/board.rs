//! Pure functions over the 3x3 board.
//!
//! The board is a value type indexed `board[y][x]`, always derived by
//! replaying a game's move log. Every function here is side-effect free so
//! callers (the bot in particular) can probe candidate moves speculatively.

use serde::{Deserialize, Serialize};

use super::entities::{GameStatus, Player};

/// Board side length.
pub const SIZE: usize = 3;

/// One cell of the board, serialized as `"."`, `"X"`, or `"O"`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Cell {
    #[serde(rename = ".")]
    Empty,
    X,
    O,
}

impl From<Player> for Cell {
    fn from(player: Player) -> Self {
        match player {
            Player::X => Cell::X,
            Player::O => Cell::O,
        }
    }
}

/// A 3x3 grid of cells, indexed `board[y][x]`.
pub type Board = [[Cell; SIZE]; SIZE];

/// A board coordinate with `x` and `y` in `[0, 2]`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

/// The 8 winning lines as `(x, y)` triples: 3 rows, 3 columns, 2 diagonals.
/// `check_winner` scans them in this order.
const WIN_LINES: [[(usize, usize); 3]; 8] = [
    [(0, 0), (1, 0), (2, 0)],
    [(0, 1), (1, 1), (2, 1)],
    [(0, 2), (1, 2), (2, 2)],
    [(0, 0), (0, 1), (0, 2)],
    [(1, 0), (1, 1), (1, 2)],
    [(2, 0), (2, 1), (2, 2)],
    [(0, 0), (1, 1), (2, 2)],
    [(0, 2), (1, 1), (2, 0)],
];

/// A board with every cell empty.
pub fn empty_board() -> Board {
    [[Cell::Empty; SIZE]; SIZE]
}

/// Copy of `board` with `(x, y)` set to `player`'s mark. The caller
/// guarantees the coordinates are in range and the cell is empty; this is
/// not re-validated.
pub fn apply_move(board: &Board, x: usize, y: usize, player: Player) -> Board {
    let mut next = *board;
    next[y][x] = Cell::from(player);
    next
}

/// All empty positions in row-major order (`y` outer, `x` inner, ascending).
pub fn empty_cells(board: &Board) -> Vec<Position> {
    let mut cells = Vec::new();
    for y in 0..SIZE {
        for x in 0..SIZE {
            if board[y][x] == Cell::Empty {
                cells.push(Position { x, y });
            }
        }
    }
    cells
}

/// Owner of the first fully-matching non-empty line, if any. A valid move
/// sequence cannot give both players a winning line, so scan order only
/// decides which of one player's lines is reported.
pub fn check_winner(board: &Board) -> Option<Player> {
    for line in WIN_LINES {
        let [(ax, ay), (bx, by), (cx, cy)] = line;
        let first = board[ay][ax];
        if first != Cell::Empty && first == board[by][bx] && first == board[cy][cx] {
            return match first {
                Cell::X => Some(Player::X),
                Cell::O => Some(Player::O),
                Cell::Empty => None,
            };
        }
    }
    None
}

/// True iff no cell is empty. Only meaningful after `check_winner` returned
/// nothing: a full board with a winning line is a win, not a draw.
pub fn is_draw(board: &Board) -> bool {
    board
        .iter()
        .all(|row| row.iter().all(|cell| *cell != Cell::Empty))
}

/// Status of the board: winner first, then draw, otherwise still going.
pub fn evaluate_status(board: &Board) -> GameStatus {
    match check_winner(board) {
        Some(Player::X) => GameStatus::XWins,
        Some(Player::O) => GameStatus::OWins,
        None if is_draw(board) => GameStatus::Draw,
        None => GameStatus::InProgress,
    }
}

/// Build a board from three row strings like `"XX."`. Test helper.
#[cfg(test)]
pub(crate) fn board_from_rows(rows: [&str; 3]) -> Board {
    let mut board = empty_board();
    for (y, row) in rows.iter().enumerate() {
        for (x, mark) in row.chars().enumerate() {
            board[y][x] = match mark {
                'X' => Cell::X,
                'O' => Cell::O,
                _ => Cell::Empty,
            };
        }
    }
    board
}
