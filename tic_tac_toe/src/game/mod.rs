//! Tic-tac-toe game engine: entities, the board, and turn rules.
//!
//! Everything in this module is pure. The board is never stored anywhere;
//! it is a projection replayed from a game's move log, which keeps board
//! state and history from ever diverging.

pub mod board;
pub mod entities;
pub mod rules;

pub use board::{Board, Cell, Position};
pub use entities::{BotVariant, Game, GameStatus, MoveRecord, Player};
