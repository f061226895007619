//! Game session orchestration.
//!
//! [`GameManager`] runs the two write operations (create game, submit move)
//! and the read operations of the API, each against a single transaction or
//! pool read. It owns no game logic itself; the board engine, turn rules and
//! bot strategy are called in and their results persisted.

pub mod errors;
pub mod manager;
pub mod models;

pub use errors::{GameError, GameResult};
pub use manager::GameManager;
pub use models::{CreatedGame, GameDetail, GameSummary, MoveOutcome, PlayedMove};
