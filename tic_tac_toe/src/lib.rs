//! # Tic-Tac-Toe
//!
//! A single-game tic-tac-toe backend library. One game is "current" at a
//! time; the human always plays X, the automated opponent always plays O.
//!
//! ## Architecture
//!
//! The move log is the source of truth. Boards are never stored: every
//! operation replays a game's moves onto an empty grid, which keeps board
//! state and history from diverging. The player of each move is likewise
//! derived from the game's starting player and the move number.
//!
//! ## Core Modules
//!
//! - [`game`]: entities, the pure board engine, and turn/session rules
//! - [`bot`]: the automated opponent (smart and chaos variants)
//! - [`session`]: the orchestrator coordinating rules, bot and persistence
//! - [`db`]: SQLite pool wrapper, configuration, and query helpers
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use tic_tac_toe::{Database, DatabaseConfig, GameManager};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::new(&DatabaseConfig::from_env()).await?;
//!     db.init_schema().await?;
//!     let games = GameManager::new(Arc::new(db.pool().clone()));
//!
//!     let created = games.create_game().await?;
//!     println!("game {} started", created.game.id);
//!     Ok(())
//! }
//! ```

/// Automated opponent.
pub mod bot;

/// SQLite persistence: pool wrapper, configuration, query helpers.
pub mod db;

/// Core game logic: entities, board engine, turn rules.
pub mod game;

/// Request-lifecycle orchestration over the persistence layer.
pub mod session;

pub use db::{Database, DatabaseConfig};
pub use game::{
    Board, Cell, Position,
    entities::{BotVariant, Game, GameStatus, MoveRecord, Player},
};
pub use session::{
    CreatedGame, GameDetail, GameError, GameManager, GameResult, GameSummary, MoveOutcome,
    PlayedMove,
};
