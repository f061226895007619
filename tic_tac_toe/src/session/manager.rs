//! Game session orchestrator.

use std::sync::Arc;

use chrono::Utc;
use log::info;
use sqlx::SqlitePool;
use uuid::Uuid;

use super::errors::{GameError, GameResult};
use super::models::{CreatedGame, GameDetail, GameSummary, MoveOutcome, PlayedMove};
use crate::bot;
use crate::db::queries;
use crate::game::board::{self, Cell};
use crate::game::entities::{Game, GameStatus, MoveRecord, Player};
use crate::game::rules;

/// Coordinates one request lifecycle per operation: load state, validate,
/// apply game rules, persist, respond. The two write operations each run in
/// a single transaction; all pure logic lives in the `game` and `bot`
/// modules.
#[derive(Clone)]
pub struct GameManager {
    pool: Arc<SqlitePool>,
}

impl GameManager {
    /// Create a new game manager on top of an existing pool.
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }

    /// Start a new game, abandoning whatever game was still in progress.
    ///
    /// The starting player alternates with the most recently created game
    /// (the very first game starts with the bot), and the bot variant is
    /// rolled fresh. When the bot starts, its opening move is chosen and
    /// recorded before the transaction commits.
    pub async fn create_game(&self) -> GameResult<CreatedGame> {
        let mut tx = self.pool.begin().await?;

        // There should be at most one, but sweep defensively.
        let active = queries::games_in_progress(&mut *tx).await?;
        for stale in &active {
            queries::update_game_status(&mut *tx, &stale.id, GameStatus::Abandoned)
                .await?;
            info!("abandoned game {}", stale.id);
        }

        let previous = queries::latest_settled_game(&mut *tx).await?;
        let starting_player =
            rules::choose_starting_player(previous.map(|game| game.starting_player));
        let bot_variant = bot::choose_bot_variant();

        let game = Game {
            id: Uuid::new_v4().to_string(),
            status: GameStatus::InProgress,
            starting_player,
            bot_variant,
            created_at: Utc::now(),
        };
        queries::insert_game(&mut *tx, &game).await?;

        let mut grid = board::empty_board();
        let mut move_count = 0;
        let mut bot_move = None;

        if starting_player == Player::O {
            let opening = bot::choose_bot_move(&grid, bot_variant)?;
            move_count = 1;
            queries::insert_move(
                &mut *tx,
                &MoveRecord {
                    id: Uuid::new_v4().to_string(),
                    game_id: game.id.clone(),
                    move_number: move_count,
                    x: opening.x as i64,
                    y: opening.y as i64,
                    created_at: Utc::now(),
                },
            )
            .await?;
            grid = board::apply_move(&grid, opening.x, opening.y, Player::O);
            bot_move = Some(opening);
        }

        tx.commit().await?;
        info!(
            "created game {} (starting player {}, {} bot)",
            game.id, game.starting_player, game.bot_variant
        );

        let current_turn = rules::current_turn(game.status, game.starting_player, move_count);
        Ok(CreatedGame {
            game,
            board: grid,
            current_turn,
            bot_move,
        })
    }

    /// Apply a human move and, unless it ended the game, the bot's reply.
    ///
    /// Validation runs in a fixed order and stops at the first failure:
    /// finished game, out-of-bounds coordinates, not the human's turn,
    /// occupied cell. Every rule violation carries the currently playable
    /// cells.
    pub async fn submit_move(&self, game_id: &str, x: i64, y: i64) -> GameResult<MoveOutcome> {
        let mut tx = self.pool.begin().await?;

        let game = queries::find_game(&mut *tx, game_id)
            .await?
            .ok_or(GameError::GameNotFound)?;
        let moves = queries::moves_for_game(&mut *tx, game_id).await?;
        let grid = rules::reconstruct_board(game.starting_player, &moves);

        if game.status != GameStatus::InProgress {
            return Err(GameError::GameFinished {
                valid_moves: board::empty_cells(&grid),
            });
        }
        if !(0..=2).contains(&x) || !(0..=2).contains(&y) {
            return Err(GameError::OutOfBounds {
                valid_moves: board::empty_cells(&grid),
            });
        }
        let move_count = moves.len() as i64;
        if rules::current_turn(game.status, game.starting_player, move_count) != Some(Player::X) {
            return Err(GameError::NotYourTurn {
                valid_moves: board::empty_cells(&grid),
            });
        }
        let (x, y) = (x as usize, y as usize);
        if grid[y][x] != Cell::Empty {
            return Err(GameError::CellOccupied {
                valid_moves: board::empty_cells(&grid),
            });
        }

        let human_number = move_count + 1;
        queries::insert_move(
            &mut *tx,
            &MoveRecord {
                id: Uuid::new_v4().to_string(),
                game_id: game.id.clone(),
                move_number: human_number,
                x: x as i64,
                y: y as i64,
                created_at: Utc::now(),
            },
        )
        .await?;
        let grid = board::apply_move(&grid, x, y, Player::X);
        let status = board::evaluate_status(&grid);

        if status.is_terminal() {
            queries::update_game_status(&mut *tx, &game.id, status).await?;
            tx.commit().await?;
            info!("game {} finished: {}", game.id, status);
            return Ok(MoveOutcome {
                board: grid,
                status,
                current_turn: None,
                bot_move: None,
            });
        }

        let reply = bot::choose_bot_move(&grid, game.bot_variant)?;
        let bot_number = human_number + 1;
        queries::insert_move(
            &mut *tx,
            &MoveRecord {
                id: Uuid::new_v4().to_string(),
                game_id: game.id.clone(),
                move_number: bot_number,
                x: reply.x as i64,
                y: reply.y as i64,
                created_at: Utc::now(),
            },
        )
        .await?;
        let grid = board::apply_move(&grid, reply.x, reply.y, Player::O);
        let status = board::evaluate_status(&grid);
        queries::update_game_status(&mut *tx, &game.id, status).await?;
        tx.commit().await?;

        if status.is_terminal() {
            info!("game {} finished: {}", game.id, status);
        }
        Ok(MoveOutcome {
            board: grid,
            status,
            current_turn: rules::current_turn(status, game.starting_player, bot_number),
            bot_move: Some(reply),
        })
    }

    /// Every game ever created, oldest first, each with its move count and
    /// (for settled games) the final board.
    pub async fn list_games(&self) -> GameResult<Vec<GameSummary>> {
        let games = queries::all_games(self.pool.as_ref()).await?;
        let mut summaries = Vec::with_capacity(games.len());
        for game in games {
            let moves =
                queries::moves_for_game(self.pool.as_ref(), &game.id).await?;
            let final_board = game
                .status
                .is_terminal()
                .then(|| rules::reconstruct_board(game.starting_player, &moves));
            summaries.push(GameSummary {
                move_count: moves.len() as i64,
                final_board,
                game,
            });
        }
        Ok(summaries)
    }

    /// The sole in-progress game.
    ///
    /// # Errors
    ///
    /// * `GameError::NoActiveGame` - nothing is in progress right now
    pub async fn current_game(&self) -> GameResult<GameDetail> {
        let game = queries::games_in_progress(self.pool.as_ref())
            .await?
            .into_iter()
            .next()
            .ok_or(GameError::NoActiveGame)?;
        self.detail(game).await
    }

    /// A game by id with its replayed board.
    pub async fn get_game(&self, game_id: &str) -> GameResult<GameDetail> {
        let game = queries::find_game(self.pool.as_ref(), game_id)
            .await?
            .ok_or(GameError::GameNotFound)?;
        self.detail(game).await
    }

    /// A game's move log with the player derived per move.
    pub async fn list_moves(&self, game_id: &str) -> GameResult<Vec<PlayedMove>> {
        let game = queries::find_game(self.pool.as_ref(), game_id)
            .await?
            .ok_or(GameError::GameNotFound)?;
        let moves = queries::moves_for_game(self.pool.as_ref(), game_id).await?;
        Ok(moves
            .into_iter()
            .map(|record| PlayedMove {
                player: rules::derive_player(game.starting_player, record.move_number),
                record,
            })
            .collect())
    }

    async fn detail(&self, game: Game) -> GameResult<GameDetail> {
        let moves = queries::moves_for_game(self.pool.as_ref(), &game.id).await?;
        let grid = rules::reconstruct_board(game.starting_player, &moves);
        let current_turn =
            rules::current_turn(game.status, game.starting_player, moves.len() as i64);
        Ok(GameDetail {
            game,
            board: grid,
            current_turn,
        })
    }
}
