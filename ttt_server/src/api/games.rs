//! Game API handlers.
//!
//! This module provides the HTTP REST endpoints for the tic-tac-toe game:
//! - Creating a new game (abandoning whatever was still running)
//! - Listing game history and fetching game details
//! - Submitting a human move and receiving the bot's reply
//! - Listing a game's move log
//!
//! # Examples
//!
//! Start a game:
//! ```bash
//! curl -X POST http://localhost:8000/games
//! ```
//!
//! Play the center cell:
//! ```bash
//! curl -X POST http://localhost:8000/games/GAME_ID/moves \
//!   -H "Content-Type: application/json" \
//!   -d '{"x": 1, "y": 1}'
//! ```

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use tic_tac_toe::{Board, BotVariant, GameError, GameStatus, Player, Position};

use super::AppState;

/// Advisory shown once when a new game rolls the chaos bot.
const CHAOS_MESSAGE: &str = "You're facing the Chaos Bot!";

const INVALID_PAYLOAD_MESSAGE: &str =
    "Invalid request payload. Provide integers x and y in the request body.";

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_moves: Option<Vec<Position>>,
}

/// Error tuple returned by every handler on failure.
type ErrorReply = (StatusCode, Json<ErrorResponse>);

#[derive(Debug, Deserialize)]
pub struct MoveRequest {
    pub x: i64,
    pub y: i64,
}

#[derive(Debug, Serialize)]
pub struct GameCreateResponse {
    pub id: String,
    pub status: GameStatus,
    pub starting_player: Player,
    pub bot_type: BotVariant,
    pub board: Board,
    pub current_turn: Option<Player>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bot_move: Option<Position>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GameMoveResponse {
    pub board: Board,
    pub status: GameStatus,
    pub current_turn: Option<Player>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bot_move: Option<Position>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GameSummaryItem {
    pub id: String,
    pub status: GameStatus,
    pub bot_type: BotVariant,
    pub move_count: i64,
    pub created_at: DateTime<Utc>,
    pub final_board: Option<Board>,
}

#[derive(Debug, Serialize)]
pub struct GamesListResponse {
    pub games: Vec<GameSummaryItem>,
}

#[derive(Debug, Serialize)]
pub struct GameDetailResponse {
    pub id: String,
    pub status: GameStatus,
    pub starting_player: Player,
    pub bot_type: BotVariant,
    pub created_at: DateTime<Utc>,
    pub board: Board,
    pub current_turn: Option<Player>,
}

#[derive(Debug, Serialize)]
pub struct MoveHistoryItem {
    pub id: String,
    pub move_number: i64,
    pub x: i64,
    pub y: i64,
    pub player: Player,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct MovesListResponse {
    pub game_id: String,
    pub moves: Vec<MoveHistoryItem>,
}

/// Map a session error onto the wire: 404 for missing games, 400 for rule
/// violations (with the playable cells attached), 500 with a sanitized
/// message for anything internal.
fn error_reply(err: GameError) -> ErrorReply {
    let status = match &err {
        GameError::GameNotFound | GameError::NoActiveGame => StatusCode::NOT_FOUND,
        GameError::GameFinished { .. }
        | GameError::OutOfBounds { .. }
        | GameError::NotYourTurn { .. }
        | GameError::CellOccupied { .. } => StatusCode::BAD_REQUEST,
        GameError::Database(_) | GameError::Bot(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status == StatusCode::INTERNAL_SERVER_ERROR {
        log::error!("internal error: {err}");
    }
    let body = ErrorResponse {
        error: err.code().to_string(),
        message: err.client_message(),
        valid_moves: err.valid_moves().map(<[Position]>::to_vec),
    };
    (status, Json(body))
}

/// Start a new game.
///
/// Abandons any game still in progress, alternates the starting player, and
/// rolls the bot variant. When the bot starts, its opening move is included.
///
/// Returns `201 Created` with the new game and its (possibly non-empty)
/// board.
pub async fn create_game(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<GameCreateResponse>), ErrorReply> {
    let created = state.games.create_game().await.map_err(error_reply)?;
    let message = (created.game.bot_variant == BotVariant::Chaos)
        .then(|| CHAOS_MESSAGE.to_string());
    Ok((
        StatusCode::CREATED,
        Json(GameCreateResponse {
            id: created.game.id,
            status: created.game.status,
            starting_player: created.game.starting_player,
            bot_type: created.game.bot_variant,
            board: created.board,
            current_turn: created.current_turn,
            bot_move: created.bot_move,
            message,
        }),
    ))
}

/// List every game ever played, oldest first.
///
/// `final_board` is populated only for games that are no longer in
/// progress.
pub async fn list_games(
    State(state): State<AppState>,
) -> Result<Json<GamesListResponse>, ErrorReply> {
    let summaries = state.games.list_games().await.map_err(error_reply)?;
    let games = summaries
        .into_iter()
        .map(|summary| GameSummaryItem {
            id: summary.game.id,
            status: summary.game.status,
            bot_type: summary.game.bot_variant,
            move_count: summary.move_count,
            created_at: summary.game.created_at,
            final_board: summary.final_board,
        })
        .collect();
    Ok(Json(GamesListResponse { games }))
}

/// Get the sole in-progress game.
///
/// Returns `404 Not Found` with `game_not_found` when nothing is running.
pub async fn get_current_game(
    State(state): State<AppState>,
) -> Result<Json<GameDetailResponse>, ErrorReply> {
    let detail = state.games.current_game().await.map_err(error_reply)?;
    Ok(Json(detail_response(detail)))
}

/// Get a game by id.
pub async fn get_game(
    State(state): State<AppState>,
    Path(game_id): Path<String>,
) -> Result<Json<GameDetailResponse>, ErrorReply> {
    let detail = state.games.get_game(&game_id).await.map_err(error_reply)?;
    Ok(Json(detail_response(detail)))
}

/// Submit the human move and receive the bot's reply.
///
/// # Errors
///
/// - `400 Bad Request`: game finished, coordinates out of bounds, not the
///   human's turn, or cell occupied — each with the playable cells
/// - `404 Not Found`: unknown game id
/// - `422 Unprocessable Entity`: body is not integers x and y
pub async fn make_move(
    State(state): State<AppState>,
    Path(game_id): Path<String>,
    payload: Result<Json<MoveRequest>, JsonRejection>,
) -> Result<Json<GameMoveResponse>, ErrorReply> {
    let Json(request) = payload.map_err(|_| {
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorResponse {
                error: "invalid_payload".to_string(),
                message: INVALID_PAYLOAD_MESSAGE.to_string(),
                valid_moves: None,
            }),
        )
    })?;

    let outcome = state
        .games
        .submit_move(&game_id, request.x, request.y)
        .await
        .map_err(error_reply)?;
    Ok(Json(GameMoveResponse {
        board: outcome.board,
        status: outcome.status,
        current_turn: outcome.current_turn,
        bot_move: outcome.bot_move,
        message: None,
    }))
}

/// List a game's moves in play order, with the player derived per move.
pub async fn list_moves(
    State(state): State<AppState>,
    Path(game_id): Path<String>,
) -> Result<Json<MovesListResponse>, ErrorReply> {
    let moves = state.games.list_moves(&game_id).await.map_err(error_reply)?;
    let moves = moves
        .into_iter()
        .map(|played| MoveHistoryItem {
            id: played.record.id,
            move_number: played.record.move_number,
            x: played.record.x,
            y: played.record.y,
            player: played.player,
            created_at: played.record.created_at,
        })
        .collect();
    Ok(Json(MovesListResponse { game_id, moves }))
}

fn detail_response(detail: tic_tac_toe::GameDetail) -> GameDetailResponse {
    GameDetailResponse {
        id: detail.game.id,
        status: detail.game.status,
        starting_player: detail.game.starting_player,
        bot_type: detail.game.bot_variant,
        created_at: detail.game.created_at,
        board: detail.board,
        current_turn: detail.current_turn,
    }
}
