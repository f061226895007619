//! Executor-generic query helpers for the games and moves tables.
//!
//! Every helper takes any SQLite executor, so the same query runs against
//! the pool for plain reads and against `&mut *tx` inside the orchestrator's
//! transactions.

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteExecutor};

use crate::game::entities::{Game, GameStatus, MoveRecord};

fn game_from_row(row: &SqliteRow) -> Result<Game, sqlx::Error> {
    let status: String = row.try_get("status")?;
    let starting_player: String = row.try_get("starting_player")?;
    let bot_variant: String = row.try_get("bot_variant")?;
    Ok(Game {
        id: row.try_get("id")?,
        status: status.parse().map_err(decode_error)?,
        starting_player: starting_player.parse().map_err(decode_error)?,
        bot_variant: bot_variant.parse().map_err(decode_error)?,
        created_at: row.try_get("created_at")?,
    })
}

fn move_from_row(row: &SqliteRow) -> Result<MoveRecord, sqlx::Error> {
    Ok(MoveRecord {
        id: row.try_get("id")?,
        game_id: row.try_get("game_id")?,
        move_number: row.try_get("move_number")?,
        x: row.try_get("x")?,
        y: row.try_get("y")?,
        created_at: row.try_get("created_at")?,
    })
}

fn decode_error(err: crate::game::entities::ParseEnumError) -> sqlx::Error {
    sqlx::Error::Decode(Box::new(err))
}

/// Insert a new game row.
pub async fn insert_game<'e, E>(executor: E, game: &Game) -> Result<(), sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query(
        "INSERT INTO games (id, status, starting_player, bot_variant, created_at)
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&game.id)
    .bind(game.status.as_str())
    .bind(game.starting_player.as_str())
    .bind(game.bot_variant.as_str())
    .bind(game.created_at)
    .execute(executor)
    .await?;
    Ok(())
}

/// Insert a new move row.
pub async fn insert_move<'e, E>(executor: E, mv: &MoveRecord) -> Result<(), sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query(
        "INSERT INTO moves (id, game_id, move_number, x, y, created_at)
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(&mv.id)
    .bind(&mv.game_id)
    .bind(mv.move_number)
    .bind(mv.x)
    .bind(mv.y)
    .bind(mv.created_at)
    .execute(executor)
    .await?;
    Ok(())
}

/// Point lookup of a game by id.
pub async fn find_game<'e, E>(executor: E, game_id: &str) -> Result<Option<Game>, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let row = sqlx::query(
        "SELECT id, status, starting_player, bot_variant, created_at
         FROM games WHERE id = ?",
    )
    .bind(game_id)
    .fetch_optional(executor)
    .await?;
    row.as_ref().map(game_from_row).transpose()
}

/// All in-progress games, most recently created first. The abandonment rule
/// keeps this at zero or one row, but the query does not assume that.
pub async fn games_in_progress<'e, E>(executor: E) -> Result<Vec<Game>, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let rows = sqlx::query(
        "SELECT id, status, starting_player, bot_variant, created_at
         FROM games WHERE status = ?
         ORDER BY created_at DESC, rowid DESC",
    )
    .bind(GameStatus::InProgress.as_str())
    .fetch_all(executor)
    .await?;
    rows.iter().map(game_from_row).collect()
}

/// The most recently created game that is no longer in progress. Feeds the
/// starting-player alternation on game creation.
pub async fn latest_settled_game<'e, E>(executor: E) -> Result<Option<Game>, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let row = sqlx::query(
        "SELECT id, status, starting_player, bot_variant, created_at
         FROM games WHERE status != ?
         ORDER BY created_at DESC, rowid DESC
         LIMIT 1",
    )
    .bind(GameStatus::InProgress.as_str())
    .fetch_optional(executor)
    .await?;
    row.as_ref().map(game_from_row).transpose()
}

/// Every game ever created, oldest first.
pub async fn all_games<'e, E>(executor: E) -> Result<Vec<Game>, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let rows = sqlx::query(
        "SELECT id, status, starting_player, bot_variant, created_at
         FROM games
         ORDER BY created_at ASC, rowid ASC",
    )
    .fetch_all(executor)
    .await?;
    rows.iter().map(game_from_row).collect()
}

/// A game's moves in replay order (`move_number` ascending).
pub async fn moves_for_game<'e, E>(
    executor: E,
    game_id: &str,
) -> Result<Vec<MoveRecord>, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let rows = sqlx::query(
        "SELECT id, game_id, move_number, x, y, created_at
         FROM moves WHERE game_id = ?
         ORDER BY move_number ASC",
    )
    .bind(game_id)
    .fetch_all(executor)
    .await?;
    rows.iter().map(move_from_row).collect()
}

/// Update a game's status field.
pub async fn update_game_status<'e, E>(
    executor: E,
    game_id: &str,
    status: GameStatus,
) -> Result<(), sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query("UPDATE games SET status = ? WHERE id = ?")
        .bind(status.as_str())
        .bind(game_id)
        .execute(executor)
        .await?;
    Ok(())
}
