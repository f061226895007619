//! Database module providing the SQLite connection pool and query helpers.
//!
//! The pool is wrapped in an explicitly constructed [`Database`] handle that
//! callers create at startup and pass where needed; there is no module-level
//! connection singleton.

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;

pub mod config;
pub mod queries;

pub use config::DatabaseConfig;

/// Statements run at startup to bring the schema up. The original service
/// creates its tables on boot, so the server (and the tests) do the same.
const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS games (
        id TEXT PRIMARY KEY,
        status TEXT NOT NULL,
        starting_player TEXT NOT NULL,
        bot_variant TEXT NOT NULL,
        created_at TEXT NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS idx_games_status ON games (status)",
    "CREATE INDEX IF NOT EXISTS idx_games_created_at ON games (created_at)",
    "CREATE TABLE IF NOT EXISTS moves (
        id TEXT PRIMARY KEY,
        game_id TEXT NOT NULL REFERENCES games (id),
        move_number INTEGER NOT NULL,
        x INTEGER NOT NULL,
        y INTEGER NOT NULL,
        created_at TEXT NOT NULL,
        UNIQUE (game_id, move_number)
    )",
    "CREATE INDEX IF NOT EXISTS idx_moves_game_id ON moves (game_id)",
];

/// Database connection pool wrapper
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Create a new database connection pool, creating the database file
    /// if it does not exist yet.
    pub async fn new(config: &DatabaseConfig) -> Result<Self, sqlx::Error> {
        let options =
            SqliteConnectOptions::from_str(&config.database_url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
            .connect_with(options)
            .await?;

        Ok(Self { pool })
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create the games and moves tables if they are missing.
    pub async fn init_schema(&self) -> Result<(), sqlx::Error> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        Ok(())
    }

    /// Check if the database connection is healthy
    pub async fn health_check(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Close the database connection pool
    pub async fn close(self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn connects_and_bootstraps_the_schema() {
        let db = Database::new(&DatabaseConfig::in_memory())
            .await
            .expect("failed to open in-memory database");
        db.init_schema().await.expect("schema bootstrap failed");
        // Second bootstrap is a no-op thanks to IF NOT EXISTS.
        db.init_schema().await.expect("schema bootstrap not idempotent");
        db.health_check().await.expect("health check failed");
        db.close().await;
    }
}
