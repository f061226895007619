//! Database configuration.

use std::env;

/// Default on-disk database, matching the server's working directory.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://tic_tac_toe.db";

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// SQLite connection URL (`sqlite://<path>` or `sqlite::memory:`)
    pub database_url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Connection acquire timeout in seconds
    pub acquire_timeout_secs: u64,
}

impl DatabaseConfig {
    /// Create configuration from environment variables.
    ///
    /// Reads `DATABASE_URL` (or the legacy alias `TICTACTOE_DATABASE_URL`)
    /// and `DB_MAX_CONNECTIONS` / `DB_ACQUIRE_TIMEOUT_SECS`, falling back to
    /// the development defaults.
    pub fn from_env() -> Self {
        let database_url = env::var("DATABASE_URL")
            .or_else(|_| env::var("TICTACTOE_DATABASE_URL"))
            .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());

        Self {
            database_url,
            max_connections: env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5),
            acquire_timeout_secs: env::var("DB_ACQUIRE_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5),
        }
    }

    /// Default configuration for development: a SQLite file next to the
    /// server binary.
    pub fn development() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: 5,
            acquire_timeout_secs: 5,
        }
    }

    /// In-memory database on a single connection. Every connection to
    /// `sqlite::memory:` sees its own database, so the pool is capped at
    /// one connection to keep a single shared store.
    pub fn in_memory() -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            max_connections: 1,
            acquire_timeout_secs: 5,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self::development()
    }
}
