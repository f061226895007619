//! Single-game tic-tac-toe server.
//!
//! Serves the game API over HTTP with a SQLite-backed move log. One game is
//! in progress at a time; starting a new one abandons the old one.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Error;
use log::info;
use pico_args::Arguments;
use tic_tac_toe::{Database, DatabaseConfig, GameManager};
use ttt_server::api::{self, AppState};

const HELP: &str = "\
Run a single-game tic-tac-toe server

USAGE:
  ttt_server [OPTIONS]

OPTIONS:
  --bind       IP:PORT     Server socket bind address  [default: env SERVER_BIND or 127.0.0.1:8000]
  --db-url     URL         Database connection string  [default: env DATABASE_URL or sqlite://tic_tac_toe.db]

FLAGS:
  -h, --help               Print help information

ENVIRONMENT:
  SERVER_BIND              Server bind address (e.g., 0.0.0.0:8000)
  DATABASE_URL             SQLite connection string (TICTACTOE_DATABASE_URL also honored)
  CORS_ORIGINS             Comma-separated list of allowed browser origins
  DB_MAX_CONNECTIONS       Connection pool size
  RUST_LOG                 Log filter (e.g., info)
";

struct Args {
    bind: SocketAddr,
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let args = Args {
        bind: pargs.value_from_str("--bind").unwrap_or_else(|_| {
            std::env::var("SERVER_BIND")
                .unwrap_or_else(|_| "127.0.0.1:8000".to_string())
                .parse()
                .expect("Invalid SERVER_BIND address")
        }),
        database_url: pargs.value_from_str("--db-url").ok(),
    };

    env_logger::builder().format_target(false).init();

    let mut db_config = DatabaseConfig::from_env();
    if let Some(url) = args.database_url {
        db_config.database_url = url;
    }

    info!("Connecting to database: {}", db_config.database_url);
    let db = Database::new(&db_config)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to connect to database: {}", e))?;
    db.init_schema()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to initialize schema: {}", e))?;
    info!("Database ready");

    let games = Arc::new(GameManager::new(Arc::new(db.pool().clone())));
    let app = api::create_router(AppState { games });

    let listener = tokio::net::TcpListener::bind(args.bind)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind to {}: {}", args.bind, e))?;

    info!(
        "Server is running at http://{}. Press Ctrl+C to stop.",
        args.bind
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    info!("Shutting down server...");

    Ok(())
}

/// Graceful shutdown signal
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install CTRL+C signal handler");
}
