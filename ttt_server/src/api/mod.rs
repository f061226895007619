//! HTTP API for the tic-tac-toe server.
//!
//! Thin plumbing over the library's [`GameManager`]: axum routing, CORS,
//! request/response schema shaping, and the error-to-status mapping. All
//! game logic stays in the `tic_tac_toe` crate.
//!
//! # Endpoints
//!
//! ```text
//! POST /games              - Start a new game (abandons the current one)
//! GET  /games              - List all games, oldest first
//! GET  /games/current      - The sole in-progress game
//! GET  /games/{id}         - Game detail with the replayed board
//! POST /games/{id}/moves   - Submit the human move, get the bot's reply
//! GET  /games/{id}/moves   - A game's move log
//! GET  /health             - Health check
//! ```

pub mod games;

use std::env;
use std::sync::Arc;

use axum::{
    Json, Router,
    http::{HeaderValue, Method, header},
    routing::{get, post},
};
use serde_json::json;
use tic_tac_toe::GameManager;
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Browser origin allowed by default in development.
const DEFAULT_CORS_ORIGIN: &str = "http://localhost:4000";

/// Application state shared across all HTTP handlers.
///
/// Cloned per request; cheap thanks to the Arc wrapper.
#[derive(Clone)]
pub struct AppState {
    pub games: Arc<GameManager>,
}

/// Create the complete API router with all endpoints and middleware.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/games", post(games::create_game).get(games::list_games))
        .route("/games/current", get(games::get_current_game))
        .route("/games/{game_id}", get(games::get_game))
        .route(
            "/games/{game_id}/moves",
            post(games::make_move).get(games::list_moves),
        )
        .layer(cors_layer())
        .with_state(state)
}

/// CORS from the `CORS_ORIGINS` environment variable, a comma-separated
/// origin list defaulting to the local development frontend.
fn cors_layer() -> CorsLayer {
    let origins: Vec<HeaderValue> = env::var("CORS_ORIGINS")
        .unwrap_or_else(|_| DEFAULT_CORS_ORIGIN.to_string())
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
}

/// Health check endpoint for monitoring and load balancers.
async fn health_check() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}
