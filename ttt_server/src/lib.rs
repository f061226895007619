//! Tic-tac-toe HTTP server library surface.
//!
//! Exposes the API router so integration tests can drive the exact router
//! the binary serves.

pub mod api;
