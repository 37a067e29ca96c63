//! # Gutty Server
//!
//! HTTP front end for the antique golf ball catalog: search, item detail,
//! grouped statistics and per-record image uploads, served with axum over
//! the SQLite record store in `gutty-core`.

pub mod handlers;
pub mod infra;
pub mod routes;

pub use infra::app_state::AppState;
pub use routes::create_app;
