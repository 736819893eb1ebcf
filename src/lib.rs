//! Movie catalogue HTTP service: CRUD over a single `movies` table with a
//! bearer-token guard.

pub mod auth;
pub mod config;
pub mod database;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

use axum::Router;

/// The complete application with its state attached.
pub fn app(state: state::AppState) -> Router {
    routes::routes::routes().with_state(state)
}
