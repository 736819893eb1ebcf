//! Defines routes for the movie catalogue.
//!
//! ## Structure
//! - **Auth**
//!   - `POST   /login` — exchange credentials for a token
//!
//! - **Movies**
//!   - `GET    /movies` — list all (bearer token required)
//!   - `POST   /movies` — create
//!   - `GET    /movies/` — list, filtered by `?category=`
//!   - `GET    /movies/{id}` — fetch one
//!   - `PUT    /movies/{id}` — replace
//!   - `DELETE /movies/{id}` — delete
//!
//! - **Docs**
//!   - `GET    /openapi.json` — OpenAPI document
//!
//! `/movies` and `/movies/` are distinct routes.

use crate::{
    handlers::{
        auth_handlers::login,
        docs_handlers::openapi_json,
        health_handlers::{healthz, readyz},
        movie_handlers::{
            create_movie, delete_movie, get_movie, list_movies, list_movies_by_category,
            update_movie,
        },
    },
    state::AppState,
};
use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

/// Build and return the router for every route.
///
/// The router carries shared state (`AppState`) to all handlers.
pub fn routes() -> Router<AppState> {
    Router::new()
        // health endpoints (mounted at root)
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .route("/openapi.json", get(openapi_json))
        .route("/login", post(login))
        .route("/movies", get(list_movies).post(create_movie))
        .route("/movies/", get(list_movies_by_category))
        .route(
            "/movies/{id}",
            get(get_movie).put(update_movie).delete(delete_movie),
        )
        .layer(TraceLayer::new_for_http())
}
