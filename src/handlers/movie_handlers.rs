//! HTTP handlers for the movie catalogue.
//! Validation happens in the extractors; storage concerns are delegated to
//! `MovieService`.

use crate::{
    auth::guard::{RequireAdmin, WriteAccess},
    errors::AppError,
    handlers::extract::{MovieId, QueryParams, ValidJson},
    models::movie::{Movie, MovieInput, check_lookup_id},
    services::movie_service::MovieError,
    state::AppState,
};
use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use serde_json::json;

/// Query params accepted by `GET /movies/`.
#[derive(Debug, Deserialize, Default)]
pub struct CategoryQuery {
    #[serde(default)]
    pub category: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreatedMovie {
    #[schema(value_type = String, example = "Movie created")]
    pub message: &'static str,
    pub movie: Movie,
}

/// GET `/movies` — every movie; requires the admin token.
#[utoipa::path(
    get,
    path = "/movies",
    tag = "Movies",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Every movie, by id", body = Vec<Movie>),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Token issued to another identity"),
    )
)]
pub async fn list_movies(
    State(state): State<AppState>,
    RequireAdmin(claims): RequireAdmin,
) -> Result<Json<Vec<Movie>>, AppError> {
    tracing::debug!("listing movies for {}", claims.email);
    let movies = state.movies.list_all().await?;
    Ok(Json(movies))
}

/// GET `/movies/{id}` — a single movie as a bare object, `[]` with 404 when absent.
#[utoipa::path(
    get,
    path = "/movies/{id}",
    tag = "Movies",
    params(("id" = i64, Path, description = "Movie id, 1 to 2000")),
    responses(
        (status = 200, description = "The movie", body = Movie),
        (status = 404, description = "No such movie; body is `[]`"),
        (status = 422, description = "Id out of range"),
    )
)]
pub async fn get_movie(
    State(state): State<AppState>,
    MovieId(id): MovieId,
) -> Result<Response, AppError> {
    check_lookup_id(id).map_err(AppError::validation)?;

    match state.movies.get_by_id(id).await? {
        Some(movie) => Ok(Json(movie).into_response()),
        None => Ok((StatusCode::NOT_FOUND, Json(json!([]))).into_response()),
    }
}

/// GET `/movies/?category=` — exact category filter; empty returns everything.
#[utoipa::path(
    get,
    path = "/movies/",
    tag = "Movies",
    params(("category" = Option<String>, Query, description = "Exact category match")),
    responses((status = 200, description = "Matching movies", body = Vec<Movie>))
)]
pub async fn list_movies_by_category(
    State(state): State<AppState>,
    QueryParams(q): QueryParams<CategoryQuery>,
) -> Result<Json<Vec<Movie>>, AppError> {
    let movies = state.movies.list_by_category(Some(&q.category)).await?;
    Ok(Json(movies))
}

/// POST `/movies` — create a movie.
#[utoipa::path(
    post,
    path = "/movies",
    tag = "Movies",
    request_body = MovieInput,
    responses(
        (status = 201, description = "Movie created", body = CreatedMovie),
        (status = 409, description = "Id already taken"),
        (status = 422, description = "Field bounds violated"),
    )
)]
pub async fn create_movie(
    State(state): State<AppState>,
    _access: WriteAccess,
    ValidJson(input): ValidJson<MovieInput>,
) -> Result<impl IntoResponse, AppError> {
    let movie = state.movies.insert(&input).await?;
    tracing::info!("created movie {} `{}`", movie.id, movie.title);

    Ok((
        StatusCode::CREATED,
        Json(CreatedMovie {
            message: "Movie created",
            movie,
        }),
    ))
}

/// PUT `/movies/{id}` — replace every field except the id.
#[utoipa::path(
    put,
    path = "/movies/{id}",
    tag = "Movies",
    params(("id" = i64, Path, description = "Movie id")),
    request_body = MovieInput,
    responses(
        (status = 200, description = "Updated movie", body = Movie),
        (status = 404, description = "Movie not found"),
        (status = 422, description = "Field bounds violated"),
    )
)]
pub async fn update_movie(
    State(state): State<AppState>,
    _access: WriteAccess,
    MovieId(id): MovieId,
    ValidJson(input): ValidJson<MovieInput>,
) -> Result<Response, AppError> {
    match state.movies.update(id, &input).await {
        Ok(movie) => {
            tracing::info!("updated movie {}", id);
            Ok(Json(movie).into_response())
        }
        Err(MovieError::NotFound(_)) => Ok((
            StatusCode::NOT_FOUND,
            Json(json!({ "message": "Movie not found" })),
        )
            .into_response()),
        Err(err) => Err(err.into()),
    }
}

/// DELETE `/movies/{id}` — always 200 unless `strict_delete` is enabled.
#[utoipa::path(
    delete,
    path = "/movies/{id}",
    tag = "Movies",
    params(("id" = i64, Path, description = "Movie id")),
    responses(
        (status = 200, description = "Movie deleted"),
        (status = 404, description = "Nothing removed (strict delete only)"),
    )
)]
pub async fn delete_movie(
    State(state): State<AppState>,
    _access: WriteAccess,
    MovieId(id): MovieId,
) -> Result<Response, AppError> {
    let removed = state.movies.delete(id).await?;
    tracing::info!("delete movie {} removed {} rows", id, removed);

    if removed == 0 && state.options.strict_delete {
        return Ok((
            StatusCode::NOT_FOUND,
            Json(json!({ "message": "Movie not found" })),
        )
            .into_response());
    }

    Ok(Json(json!({ "message": "Movie deleted" })).into_response())
}
