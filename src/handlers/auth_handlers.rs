//! `POST /login`

use crate::{
    errors::AppError, handlers::extract::JsonBody, models::credentials::Credentials,
    state::AppState,
};
use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Exchange the admin credentials for a signed token.
///
/// Success answers 200 with the token as a bare JSON string; anything else is
/// 401 with a message and no token.
#[utoipa::path(
    post,
    path = "/login",
    tag = "Auth",
    request_body = Credentials,
    responses(
        (status = 200, description = "Signed bearer token", body = String),
        (status = 401, description = "Invalid credentials"),
        (status = 422, description = "Malformed body"),
    )
)]
pub async fn login(
    State(state): State<AppState>,
    JsonBody(creds): JsonBody<Credentials>,
) -> Result<Response, AppError> {
    if !state.access.accepts_login(&creds) {
        tracing::warn!("login refused for `{}`", creds.email);
        return Ok((
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "Invalid credentials" })),
        )
            .into_response());
    }

    let token = state.tokens.issue(&creds.email).map_err(|err| {
        tracing::error!("token signing failed: {}", err);
        AppError::internal("could not issue token")
    })?;
    tracing::info!("issued token for `{}`", creds.email);
    Ok(Json(token).into_response())
}
