use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;

use crate::{
    auth::guard::AuthError,
    models::validation::FieldViolation,
    services::movie_service::MovieError,
};

/// A lightweight wrapper for general errors that keeps the message local.
#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
    pub violations: Vec<FieldViolation>,
}

impl AppError {
    /// Create a new AppError with a specific status and message.
    pub fn new(status: StatusCode, msg: impl Into<String>) -> Self {
        Self {
            status,
            message: msg.into(),
            violations: Vec::new(),
        }
    }

    /// Shortcut for a 500 Internal Server Error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, msg)
    }

    /// Shortcut for 404 Not Found
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, msg)
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, msg)
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, msg)
    }

    /// 422 carrying field-level detail.
    pub fn validation(violations: Vec<FieldViolation>) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            message: "validation failed".into(),
            violations,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut body = json!({
            "error": self.message,
            "status": self.status.as_u16()
        });
        if !self.violations.is_empty() {
            body["violations"] = json!(self.violations);
        }

        (self.status, Json(body)).into_response()
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::internal(err.to_string())
    }
}

impl From<MovieError> for AppError {
    fn from(err: MovieError) -> Self {
        match err {
            MovieError::NotFound(_) => AppError::not_found(err.to_string()),
            MovieError::AlreadyExists(_) => AppError::new(StatusCode::CONFLICT, err.to_string()),
            MovieError::Sqlx(e) => {
                // Log the real error but return generic message
                tracing::error!("database error: {}", e);
                AppError::internal("database error occurred")
            }
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Forbidden => AppError::forbidden(err.to_string()),
            _ => AppError::unauthorized(err.to_string()),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        let status = match rejection.status() {
            // malformed JSON and wrong shapes are both reported as 422
            StatusCode::BAD_REQUEST => StatusCode::UNPROCESSABLE_ENTITY,
            other => other,
        };
        AppError {
            status,
            message: "invalid request body".into(),
            violations: vec![FieldViolation::new("body", rejection.body_text())],
        }
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::validation(vec![FieldViolation::new("id", rejection.body_text())])
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::validation(vec![FieldViolation::new("query", rejection.body_text())])
    }
}
