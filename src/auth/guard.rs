//! Bearer-token guard for Axum handlers.
//!
//! Access is single-identity: a request passes when it carries a valid token
//! issued to the configured admin email. There are no roles.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use thiserror::Error;

use super::token::{Claims, TokenCodec};
use crate::{errors::AppError, models::credentials::Credentials, state::AppState};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("missing Authorization header")]
    MissingCredentials,
    #[error("invalid Authorization format, expected: Bearer <token>")]
    MalformedHeader,
    #[error("invalid or expired token")]
    InvalidToken,
    #[error("credentials are not allowed to access this resource")]
    Forbidden,
}

/// The one identity allowed to log in and pass the guard.
#[derive(Clone)]
pub struct AccessPolicy {
    email: String,
    password: String,
}

impl AccessPolicy {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Exact match on both fields.
    pub fn accepts_login(&self, creds: &Credentials) -> bool {
        creds.email == self.email && creds.password == self.password
    }

    /// Validate an `Authorization` header value and the identity inside it.
    pub fn authorize(
        &self,
        codec: &TokenCodec,
        header: Option<&str>,
    ) -> Result<Claims, AuthError> {
        let header = header.ok_or(AuthError::MissingCredentials)?;
        let token = bearer_token(header).ok_or(AuthError::MalformedHeader)?;

        let claims = codec.verify(token).map_err(|err| {
            tracing::debug!("token rejected: {}", err);
            AuthError::InvalidToken
        })?;

        if claims.email != self.email {
            return Err(AuthError::Forbidden);
        }
        Ok(claims)
    }
}

/// Split `Bearer <token>`; the scheme is matched case-insensitively.
fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    let token = token.trim();
    if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() {
        Some(token)
    } else {
        None
    }
}

fn authorize_parts(parts: &Parts, state: &AppState) -> Result<Claims, AppError> {
    let header = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    state
        .access
        .authorize(&state.tokens, header)
        .map_err(|err| {
            tracing::warn!("rejected {} {}: {}", parts.method, parts.uri.path(), err);
            AppError::from(err)
        })
}

/// Extractor for routes that always require the admin token.
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub Claims);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        authorize_parts(parts, state).map(RequireAdmin)
    }
}

/// Extractor for write routes. Enforces the guard only when
/// `protect_writes` is enabled; otherwise it lets every request through.
#[derive(Debug, Clone)]
pub struct WriteAccess(pub Option<Claims>);

impl FromRequestParts<AppState> for WriteAccess {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if !state.options.protect_writes {
            return Ok(WriteAccess(None));
        }
        authorize_parts(parts, state).map(|claims| WriteAccess(Some(claims)))
    }
}
