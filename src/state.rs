//! Shared application state handed to every handler.

use sqlx::SqlitePool;
use std::sync::Arc;

use crate::{
    auth::{guard::AccessPolicy, token::TokenCodec},
    config::AppConfig,
    services::movie_service::MovieService,
};

/// Behaviour switches for the HTTP surface.
#[derive(Clone, Copy, Debug)]
pub struct ApiOptions {
    /// Require the admin token on POST/PUT/DELETE.
    pub protect_writes: bool,
    /// Report 404 from DELETE when nothing was removed.
    pub strict_delete: bool,
}

/// Built once at startup and cloned into each request; every field is cheap
/// to clone.
#[derive(Clone)]
pub struct AppState {
    pub movies: MovieService,
    pub tokens: TokenCodec,
    pub access: AccessPolicy,
    pub options: ApiOptions,
}

impl AppState {
    pub fn new(cfg: &AppConfig, db: Arc<SqlitePool>) -> Self {
        Self {
            movies: MovieService::new(db),
            tokens: TokenCodec::new(&cfg.jwt_secret, cfg.token_ttl_secs),
            access: AccessPolicy::new(cfg.admin_email.clone(), cfg.admin_password.clone()),
            options: ApiOptions {
                protect_writes: cfg.protect_writes,
                strict_delete: cfg.strict_delete,
            },
        }
    }

    pub fn db(&self) -> &Arc<SqlitePool> {
        &self.movies.db
    }
}
