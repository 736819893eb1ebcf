//! SQLite pool construction and schema bootstrap.

use anyhow::{Context, Result};
use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};
use std::{path::Path, str::FromStr, sync::Arc};

const INIT_SQL: &str = include_str!("../migrations/0001_init.sql");

/// Open the pool for `db_url`, creating the database file and its parent
/// directory when they do not exist yet.
pub async fn connect(db_url: &str) -> Result<Arc<SqlitePool>> {
    tracing::debug!("Connecting using raw URL => {}", db_url);

    // Extract the local file path SQLx will use
    let db_path = db_url
        .trim_start_matches("sqlite://")
        .trim_start_matches("sqlite:")
        .trim_start_matches("file:");

    if !db_path.is_empty() && !db_path.starts_with(":memory:") {
        if let Some(parent) = Path::new(db_path).parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("creating database directory {:?}", parent))?;
                tracing::info!("Created missing directory {:?}", parent);
            }
        }
    }

    let options = SqliteConnectOptions::from_str(db_url)
        .with_context(|| format!("parsing database URL `{}`", db_url))?
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
        .with_context(|| format!("connecting to {}", db_url))?;

    Ok(Arc::new(pool))
}

/// A private in-memory database. Limited to one connection that is never
/// recycled, since every new connection would see an empty database.
pub async fn connect_in_memory() -> Result<Arc<SqlitePool>> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await?;
    Ok(Arc::new(pool))
}

/// Run the embedded schema statements. Every statement is idempotent, so
/// this is safe on each start.
pub async fn run_migrations(db: &Arc<SqlitePool>) -> Result<()> {
    let statements = INIT_SQL
        .split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>();

    tracing::info!("Running {} migration statements...", statements.len());

    for stmt in statements {
        tracing::debug!("Executing migration SQL: {}", stmt);
        sqlx::query(stmt).execute(&**db).await?;
    }

    Ok(())
}
