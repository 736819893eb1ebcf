//! src/services/movie_service.rs
//!
//! MovieService — CRUD over the `movies` table. Every call is a single
//! statement against the shared pool and is committed before it returns;
//! nothing is cached between requests.

use crate::models::movie::{Movie, MovieInput};
use sqlx::SqlitePool;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum MovieError {
    #[error("movie `{0}` not found")]
    NotFound(i64),
    #[error("movie `{0}` already exists")]
    AlreadyExists(i64),
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

pub type MovieResult<T> = Result<T, MovieError>;

const MOVIE_COLUMNS: &str = "id, title, overview, year, rating, category";

/// MovieService provides the catalogue operations:
/// - list all movies, optionally filtered by exact category
/// - fetch one movie by id
/// - insert, full-replace update and delete by id
#[derive(Clone)]
pub struct MovieService {
    /// Shared SQLite connection pool.
    pub db: Arc<SqlitePool>,
}

impl MovieService {
    pub fn new(db: Arc<SqlitePool>) -> Self {
        Self { db }
    }

    /// Every movie, ordered by id.
    pub async fn list_all(&self) -> MovieResult<Vec<Movie>> {
        let rows = sqlx::query_as::<_, Movie>(&format!(
            "SELECT {MOVIE_COLUMNS} FROM movies ORDER BY id ASC"
        ))
        .fetch_all(&*self.db)
        .await?;
        debug!("listed {} movies", rows.len());
        Ok(rows)
    }

    /// Fetch a single movie, `None` if no row has this id.
    pub async fn get_by_id(&self, id: i64) -> MovieResult<Option<Movie>> {
        let row = sqlx::query_as::<_, Movie>(&format!(
            "SELECT {MOVIE_COLUMNS} FROM movies WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&*self.db)
        .await?;
        Ok(row)
    }

    /// Movies whose category equals `category` exactly.
    ///
    /// An empty or absent category means no filter.
    pub async fn list_by_category(&self, category: Option<&str>) -> MovieResult<Vec<Movie>> {
        let category = match category {
            Some(c) if !c.is_empty() => c,
            _ => return self.list_all().await,
        };

        let rows = sqlx::query_as::<_, Movie>(&format!(
            "SELECT {MOVIE_COLUMNS} FROM movies WHERE category = ? ORDER BY id ASC"
        ))
        .bind(category)
        .fetch_all(&*self.db)
        .await?;
        debug!("category `{}` matched {} movies", category, rows.len());
        Ok(rows)
    }

    /// Insert a movie. A missing id is assigned by SQLite; a supplied id is
    /// stored as given and collides with an existing row as `AlreadyExists`.
    pub async fn insert(&self, input: &MovieInput) -> MovieResult<Movie> {
        let result = sqlx::query_as::<_, Movie>(&format!(
            "INSERT INTO movies (id, title, overview, year, rating, category)
             VALUES (?, ?, ?, ?, ?, ?)
             RETURNING {MOVIE_COLUMNS}"
        ))
        .bind(input.id)
        .bind(&input.title)
        .bind(&input.overview)
        .bind(input.year)
        .bind(input.rating)
        .bind(&input.category)
        .fetch_one(&*self.db)
        .await;

        match result {
            Ok(movie) => {
                debug!("inserted movie {}", movie.id);
                Ok(movie)
            }
            Err(err) if is_unique_violation(&err) => {
                Err(MovieError::AlreadyExists(input.id.unwrap_or_default()))
            }
            Err(err) => Err(MovieError::Sqlx(err)),
        }
    }

    /// Replace title, overview, year, rating and category of an existing row.
    ///
    /// The id never changes; `input.id` is ignored. Returns NotFound when no
    /// row matched, in which case nothing is written.
    pub async fn update(&self, id: i64, input: &MovieInput) -> MovieResult<Movie> {
        sqlx::query_as::<_, Movie>(&format!(
            "UPDATE movies
             SET title = ?, overview = ?, year = ?, rating = ?, category = ?
             WHERE id = ?
             RETURNING {MOVIE_COLUMNS}"
        ))
        .bind(&input.title)
        .bind(&input.overview)
        .bind(input.year)
        .bind(input.rating)
        .bind(&input.category)
        .bind(id)
        .fetch_optional(&*self.db)
        .await?
        .ok_or(MovieError::NotFound(id))
    }

    /// Delete by id. Returns the number of rows removed (zero or one).
    pub async fn delete(&self, id: i64) -> MovieResult<u64> {
        let result = sqlx::query("DELETE FROM movies WHERE id = ?")
            .bind(id)
            .execute(&*self.db)
            .await?;
        debug!("delete movie {} removed {} rows", id, result.rows_affected());
        Ok(result.rows_affected())
    }

    /// Row count, used by readiness and tests.
    pub async fn count(&self) -> MovieResult<i64> {
        let n = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM movies")
            .fetch_one(&*self.db)
            .await?;
        Ok(n)
    }
}

/// Return true if SQLx error indicates a unique constraint violation.
fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Database(db_err) if db_err.message().to_ascii_lowercase().contains("unique")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database;

    async fn service() -> MovieService {
        let pool = database::connect_in_memory().await.unwrap();
        database::run_migrations(&pool).await.unwrap();
        MovieService::new(pool)
    }

    fn input(title: &str, category: &str) -> MovieInput {
        MovieInput {
            id: None,
            title: title.into(),
            overview: "En un exuberante planeta llamado Pandora".into(),
            year: 2009,
            rating: 7.8,
            category: category.into(),
        }
    }

    #[tokio::test]
    async fn insert_assigns_id_and_get_returns_it() {
        let svc = service().await;
        let created = svc.insert(&input("Avatar", "Acción")).await.unwrap();
        assert!(created.id >= 1);

        let fetched = svc.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.title, "Avatar");
    }

    #[tokio::test]
    async fn insert_keeps_client_supplied_id() {
        let svc = service().await;
        let mut movie = input("Avatar 2", "Acción");
        movie.id = Some(42);
        let created = svc.insert(&movie).await.unwrap();
        assert_eq!(created.id, 42);

        let err = svc.insert(&movie).await.unwrap_err();
        assert!(matches!(err, MovieError::AlreadyExists(42)));
        assert_eq!(svc.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn get_missing_is_none() {
        let svc = service().await;
        assert!(svc.get_by_id(7).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn category_filter_is_exact_and_empty_means_all() {
        let svc = service().await;
        svc.insert(&input("Avatar", "Acción")).await.unwrap();
        svc.insert(&input("Up", "Animación")).await.unwrap();
        svc.insert(&input("Avatar 2", "Acción")).await.unwrap();

        let action = svc.list_by_category(Some("Acción")).await.unwrap();
        assert_eq!(action.len(), 2);
        assert!(action.iter().all(|m| m.category == "Acción"));

        assert!(svc.list_by_category(Some("acción")).await.unwrap().is_empty());
        assert_eq!(svc.list_by_category(Some("")).await.unwrap().len(), 3);
        assert_eq!(
            svc.list_by_category(None).await.unwrap(),
            svc.list_all().await.unwrap()
        );
    }

    #[tokio::test]
    async fn update_replaces_fields_but_not_id() {
        let svc = service().await;
        let created = svc.insert(&input("Avatar", "Acción")).await.unwrap();

        let mut replacement = input("Avatar: Director's Cut", "Ciencia ficción");
        replacement.id = Some(999);
        replacement.year = 2010;
        replacement.rating = 8.1;
        let updated = svc.update(created.id, &replacement).await.unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.title, "Avatar: Director's Cut");
        assert_eq!(updated.year, 2010);
        assert_eq!(updated.category, "Ciencia ficción");
        assert!(svc.get_by_id(999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_missing_writes_nothing() {
        let svc = service().await;
        let err = svc.update(5, &input("Ghost", "Drama")).await.unwrap_err();
        assert!(matches!(err, MovieError::NotFound(5)));
        assert_eq!(svc.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn delete_reports_rows_removed() {
        let svc = service().await;
        let created = svc.insert(&input("Avatar", "Acción")).await.unwrap();
        assert_eq!(svc.delete(created.id).await.unwrap(), 1);
        assert_eq!(svc.delete(created.id).await.unwrap(), 0);
        assert_eq!(svc.count().await.unwrap(), 0);
    }
}
