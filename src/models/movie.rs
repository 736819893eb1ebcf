//! Represents a movie record in the catalogue.

use super::validation::{FieldViolation, Validate, Violations};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

pub const TITLE_MAX_LEN: usize = 50;
pub const OVERVIEW_MIN_LEN: usize = 15;
pub const OVERVIEW_MAX_LEN: usize = 500;
pub const YEAR_MIN: i64 = 1800;
pub const YEAR_MAX: i64 = 2024;
pub const RATING_MAX: f64 = 10.0;
pub const CATEGORY_MIN_LEN: usize = 5;
pub const CATEGORY_MAX_LEN: usize = 500;

/// Inclusive bounds accepted by `GET /movies/{id}`.
pub const LOOKUP_ID_MIN: i64 = 1;
pub const LOOKUP_ID_MAX: i64 = 2000;

/// A stored movie row.
#[derive(Serialize, Deserialize, Clone, FromRow, Debug, PartialEq, ToSchema)]
#[schema(example = json!({
    "id": 1,
    "title": "The Shawshank Redemption",
    "overview": "Two imprisoned men bond over a number of years",
    "year": 1994,
    "rating": 9.2,
    "category": "Drama"
}))]
pub struct Movie {
    /// Integer primary key.
    pub id: i64,

    /// Display title.
    pub title: String,

    /// Short synopsis.
    pub overview: String,

    /// Release year.
    pub year: i64,

    /// Score in the range (0, 10].
    pub rating: f64,

    /// Free-form genre label; list filtering matches it exactly.
    pub category: String,
}

/// Request body for create and update.
///
/// On create `id` is optional and, when present, is stored as-is.
/// On update `id` is ignored: the path parameter identifies the row.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
#[schema(example = json!({
    "id": 0,
    "title": "The Shawshank Redemption",
    "overview": "Two imprisoned men bond over a number of years",
    "year": 1994,
    "rating": 9.2,
    "category": "Drama"
}))]
pub struct MovieInput {
    #[serde(default)]
    pub id: Option<i64>,
    pub title: String,
    pub overview: String,
    pub year: i64,
    pub rating: f64,
    pub category: String,
}

impl Validate for MovieInput {
    fn validate(&self) -> Result<(), Vec<FieldViolation>> {
        let mut v = Violations::new();
        v.length("title", &self.title, 0, TITLE_MAX_LEN);
        v.length("overview", &self.overview, OVERVIEW_MIN_LEN, OVERVIEW_MAX_LEN);
        v.int_range("year", self.year, YEAR_MIN, YEAR_MAX);
        // written so that NaN fails as well
        if !(self.rating > 0.0 && self.rating <= RATING_MAX) {
            v.push(
                "rating",
                format!("must be greater than 0 and at most {} (got {})", RATING_MAX, self.rating),
            );
        }
        v.length("category", &self.category, CATEGORY_MIN_LEN, CATEGORY_MAX_LEN);
        v.into_result()
    }
}

/// Range check for the id accepted by the single-movie lookup.
pub fn check_lookup_id(id: i64) -> Result<(), Vec<FieldViolation>> {
    let mut v = Violations::new();
    v.int_range("id", id, LOOKUP_ID_MIN, LOOKUP_ID_MAX);
    v.into_result()
}
