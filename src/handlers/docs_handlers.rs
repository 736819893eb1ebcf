//! OpenAPI document for the public endpoints, served at `/openapi.json`.

use axum::Json;
use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};

use crate::{
    handlers::{auth_handlers, movie_handlers},
    models::{
        credentials::Credentials,
        movie::{Movie, MovieInput},
    },
};

#[derive(OpenApi)]
#[openapi(
    info(title = "First Api on FastApi", version = "1.0.0"),
    paths(
        auth_handlers::login,
        movie_handlers::list_movies,
        movie_handlers::get_movie,
        movie_handlers::list_movies_by_category,
        movie_handlers::create_movie,
        movie_handlers::update_movie,
        movie_handlers::delete_movie,
    ),
    components(schemas(Movie, MovieInput, Credentials, movie_handlers::CreatedMovie)),
    modifiers(&BearerAuth),
    tags(
        (name = "Auth", description = "Token issuance"),
        (name = "Movies", description = "Movie catalogue"),
    )
)]
pub struct ApiDoc;

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// GET `/openapi.json`
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
