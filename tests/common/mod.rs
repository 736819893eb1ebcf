#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, Response, header};
use http_body_util::BodyExt;
use movie_api::config::AppConfig;
use movie_api::database;
use movie_api::state::AppState;
use tower::ServiceExt;

pub const SECRET: &str = "integration-test-secret";

/// Config matching the defaults, pointed at an in-memory database.
pub fn test_config() -> AppConfig {
    AppConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        database_url: "sqlite::memory:".to_string(),
        jwt_secret: SECRET.to_string(),
        token_ttl_secs: None,
        admin_email: "daparamo".to_string(),
        admin_password: "1234".to_string(),
        protect_writes: false,
        strict_delete: false,
    }
}

/// Build the full router over a fresh, migrated in-memory database.
pub async fn build_test_app(cfg: AppConfig) -> (Router, AppState) {
    let pool = database::connect_in_memory()
        .await
        .expect("in-memory sqlite should open");
    database::run_migrations(&pool)
        .await
        .expect("migrations should run");
    let state = AppState::new(&cfg, pool);
    (movie_api::app(state.clone()), state)
}

pub fn movie_body(title: &str, category: &str) -> serde_json::Value {
    serde_json::json!({
        "title": title,
        "overview": "En un exuberante planeta llamado Pandora viven los Na'vi",
        "year": 2009,
        "rating": 7.8,
        "category": category
    })
}

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
    token: Option<&str>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: &Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, Some(token)).await
}

pub async fn post_json(app: &Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body), None).await
}

pub async fn put_json(app: &Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(body), None).await
}

pub async fn delete(app: &Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None, None).await
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Log in with the default admin credentials and return the token.
pub async fn login(app: &Router) -> String {
    let response = post_json(
        app,
        "/login",
        serde_json::json!({ "email": "daparamo", "password": "1234" }),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::OK);
    body_json(response)
        .await
        .as_str()
        .expect("login returns a bare JSON string")
        .to_string()
}
