//! HTTP-level tests for the OpenAPI document.

mod common;

use axum::http::StatusCode;
use common::{body_json, get};

#[tokio::test]
async fn openapi_document_is_served() {
    let (app, _) = common::build_test_app(common::test_config()).await;

    let response = get(&app, "/openapi.json").await;
    assert_eq!(response.status(), StatusCode::OK);
    let doc = body_json(response).await;

    assert_eq!(doc["info"]["title"], "First Api on FastApi");
    assert_eq!(doc["info"]["version"], "1.0.0");

    let paths = doc["paths"].as_object().expect("paths object");
    for path in ["/login", "/movies", "/movies/", "/movies/{id}"] {
        assert!(paths.contains_key(path), "missing {path}");
    }
    assert_eq!(doc["paths"]["/login"]["post"]["tags"][0], "Auth");
    assert_eq!(doc["paths"]["/movies/{id}"]["delete"]["tags"][0], "Movies");

    let tags: Vec<&str> = doc["tags"]
        .as_array()
        .expect("tags array")
        .iter()
        .filter_map(|t| t["name"].as_str())
        .collect();
    assert_eq!(tags, ["Auth", "Movies"]);

    let movie = &doc["components"]["schemas"]["Movie"];
    let example = if movie["example"].is_object() {
        &movie["example"]
    } else {
        &movie["examples"][0]
    };
    assert_eq!(example["title"], "The Shawshank Redemption");
    assert_eq!(example["year"], 1994);
}
