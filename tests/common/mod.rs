//! Shared test utilities

use std::collections::HashMap;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use tower::ServiceExt;

use transnow::api::ApiServer;
use transnow::translate::{MockMode, MockTranslate};

/// Build a router over the given mock provider
pub fn build_test_router(provider: Arc<MockTranslate>) -> Router {
    ApiServer::new(provider, 0).router()
}

/// A suffix-mode mock provider
pub fn suffix_provider() -> Arc<MockTranslate> {
    Arc::new(MockTranslate::new(MockMode::Suffix))
}

/// A mock provider with the canonical "hello" → "hola" mapping
pub fn hola_provider() -> Arc<MockTranslate> {
    let mut map = HashMap::new();
    map.insert(("hello".to_string(), "es".to_string()), "hola".to_string());
    Arc::new(MockTranslate::new(MockMode::Mappings(map)))
}

/// POST a JSON body and return (status, parsed response body)
pub async fn post_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap();

    (status, json)
}

/// POST a raw body with an arbitrary content type and return
/// (status, parsed response body)
pub async fn post_raw(
    app: Router,
    uri: &str,
    content_type: &str,
    body: &str,
) -> (StatusCode, serde_json::Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, content_type)
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap();

    (status, json)
}

/// GET a path and return (status, parsed response body)
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap();

    (status, json)
}
