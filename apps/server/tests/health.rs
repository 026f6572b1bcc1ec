mod common;

use axum::{body::Body, http::Request};
use common::spawn_app;
use tower::ServiceExt;

#[tokio::test]
async fn healthz_works() {
    let app = spawn_app(None).await;
    let response = app
        .router
        .clone()
        .oneshot(Request::builder().uri("/api/v1/healthz").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    assert!(response.headers().contains_key("x-request-id"));

    let (status, _) = app.get("/api/v1/readyz").await;
    assert_eq!(status, 200);
}

#[tokio::test]
async fn client_request_id_is_echoed() {
    let app = spawn_app(None).await;
    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/v1/healthz")
                .header("x-request-id", "req-42")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.headers()["x-request-id"], "req-42");
}

#[tokio::test]
async fn capabilities_are_disabled_by_default() {
    let app = spawn_app(None).await;
    let (status, body) = app.get("/api/v1/capabilities").await;
    assert_eq!(status, 200);

    let entries = body.as_array().unwrap();
    assert_eq!(entries.len(), 4);
    assert!(entries.iter().all(|e| e["enabled"] == false));
    let loi = entries
        .iter()
        .find(|e| e["capability"] == "letters_of_intent")
        .unwrap();
    assert!(loi["message"]
        .as_str()
        .unwrap()
        .contains("temporarily disabled"));
}

#[tokio::test]
async fn openapi_lists_function_routes() {
    let app = spawn_app(None).await;
    let (status, body) = app.get("/openapi.json").await;
    assert_eq!(status, 200);
    assert!(body["paths"]["/functions/v1/verify-email-code"].is_object());
    assert!(body["paths"]["/functions/v1/get-mapbox-config"].is_object());
}
