mod common;

use axum::http::StatusCode;
use serde_json::Value;

#[tokio::test]
async fn test_health_endpoint_success() {
    let app = common::create_test_app();
    let server = app.server();

    let response = server.get("/health").await;

    response.assert_status_ok();

    let json = response.json::<Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["store"]["status"], "ok");
    assert_eq!(json["checks"]["click_queue"]["status"], "ok");
    assert!(json.get("version").is_some());
}

#[tokio::test]
async fn test_health_is_public() {
    let app = common::create_test_app();
    let server = app.server();

    // No Authorization header
    server.get("/health").await.assert_status_ok();
}

#[tokio::test]
async fn test_health_degraded_when_worker_stopped() {
    let mut app = common::create_test_app();
    app.worker.abort();
    let _ = (&mut app.worker).await;

    let server = app.server();
    let response = server.get("/health").await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);

    let json = response.json::<Value>();
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["checks"]["click_queue"]["status"], "error");
}
