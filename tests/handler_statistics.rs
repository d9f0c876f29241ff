mod common;

use axum::http::StatusCode;
use chrono::{TimeZone, Utc};
use serde_json::{Value, json};

fn seed(app: &common::TestApp) {
    let sep = Utc.with_ymd_and_hms(2026, 9, 10, 8, 0, 0).unwrap();
    let oct = Utc.with_ymd_and_hms(2026, 10, 2, 8, 0, 0).unwrap();

    for link in [
        common::stored_link("sep1", "http://a.com", Some("user-1"), 3, sep),
        common::stored_link("oct1", "http://b.com", Some("user-1"), 5, oct),
        common::stored_link("oct2", "http://c.com", Some("user-1"), 2, oct),
        common::stored_link("other", "http://d.com", Some("user-2"), 100, oct),
    ] {
        app.store.seed(link).unwrap();
    }
}

#[tokio::test]
async fn test_statistics_for_owner() {
    let app = common::create_test_app();
    seed(&app);

    let server = app.server();
    let response = server
        .get("/api/statistics")
        .add_header("Authorization", common::bearer("user-1"))
        .await;

    response.assert_status_ok();

    let body = response.json::<Value>();
    assert_eq!(body["total_links"], 3);
    assert_eq!(body["total_clicks"], 10);
    assert_eq!(
        body["monthly"],
        json!([
            { "month": "2026-10", "total_clicks": 7 },
            { "month": "2026-09", "total_clicks": 3 },
        ])
    );
    assert_eq!(
        body["per_slug"],
        json!([
            { "month": "2026-10", "slug": "oct1", "total_clicks": 5 },
            { "month": "2026-10", "slug": "oct2", "total_clicks": 2 },
            { "month": "2026-09", "slug": "sep1", "total_clicks": 3 },
        ])
    );
}

#[tokio::test]
async fn test_statistics_empty() {
    let app = common::create_test_app();
    let server = app.server();

    let body = server
        .get("/api/statistics")
        .add_header("Authorization", common::bearer("nobody"))
        .await
        .json::<Value>();

    assert_eq!(body["total_links"], 0);
    assert_eq!(body["total_clicks"], 0);
    assert_eq!(body["monthly"], json!([]));
}

#[tokio::test]
async fn test_statistics_without_auth_cover_all_links() {
    let app = common::create_open_test_app();
    seed(&app);

    let server = app.server();
    let body = server.get("/api/statistics").await.json::<Value>();

    assert_eq!(body["total_links"], 4);
    assert_eq!(body["total_clicks"], 110);
}

#[tokio::test]
async fn test_statistics_require_token() {
    let app = common::create_test_app();
    let server = app.server();

    server
        .get("/api/statistics")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}
