mod common;

use axum::http::StatusCode;
use chrono::{Duration, TimeZone, Utc};
use serde_json::{Value, json};

#[tokio::test]
async fn test_create_link_with_generated_slug() {
    let app = common::create_test_app();
    let server = app.server();

    let response = server
        .post("/api/links")
        .add_header("Authorization", common::bearer("user-1"))
        .json(&json!({ "url": "example.com" }))
        .await;

    response.assert_status(StatusCode::CREATED);

    let body = response.json::<Value>();
    let slug = body["slug"].as_str().unwrap();
    assert_eq!(slug.len(), 6);
    assert!(slug.chars().all(|c| c.is_ascii_alphanumeric()));
    assert_eq!(body["destination"], "http://example.com");
    assert_eq!(body["short_url"], format!("{}/{}", common::BASE_URL, slug));

    let stored = app.store.get(slug).unwrap().unwrap();
    assert_eq!(stored.owner.as_deref(), Some("user-1"));
    assert_eq!(stored.click_count, 0);
}

#[tokio::test]
async fn test_create_link_with_chosen_slug() {
    let app = common::create_test_app();
    let server = app.server();

    let response = server
        .post("/api/links")
        .add_header("Authorization", common::bearer("user-1"))
        .json(&json!({ "url": "https://example.com/landing", "slug": "  promo2024 " }))
        .await;

    response.assert_status(StatusCode::CREATED);

    let body = response.json::<Value>();
    assert_eq!(body["slug"], "promo2024");
    assert_eq!(body["destination"], "https://example.com/landing");
}

#[tokio::test]
async fn test_create_link_blank_slug_generates_one() {
    let app = common::create_test_app();
    let server = app.server();

    let response = server
        .post("/api/links")
        .add_header("Authorization", common::bearer("user-1"))
        .json(&json!({ "url": "example.com", "slug": "   " }))
        .await;

    response.assert_status(StatusCode::CREATED);
    assert_eq!(response.json::<Value>()["slug"].as_str().unwrap().len(), 6);
}

#[tokio::test]
async fn test_create_link_taken_slug_conflicts() {
    let app = common::create_test_app();
    let server = app.server();

    server
        .post("/api/links")
        .add_header("Authorization", common::bearer("user-1"))
        .json(&json!({ "url": "first.com", "slug": "promo" }))
        .await
        .assert_status(StatusCode::CREATED);

    let response = server
        .post("/api/links")
        .add_header("Authorization", common::bearer("user-2"))
        .json(&json!({ "url": "second.com", "slug": "promo" }))
        .await;

    response.assert_status(StatusCode::CONFLICT);
    assert_eq!(response.json::<Value>()["error"]["code"], "slug_taken");

    let stored = app.store.get("promo").unwrap().unwrap();
    assert_eq!(stored.destination, "http://first.com");
    assert_eq!(stored.owner.as_deref(), Some("user-1"));
}

#[tokio::test]
async fn test_create_link_rejects_bad_input() {
    let app = common::create_test_app();
    let server = app.server();

    let cases = [
        (json!({ "url": "   " }), "empty_input"),
        (json!({ "url": "ftp://files.example.com" }), "invalid_url"),
        (json!({ "url": "not a url" }), "invalid_url"),
        (json!({ "url": "example.com", "slug": "ab" }), "invalid_slug_format"),
        (json!({ "url": "example.com", "slug": "my-link" }), "invalid_slug_format"),
        (json!({ "url": "example.com", "slug": "a".repeat(70) }), "invalid_slug_format"),
    ];

    for (body, code) in cases {
        let response = server
            .post("/api/links")
            .add_header("Authorization", common::bearer("user-1"))
            .json(&body)
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["error"]["code"], code, "{body}");
    }

    assert!(app.store.is_empty().unwrap());
}

#[tokio::test]
async fn test_create_link_accepts_long_url() {
    let app = common::create_test_app();
    let server = app.server();
    let long_url = format!("https://example.com/{}", "a".repeat(2100));

    let response = server
        .post("/api/links")
        .add_header("Authorization", common::bearer("user-1"))
        .json(&json!({ "url": long_url, "slug": "longone" }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let stored = app.store.get("longone").unwrap().unwrap();
    assert_eq!(stored.destination, long_url);
}

#[tokio::test]
async fn test_create_link_requires_token() {
    let app = common::create_test_app();
    let server = app.server();

    let response = server
        .post("/api/links")
        .json(&json!({ "url": "example.com" }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(response.header("www-authenticate"), "Bearer");

    let response = server
        .post("/api/links")
        .add_header("Authorization", "Bearer not-a-jwt")
        .json(&json!({ "url": "example.com" }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    assert!(app.store.is_empty().unwrap());
}

#[tokio::test]
async fn test_create_link_without_auth_has_no_owner() {
    let app = common::create_open_test_app();
    let server = app.server();

    let response = server
        .post("/api/links")
        .json(&json!({ "url": "example.com", "slug": "open" }))
        .await;

    response.assert_status(StatusCode::CREATED);
    assert_eq!(app.store.get("open").unwrap().unwrap().owner, None);
}

#[tokio::test]
async fn test_list_links_scoped_to_owner() {
    let app = common::create_test_app();
    let now = Utc::now();
    app.store
        .seed(common::stored_link("mine1", "http://a.com", Some("user-1"), 2, now))
        .unwrap();
    app.store
        .seed(common::stored_link("theirs", "http://b.com", Some("user-2"), 9, now))
        .unwrap();

    let server = app.server();
    let response = server
        .get("/api/links")
        .add_header("Authorization", common::bearer("user-1"))
        .await;

    response.assert_status_ok();

    let body = response.json::<Value>();
    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["slug"], "mine1");
    assert_eq!(items[0]["click_count"], 2);
    assert_eq!(items[0]["short_url"], "https://s.example.com/mine1");
}

#[tokio::test]
async fn test_list_recent_links_newest_first() {
    let app = common::create_test_app();
    let base = Utc.with_ymd_and_hms(2026, 10, 1, 12, 0, 0).unwrap();
    for i in 0..6 {
        app.store
            .seed(common::stored_link(
                &format!("link{i}"),
                "http://example.com",
                Some("user-1"),
                0,
                base + Duration::minutes(i),
            ))
            .unwrap();
    }

    let server = app.server();
    let response = server
        .get("/api/links")
        .add_query_param("recent", "true")
        .add_header("Authorization", common::bearer("user-1"))
        .await;

    response.assert_status_ok();

    let body = response.json::<Value>();
    let slugs: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["slug"].as_str().unwrap())
        .collect();
    assert_eq!(slugs, ["link5", "link4", "link3", "link2"]);

    let all = server
        .get("/api/links")
        .add_header("Authorization", common::bearer("user-1"))
        .await
        .json::<Value>();
    assert_eq!(all.as_array().unwrap().len(), 6);
}

#[tokio::test]
async fn test_delete_own_link() {
    let app = common::create_test_app();
    app.store
        .seed(common::stored_link("del001", "http://a.com", Some("user-1"), 0, Utc::now()))
        .unwrap();

    let server = app.server();

    server
        .delete("/api/links/del001")
        .add_header("Authorization", common::bearer("user-1"))
        .await
        .assert_status(StatusCode::NO_CONTENT);

    assert!(app.store.get("del001").unwrap().is_none());

    // Second delete returns 404
    server
        .delete("/api/links/del001")
        .add_header("Authorization", common::bearer("user-1"))
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn test_delete_foreign_link_is_not_found() {
    let app = common::create_test_app();
    app.store
        .seed(common::stored_link("del002", "http://a.com", Some("user-1"), 0, Utc::now()))
        .unwrap();

    let server = app.server();
    let response = server
        .delete("/api/links/del002")
        .add_header("Authorization", common::bearer("user-2"))
        .await;

    response.assert_status_not_found();
    assert_eq!(response.json::<Value>()["error"]["code"], "not_found");
    assert!(app.store.get("del002").unwrap().is_some());
}

#[tokio::test]
async fn test_me_returns_principal() {
    let app = common::create_test_app();
    let server = app.server();

    let response = server
        .get("/api/auth/me")
        .add_header("Authorization", common::bearer("user-1"))
        .await;

    response.assert_status_ok();

    let body = response.json::<Value>();
    assert_eq!(body["id"], "user-1");
    assert_eq!(body["email"], "user-1@example.com");
    assert!(body.get("name").is_none());
}

#[tokio::test]
async fn test_me_without_auth_is_unauthorized() {
    let app = common::create_open_test_app();
    let server = app.server();

    server
        .get("/api/auth/me")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}
