//! API route configuration.
//!
//! All API endpoints sit behind [`crate::api::middleware::auth`].

use crate::api::handlers::{
    create_link_handler, delete_link_handler, list_links_handler, me_handler, statistics_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get},
};

/// All API routes, protected by Bearer token authentication.
///
/// # Endpoints
///
/// - `GET    /links`          - Caller's links, newest first (`?recent=true` for the latest four)
/// - `POST   /links`          - Create a short link
/// - `DELETE /links/{slug}`   - Delete one of the caller's links
/// - `GET    /statistics`     - Monthly click totals
/// - `GET    /auth/me`        - Authenticated principal
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/links", get(list_links_handler).post(create_link_handler))
        .route("/links/{slug}", delete(delete_link_handler))
        .route("/statistics", get(statistics_handler))
        .route("/auth/me", get(me_handler))
}
