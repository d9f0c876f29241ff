//! Handlers for link management endpoints (create, list, delete).

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

use crate::api::dto::links::{CreateLinkRequest, CreateLinkResponse, LinkResponse, ListLinksQuery};
use crate::api::middleware::CurrentUser;
use crate::application::services::short_url;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link owned by the caller.
///
/// # Endpoint
///
/// `POST /api/links`
///
/// # Request Body
///
/// ```json
/// { "url": "example.com/landing", "slug": "promo2024" }
/// ```
///
/// `slug` is optional; omitted or blank means a random slug is generated.
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// {
///   "slug": "promo2024",
///   "short_url": "https://s.example.com/promo2024",
///   "destination": "http://example.com/landing"
/// }
/// ```
///
/// # Errors
///
/// - 400 Bad Request for an empty or invalid URL, or a malformed slug
/// - 409 Conflict if the chosen slug is already taken
/// - 503 Service Unavailable if no slug could be allocated or the store is down
pub async fn create_link_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<CreateLinkRequest>,
) -> Result<(StatusCode, Json<CreateLinkResponse>), AppError> {
    let link = state
        .link_service
        .create_link(&payload.url, payload.slug.as_deref(), user.owner())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateLinkResponse {
            short_url: short_url(&state.base_url, &link.slug),
            slug: link.slug,
            destination: link.destination,
        }),
    ))
}

/// Lists the caller's links, newest first.
///
/// # Endpoint
///
/// `GET /api/links?recent=true`
///
/// With `recent=true` only the four most recent links are returned.
pub async fn list_links_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(query): Query<ListLinksQuery>,
) -> Result<Json<Vec<LinkResponse>>, AppError> {
    let links = state
        .link_service
        .list_links(user.owner(), query.limit())
        .await?;

    Ok(Json(
        links
            .into_iter()
            .map(|link| LinkResponse::from_link(link, &state.base_url))
            .collect(),
    ))
}

/// Deletes one of the caller's links.
///
/// # Endpoint
///
/// `DELETE /api/links/{slug}`
///
/// # Errors
///
/// Returns 404 Not Found if the slug doesn't exist or belongs to another owner.
pub async fn delete_link_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(slug): Path<String>,
) -> Result<StatusCode, AppError> {
    state.link_service.delete_link(&slug, user.owner()).await?;

    Ok(StatusCode::NO_CONTENT)
}
