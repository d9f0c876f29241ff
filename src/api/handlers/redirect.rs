//! Handler for short link redirect.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a slug to its destination.
///
/// # Endpoint
///
/// `GET /{slug}`
///
/// Responds with `302 Found` and a `Location` header. The click is counted
/// asynchronously; a full click queue never delays or fails the redirect.
///
/// # Errors
///
/// - 404 Not Found if the slug doesn't exist
/// - 503 Service Unavailable if the store cannot be reached
pub async fn redirect_handler(
    Path(slug): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let destination = state.link_service.resolve(&slug).await?;

    Ok((StatusCode::FOUND, [(header::LOCATION, destination)]))
}
