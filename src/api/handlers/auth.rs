//! Handler exposing the authenticated caller.

use axum::{Extension, Json};

use crate::api::middleware::CurrentUser;
use crate::domain::entities::Principal;
use crate::error::AppError;

/// Returns the principal behind the bearer token.
///
/// # Endpoint
///
/// `GET /api/auth/me`
///
/// # Errors
///
/// Returns 401 Unauthorized when authentication is disabled, since there is
/// no principal to report.
pub async fn me_handler(
    Extension(CurrentUser(principal)): Extension<CurrentUser>,
) -> Result<Json<Principal>, AppError> {
    principal
        .map(Json)
        .ok_or_else(|| AppError::unauthorized("Authentication is disabled"))
}
