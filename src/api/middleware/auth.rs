//! Bearer token authentication middleware.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;

use crate::domain::entities::Principal;
use crate::{error::AppError, state::AppState};

/// Caller identity attached to every authenticated API request.
///
/// Holds `None` only when authentication is disabled, in which case owner
/// filters match every link.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Option<Principal>);

impl CurrentUser {
    /// Owner id used to scope store queries.
    pub fn owner(&self) -> Option<&str> {
        self.0.as_ref().map(|principal| principal.id.as_str())
    }
}

/// Authenticates requests using Bearer tokens from Authorization header.
///
/// # Header Format
///
/// ```text
/// Authorization: Bearer <token>
/// ```
///
/// # Authentication Flow
///
/// 1. Extract token from `Authorization` header
/// 2. Verify it with the configured [`IdentityProvider`]
/// 3. Attach the resulting [`CurrentUser`] as a request extension
/// 4. Continue to next middleware/handler
///
/// Without a provider the request passes through as `CurrentUser(None)`.
///
/// # Errors
///
/// Returns `401 Unauthorized` if:
/// - Authorization header is missing
/// - Token format is invalid
/// - Token is expired, badly signed or has no subject
///
/// Adds `WWW-Authenticate: Bearer` header to 401 responses per RFC 6750.
///
/// [`IdentityProvider`]: crate::application::services::IdentityProvider
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(identity) = st.identity.clone() else {
        let mut req = req;
        req.extensions_mut().insert(CurrentUser(None));
        return Ok(next.run(req).await);
    };

    let (mut parts, body) = req.into_parts();

    let AuthBearer(token) = AuthBearer::from_request_parts(&mut parts, &())
        .await
        .map_err(|_| AppError::unauthorized("Authorization header is missing or invalid"))?;

    let principal = identity.authenticate(&token).await?;

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(CurrentUser(Some(principal)));

    Ok(next.run(req).await)
}
