//! Identity verification for API requests.

use async_trait::async_trait;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::entities::Principal;
use crate::error::AppError;

/// Turns a bearer credential into an authenticated principal.
///
/// Implementations are opaque to the rest of the service: handlers only see
/// the resulting [`Principal`] or an [`AppError::Unauthorized`].
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Verifies `token` and returns the principal it identifies.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the token is malformed, expired,
    /// badly signed or lacks a subject.
    async fn authenticate(&self, token: &str) -> Result<Principal, AppError>;
}

/// Claims carried by access tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Verifies HS256-signed JWTs with a shared secret.
///
/// The token subject becomes the principal id; `email` and `name` claims
/// are passed through when present.
pub struct JwtIdentityProvider {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtIdentityProvider {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }
}

#[async_trait]
impl IdentityProvider for JwtIdentityProvider {
    async fn authenticate(&self, token: &str) -> Result<Principal, AppError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            debug!(error = %e, "Rejected access token");
            AppError::unauthorized("Invalid or expired token")
        })?;

        let claims = data.claims;
        if claims.sub.trim().is_empty() {
            return Err(AppError::unauthorized("Token has no subject"));
        }

        Ok(Principal {
            id: claims.sub,
            email: claims.email,
            name: claims.name,
        })
    }
}
