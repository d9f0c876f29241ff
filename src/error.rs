//! Application error taxonomy and its HTTP representation.
//!
//! Every operation of the core returns an [`AppError`]. Handlers return it
//! unchanged and the [`IntoResponse`] impl maps each kind to a status code
//! and a JSON body of the form:
//!
//! ```json
//! { "error": { "code": "slug_taken", "message": "...", "details": { } } }
//! ```

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

use crate::domain::repositories::StoreError;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Serializable error payload shared by all error responses.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("URL must not be empty")]
    EmptyInput,

    #[error("Invalid URL: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Slug must be 3-20 alphanumeric characters")]
    InvalidSlugFormat { slug: String },

    #[error("Slug '{slug}' is already taken")]
    SlugTaken { slug: String },

    #[error("Failed to allocate a unique slug after {attempts} attempts")]
    AllocationExhausted { attempts: usize },

    #[error("Short link not found")]
    NotFound { slug: String },

    #[error("Record store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),
}

impl AppError {
    pub fn unauthorized(reason: impl Into<String>) -> Self {
        Self::Unauthorized(reason.into())
    }

    /// Machine-readable error code used in response bodies.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::EmptyInput => "empty_input",
            AppError::InvalidUrl { .. } => "invalid_url",
            AppError::InvalidSlugFormat { .. } => "invalid_slug_format",
            AppError::SlugTaken { .. } => "slug_taken",
            AppError::AllocationExhausted { .. } => "allocation_exhausted",
            AppError::NotFound { .. } => "not_found",
            AppError::StoreUnavailable(_) => "store_unavailable",
            AppError::Unauthorized(_) => "unauthorized",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::EmptyInput
            | AppError::InvalidUrl { .. }
            | AppError::InvalidSlugFormat { .. } => StatusCode::BAD_REQUEST,
            AppError::SlugTaken { .. } => StatusCode::CONFLICT,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::AllocationExhausted { .. } | AppError::StoreUnavailable(_) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
        }
    }

    /// Returns true for operational failures a caller may retry with backoff.
    ///
    /// Caller errors (bad input, taken slug, unknown slug) are never transient.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            AppError::AllocationExhausted { .. } | AppError::StoreUnavailable(_)
        )
    }

    pub fn to_error_info(&self) -> ErrorInfo {
        let details = match self {
            AppError::InvalidUrl { url, reason } => json!({ "url": url, "reason": reason }),
            AppError::InvalidSlugFormat { slug } => {
                json!({ "slug": slug, "pattern": "^[a-zA-Z0-9]{3,20}$" })
            }
            AppError::SlugTaken { slug } | AppError::NotFound { slug } => json!({ "slug": slug }),
            AppError::AllocationExhausted { attempts } => json!({ "attempts": attempts }),
            // Store internals are logged, not echoed to clients.
            AppError::EmptyInput | AppError::StoreUnavailable(_) | AppError::Unauthorized(_) => {
                json!({})
            }
        };

        let message = match self {
            AppError::StoreUnavailable(_) => "Record store unavailable".to_string(),
            other => other.to_string(),
        };

        ErrorInfo {
            code: self.code(),
            message,
            details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if let AppError::StoreUnavailable(reason) = &self {
            tracing::error!(error = %reason, "Store failure while handling request");
        }

        let body = ErrorBody {
            error: self.to_error_info(),
        };

        if status == StatusCode::UNAUTHORIZED {
            return (status, [(header::WWW_AUTHENTICATE, "Bearer")], Json(body)).into_response();
        }

        (status, Json(body)).into_response()
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        AppError::StoreUnavailable(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_caller_errors_map_to_4xx() {
        assert_eq!(AppError::EmptyInput.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::InvalidSlugFormat {
                slug: "ab".to_string()
            }
            .status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::SlugTaken {
                slug: "abc".to_string()
            }
            .status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::NotFound {
                slug: "abc".to_string()
            }
            .status(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_transient_errors() {
        assert!(AppError::StoreUnavailable("down".to_string()).is_transient());
        assert!(AppError::AllocationExhausted { attempts: 10 }.is_transient());
        assert!(!AppError::EmptyInput.is_transient());
        assert!(
            !AppError::SlugTaken {
                slug: "abc".to_string()
            }
            .is_transient()
        );
    }

    #[test]
    fn test_store_error_details_are_hidden() {
        let info = AppError::StoreUnavailable("password authentication failed".to_string())
            .to_error_info();

        assert_eq!(info.code, "store_unavailable");
        assert!(!info.message.contains("password"));
        assert_eq!(info.details, json!({}));
    }

    #[test]
    fn test_unique_violation_converts_to_store_unavailable() {
        let err: AppError = StoreError::UniqueViolation.into();
        assert!(matches!(err, AppError::StoreUnavailable(_)));
    }

    #[test]
    fn test_unauthorized_sets_www_authenticate() {
        let response = AppError::unauthorized("missing token").into_response();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            "Bearer"
        );
    }
}
