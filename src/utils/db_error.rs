//! Translation of `sqlx` errors into record store errors.

use crate::domain::repositories::StoreError;

/// Name of the unique constraint guarding `links.slug`.
pub const SLUG_UNIQUE_CONSTRAINT: &str = "links_slug_key";

/// Returns true if `e` is a unique-constraint violation on the slug column.
pub fn is_unique_violation_on_slug(e: &sqlx::Error) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    if !db_err.is_unique_violation() {
        return false;
    }

    matches!(db_err.constraint(), Some(SLUG_UNIQUE_CONSTRAINT))
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        if is_unique_violation_on_slug(&e) {
            return StoreError::UniqueViolation;
        }

        StoreError::Unavailable(e.to_string())
    }
}
