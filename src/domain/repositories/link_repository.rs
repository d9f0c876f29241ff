//! Repository trait for the link record store.

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::StoreError;
use async_trait::async_trait;

/// Record store holding link records.
///
/// The store, not its callers, is the source of truth for slug uniqueness:
/// [`LinkRepository::insert`] must reject a duplicate slug with
/// [`StoreError::UniqueViolation`] even when a prior [`LinkRepository::exists`]
/// returned `false`.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::MemoryLinkRepository`] - In-process implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Returns true if a record with this exact slug exists.
    async fn exists(&self, slug: &str) -> Result<bool, StoreError>;

    /// Inserts a new record with a zero click count.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::UniqueViolation`] if the slug is already present.
    async fn insert(&self, new_link: NewLink) -> Result<(), StoreError>;

    /// Returns the stored destination for a slug, if any.
    async fn get_destination(&self, slug: &str) -> Result<Option<String>, StoreError>;

    /// Adds one to the slug's click count.
    ///
    /// Must be a relative update in the store, never a read followed by a
    /// write of a previously fetched value. Unknown slugs are not an error.
    async fn increment_clicks(&self, slug: &str) -> Result<(), StoreError>;

    /// Lists links, newest first.
    ///
    /// `owner: None` lists every link. `limit: None` returns all matches.
    async fn list(&self, owner: Option<String>, limit: Option<i64>)
    -> Result<Vec<Link>, StoreError>;

    /// Deletes a link if it exists and is owned by `owner`.
    ///
    /// Returns `Ok(false)` if nothing matched. `owner: None` skips the
    /// ownership check.
    async fn delete(&self, slug: &str, owner: Option<String>) -> Result<bool, StoreError>;

    /// Verifies the store is reachable.
    async fn ping(&self) -> Result<(), StoreError>;
}
