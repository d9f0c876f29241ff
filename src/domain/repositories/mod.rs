//! Repository trait definitions for the domain layer.
//!
//! These traits are the record store contract the core depends on.
//! Concrete stores live in `crate::infrastructure::persistence`; mocks are
//! generated with `mockall` for unit tests.
//!
//! - [`LinkRepository`] - Existence checks, inserts, lookups and relative click increments
//! - [`StatsRepository`] - Monthly click aggregation

use std::future::Future;
use std::time::Duration;

pub mod link_repository;
pub mod stats_repository;

pub use link_repository::LinkRepository;
pub use stats_repository::StatsRepository;

#[cfg(test)]
pub use link_repository::MockLinkRepository;
#[cfg(test)]
pub use stats_repository::MockStatsRepository;

/// Failure reported by a record store.
///
/// Uniqueness violations are reported separately because the allocator
/// reacts to them (conflict or retry); every other failure is opaque.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("slug already exists in the store")]
    UniqueViolation,

    #[error("{0}")]
    Unavailable(String),
}

impl StoreError {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable(reason.into())
    }
}

/// Runs one store call under `deadline`.
///
/// An elapsed deadline is reported as [`StoreError::Unavailable`], so callers
/// treat a hung store like an unreachable one.
pub async fn with_deadline<T>(
    deadline: Duration,
    call: impl Future<Output = Result<T, StoreError>>,
) -> Result<T, StoreError> {
    match tokio::time::timeout(deadline, call).await {
        Ok(result) => result,
        Err(_) => Err(StoreError::unavailable(format!(
            "store call timed out after {deadline:?}"
        ))),
    }
}

/// Store whose calls never complete.
#[cfg(test)]
pub(crate) struct HangingStore;

#[cfg(test)]
#[async_trait::async_trait]
impl LinkRepository for HangingStore {
    async fn exists(&self, _slug: &str) -> Result<bool, StoreError> {
        std::future::pending().await
    }
    async fn insert(&self, _new_link: crate::domain::entities::NewLink) -> Result<(), StoreError> {
        std::future::pending().await
    }
    async fn get_destination(&self, _slug: &str) -> Result<Option<String>, StoreError> {
        std::future::pending().await
    }
    async fn increment_clicks(&self, _slug: &str) -> Result<(), StoreError> {
        std::future::pending().await
    }
    async fn list(
        &self,
        _owner: Option<String>,
        _limit: Option<i64>,
    ) -> Result<Vec<crate::domain::entities::Link>, StoreError> {
        std::future::pending().await
    }
    async fn delete(&self, _slug: &str, _owner: Option<String>) -> Result<bool, StoreError> {
        std::future::pending().await
    }
    async fn ping(&self) -> Result<(), StoreError> {
        std::future::pending().await
    }
}

#[cfg(test)]
#[async_trait::async_trait]
impl StatsRepository for HangingStore {
    async fn monthly_clicks(
        &self,
        _owner: Option<String>,
    ) -> Result<Vec<crate::domain::entities::MonthlyClicks>, StoreError> {
        std::future::pending().await
    }
    async fn monthly_clicks_by_slug(
        &self,
        _owner: Option<String>,
    ) -> Result<Vec<crate::domain::entities::SlugMonthlyClicks>, StoreError> {
        std::future::pending().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_with_deadline_passes_result_through() {
        let result = with_deadline(Duration::from_secs(1), async { Ok::<_, StoreError>(7) }).await;
        assert_eq!(result, Ok(7));

        let failed = with_deadline(Duration::from_secs(1), async {
            Err::<(), _>(StoreError::UniqueViolation)
        })
        .await;
        assert_eq!(failed, Err(StoreError::UniqueViolation));
    }

    #[tokio::test]
    async fn test_with_deadline_elapsed_is_unavailable() {
        let result = with_deadline(Duration::from_millis(10), HangingStore.exists("abc123")).await;
        assert!(matches!(result, Err(StoreError::Unavailable(_))));
    }
}
