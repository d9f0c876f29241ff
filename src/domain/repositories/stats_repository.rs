//! Repository trait for read-side click statistics.

use crate::domain::entities::{MonthlyClicks, SlugMonthlyClicks};
use crate::domain::repositories::StoreError;
use async_trait::async_trait;

/// Grouping queries over stored link records.
///
/// Months are the links' creation months formatted as `YYYY-MM`; results
/// are ordered newest month first. `owner: None` aggregates every link.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StatsRepository: Send + Sync {
    /// Sums click counts per creation month.
    async fn monthly_clicks(&self, owner: Option<String>) -> Result<Vec<MonthlyClicks>, StoreError>;

    /// Sums click counts per creation month and slug.
    ///
    /// Within a month, rows are ordered by slug.
    async fn monthly_clicks_by_slug(
        &self,
        owner: Option<String>,
    ) -> Result<Vec<SlugMonthlyClicks>, StoreError>;
}
