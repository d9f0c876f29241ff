//! Monthly click statistics.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::entities::{MonthlyClicks, SlugMonthlyClicks};
use crate::domain::repositories::{StatsRepository, with_deadline};
use crate::error::AppError;

/// Statistics for one owner (or for every link when auth is disabled).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatisticsReport {
    /// Click totals per creation month, newest first.
    pub monthly: Vec<MonthlyClicks>,
    /// Click totals per creation month and slug, newest month first.
    pub per_slug: Vec<SlugMonthlyClicks>,
    /// Number of distinct slugs.
    pub total_links: usize,
    pub total_clicks: i64,
}

/// Read-only aggregation over stored click counts.
pub struct StatsService<R: StatsRepository + ?Sized> {
    repository: Arc<R>,
    store_timeout: Duration,
}

impl<R: StatsRepository + ?Sized> StatsService<R> {
    /// Creates a new statistics service; each store query is bounded by
    /// `store_timeout`.
    pub fn new(repository: Arc<R>, store_timeout: Duration) -> Self {
        Self {
            repository,
            store_timeout,
        }
    }

    /// Builds the statistics report for `owner`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] on store failures or timeouts.
    pub async fn report(&self, owner: Option<&str>) -> Result<StatisticsReport, AppError> {
        let owner = owner.map(str::to_string);

        let monthly = with_deadline(
            self.store_timeout,
            self.repository.monthly_clicks(owner.clone()),
        )
        .await?;
        let per_slug = with_deadline(
            self.store_timeout,
            self.repository.monthly_clicks_by_slug(owner),
        )
        .await?;

        let total_links = per_slug
            .iter()
            .map(|row| row.slug.as_str())
            .collect::<HashSet<_>>()
            .len();
        let total_clicks = monthly.iter().map(|row| row.total_clicks).sum();

        Ok(StatisticsReport {
            monthly,
            per_slug,
            total_links,
            total_clicks,
        })
    }
}
