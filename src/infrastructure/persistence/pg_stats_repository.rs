//! PostgreSQL implementation of the statistics repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{MonthlyClicks, SlugMonthlyClicks};
use crate::domain::repositories::{StatsRepository, StoreError};

/// Grouping queries over the `links` table.
pub struct PgStatsRepository {
    pool: Arc<PgPool>,
}

impl PgStatsRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StatsRepository for PgStatsRepository {
    async fn monthly_clicks(&self, owner: Option<String>) -> Result<Vec<MonthlyClicks>, StoreError> {
        let rows = sqlx::query_as::<_, (String, i64)>(
            r#"
            SELECT to_char(created_at AT TIME ZONE 'UTC', 'YYYY-MM') AS month,
                   SUM(click_count)::BIGINT AS total_clicks
            FROM links
            WHERE ($1::TEXT IS NULL OR owner_id = $1)
            GROUP BY month
            ORDER BY month DESC
            "#,
        )
        .bind(owner)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows
            .into_iter()
            .map(|(month, total_clicks)| MonthlyClicks {
                month,
                total_clicks,
            })
            .collect())
    }

    async fn monthly_clicks_by_slug(
        &self,
        owner: Option<String>,
    ) -> Result<Vec<SlugMonthlyClicks>, StoreError> {
        let rows = sqlx::query_as::<_, (String, String, i64)>(
            r#"
            SELECT to_char(created_at AT TIME ZONE 'UTC', 'YYYY-MM') AS month,
                   slug,
                   SUM(click_count)::BIGINT AS total_clicks
            FROM links
            WHERE ($1::TEXT IS NULL OR owner_id = $1)
            GROUP BY month, slug
            ORDER BY month DESC, slug
            "#,
        )
        .bind(owner)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows
            .into_iter()
            .map(|(month, slug, total_clicks)| SlugMonthlyClicks {
                month,
                slug,
                total_clicks,
            })
            .collect())
    }
}
