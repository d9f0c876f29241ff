//! DTOs for the statistics endpoint.

use serde::{Deserialize, Serialize};

use crate::application::services::StatisticsReport;

/// Click totals for one creation month.
#[derive(Debug, Serialize, Deserialize)]
pub struct MonthlyClicksItem {
    pub month: String,
    pub total_clicks: i64,
}

/// Click totals for one slug within a creation month.
#[derive(Debug, Serialize, Deserialize)]
pub struct SlugMonthlyClicksItem {
    pub month: String,
    pub slug: String,
    pub total_clicks: i64,
}

/// Response for `GET /api/statistics`.
#[derive(Debug, Serialize, Deserialize)]
pub struct StatisticsResponse {
    pub total_links: usize,
    pub total_clicks: i64,
    pub monthly: Vec<MonthlyClicksItem>,
    pub per_slug: Vec<SlugMonthlyClicksItem>,
}

impl From<StatisticsReport> for StatisticsResponse {
    fn from(report: StatisticsReport) -> Self {
        Self {
            total_links: report.total_links,
            total_clicks: report.total_clicks,
            monthly: report
                .monthly
                .into_iter()
                .map(|row| MonthlyClicksItem {
                    month: row.month,
                    total_clicks: row.total_clicks,
                })
                .collect(),
            per_slug: report
                .per_slug
                .into_iter()
                .map(|row| SlugMonthlyClicksItem {
                    month: row.month,
                    slug: row.slug,
                    total_clicks: row.total_clicks,
                })
                .collect(),
        }
    }
}
