//! Aggregated click statistics.

/// Sum of click counts for links created in one month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyClicks {
    /// Creation month formatted as `YYYY-MM`.
    pub month: String,
    pub total_clicks: i64,
}

/// Sum of click counts for one slug, keyed by its creation month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlugMonthlyClicks {
    pub month: String,
    pub slug: String,
    pub total_clicks: i64,
}
