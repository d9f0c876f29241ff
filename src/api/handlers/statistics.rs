//! Handler for click statistics.

use axum::{Extension, Json, extract::State};

use crate::api::dto::statistics::StatisticsResponse;
use crate::api::middleware::CurrentUser;
use crate::error::AppError;
use crate::state::AppState;

/// Returns monthly click totals for the caller's links.
///
/// # Endpoint
///
/// `GET /api/statistics`
///
/// Months are creation months of the links (`YYYY-MM`, UTC), newest first.
///
/// # Response
///
/// ```json
/// {
///   "total_links": 2,
///   "total_clicks": 7,
///   "monthly": [{ "month": "2026-10", "total_clicks": 7 }],
///   "per_slug": [
///     { "month": "2026-10", "slug": "abc123", "total_clicks": 5 },
///     { "month": "2026-10", "slug": "promo", "total_clicks": 2 }
///   ]
/// }
/// ```
pub async fn statistics_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<StatisticsResponse>, AppError> {
    let report = state.stats_service.report(user.owner()).await?;

    Ok(Json(report.into()))
}
