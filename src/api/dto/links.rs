//! DTOs for link management endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::application::services::short_url;
use crate::domain::entities::Link;

/// Number of links returned by `GET /api/links?recent=true`.
pub const RECENT_LINKS_LIMIT: i64 = 4;

/// Request to create a short link.
///
/// Fields are passed through as received; URL repair and slug format rules
/// belong to the link service.
#[derive(Debug, Deserialize)]
pub struct CreateLinkRequest {
    /// Destination URL; a missing scheme is repaired to `http://`.
    pub url: String,

    /// Optional caller-chosen slug. Blank means "generate one".
    pub slug: Option<String>,
}

/// Response for a created link.
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateLinkResponse {
    pub slug: String,
    pub short_url: String,
    pub destination: String,
}

/// A stored link as returned by `GET /api/links`.
#[skip_serializing_none]
#[derive(Debug, Serialize, Deserialize)]
pub struct LinkResponse {
    pub slug: String,
    pub short_url: String,
    pub destination: String,
    pub owner: Option<String>,
    pub click_count: i64,
    pub created_at: DateTime<Utc>,
}

impl LinkResponse {
    pub fn from_link(link: Link, base_url: &str) -> Self {
        Self {
            short_url: short_url(base_url, &link.slug),
            slug: link.slug,
            destination: link.destination,
            owner: link.owner,
            click_count: link.click_count,
            created_at: link.created_at,
        }
    }
}

/// Query parameters for `GET /api/links`.
#[derive(Debug, Default, Deserialize)]
pub struct ListLinksQuery {
    /// Only the most recent links.
    #[serde(default)]
    pub recent: bool,
}

impl ListLinksQuery {
    pub fn limit(&self) -> Option<i64> {
        self.recent.then_some(RECENT_LINKS_LIMIT)
    }
}
