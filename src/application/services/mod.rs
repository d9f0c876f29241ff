//! Business logic services.

pub mod auth_service;
pub mod link_service;
pub mod stats_service;

pub use auth_service::{IdentityProvider, JwtIdentityProvider};
pub use link_service::{LinkService, LinkServiceSettings, short_url};
pub use stats_service::{StatisticsReport, StatsService};
