//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::services::{IdentityProvider, LinkService, StatsService};
use crate::domain::repositories::{LinkRepository, StatsRepository};

/// State shared by all handlers.
///
/// Every field is an `Arc`, so cloning per request is cheap. There is no
/// process-wide store handle: repositories are owned by the services.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService<dyn LinkRepository>>,
    pub stats_service: Arc<StatsService<dyn StatsRepository>>,
    /// `None` when authentication is disabled for the deployment.
    pub identity: Option<Arc<dyn IdentityProvider>>,
    /// Prefix for short URLs returned by the API.
    pub base_url: Arc<str>,
}

impl AppState {
    pub fn new(
        link_service: Arc<LinkService<dyn LinkRepository>>,
        stats_service: Arc<StatsService<dyn StatsRepository>>,
        identity: Option<Arc<dyn IdentityProvider>>,
        base_url: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            link_service,
            stats_service,
            identity,
            base_url: base_url.into(),
        }
    }
}
