//! Application layer services implementing business logic.
//!
//! Services consume repository traits and expose the operations HTTP
//! handlers and the admin CLI call.
//!
//! - [`services::link_service::LinkService`] - Slug allocation, resolution and link management
//! - [`services::stats_service::StatsService`] - Monthly click statistics
//! - [`services::auth_service::IdentityProvider`] - Bearer token verification

pub mod services;
